//! Flavor-text roll tables.
//!
//! Each die may carry a table with exactly one entry per face; looking up a
//! rolled value returns the matching entry. Tables ship with built-in
//! defaults and can be replaced wholesale from JSON, keeping the same
//! `{"D12": ["...", ...]}` document shape the dice tables were always
//! persisted in.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use crate::dice::Die;
use crate::error::{DungeonError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollTables {
    tables: BTreeMap<Die, Vec<String>>,
}

impl RollTables {
    /// No tables at all; every lookup returns `None`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in vocabulary. Dimension dice (D10, D100) stay
    /// numeric-only.
    pub fn builtin() -> Self {
        let mut tables = Self::empty();
        let seed: [(Die, &[&str]); 5] = [
            (Die::D4, &HALLWAY_LENGTHS),
            (Die::D6, &EXIT_COUNTS),
            (Die::D8, &ENCOUNTERS),
            (Die::D12, &ROOM_TYPES),
            (Die::D20, &MODIFIERS),
        ];
        for (die, entries) in seed {
            let owned = entries.iter().map(|s| s.to_string()).collect();
            tables
                .insert(die, owned)
                .expect("built-in tables match die side counts");
        }
        tables
    }

    /// Install a table for one die. Rejects entry lists whose length does
    /// not match the die's side count, so a lookup can never go out of
    /// range.
    pub fn insert(&mut self, die: Die, entries: Vec<String>) -> Result<()> {
        if entries.len() != die.sides() as usize {
            return Err(DungeonError::TableShape {
                die,
                expected: die.sides(),
                found: entries.len(),
            });
        }
        self.tables.insert(die, entries);
        Ok(())
    }

    /// Flavor text for a rolled face value, `None` when the die has no
    /// table or the value is out of face range.
    pub fn describe(&self, die: Die, value: u16) -> Option<&str> {
        if value == 0 {
            return None;
        }
        self.tables
            .get(&die)?
            .get(value as usize - 1)
            .map(String::as_str)
    }

    pub fn has_table(&self, die: Die) -> bool {
        self.tables.contains_key(&die)
    }

    /// Load tables from a JSON document, validating every entry count.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let raw: BTreeMap<Die, Vec<String>> = serde_json::from_reader(reader)?;
        let mut tables = Self::empty();
        for (die, entries) in raw {
            tables.insert(die, entries)?;
        }
        Ok(tables)
    }

    pub fn to_writer(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.tables)?;
        Ok(())
    }
}

const HALLWAY_LENGTHS: [&str; 4] = [
    "A cramped connecting passage",
    "A short corridor",
    "A long corridor",
    "A winding passage into the dark",
];

const EXIT_COUNTS: [&str; 6] = [
    "A single far door",
    "A single far door",
    "Two doors lead onward",
    "Two doors lead onward",
    "Three doors lead onward",
    "Three doors lead onward",
];

const ENCOUNTERS: [&str; 8] = [
    "Empty and silent",
    "A nest of rats",
    "Goblin scouts at camp",
    "A wandering skeleton",
    "An unsprung trap",
    "A sleeping beast",
    "Cultists mid-ritual",
    "Something watches from the dark",
];

const ROOM_TYPES: [&str; 12] = [
    "Dusty Chamber",
    "Hidden Alcove",
    "Grand Hall",
    "Dark Corridor",
    "Ancient Library",
    "Treasury Room",
    "Guard Post",
    "Dining Hall",
    "Armory",
    "Sleeping Quarters",
    "Throne Room",
    "Temple Sanctuary",
];

const MODIFIERS: [&str; 20] = [
    "Filled with cobwebs",
    "Eerily silent",
    "Dimly lit",
    "Partially flooded",
    "Covered in moss",
    "Magically enhanced",
    "Structurally unstable",
    "Trapped",
    "Recently occupied",
    "Ancient and worn",
    "Mysteriously clean",
    "Haunted",
    "Decorated ornately",
    "Completely dark",
    "Well maintained",
    "Abandoned",
    "Under construction",
    "Heavily guarded",
    "Partially collapsed",
    "Magical",
];
