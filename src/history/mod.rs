//! Structured roll history.
//!
//! Every throw becomes a [`RollRecord`] grouping the dice by what they mean
//! for the dungeon: the hallway section (D4 length, D6 exits) and the room
//! section (D8 encounter, D10/D100 dimensions, D12 type, D20 modifier).
//! The log can be exported as plain text or persisted as versioned JSON.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::dice::{DiceResults, Die};
use crate::error::{DungeonError, Result};
use crate::tables::RollTables;

const SAVE_VERSION: u32 = 1;

/// One die's contribution to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRoll {
    pub die: Die,
    pub value: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DieRoll {
    fn capture(die: Die, dice: &DiceResults, tables: &RollTables) -> Option<Self> {
        dice.get(die).map(|value| Self {
            die,
            value,
            description: tables.describe(die, value).map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallwaySection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<DieRoll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exits: Option<DieRoll>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter: Option<DieRoll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<DieRoll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<DieRoll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<DieRoll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<DieRoll>,
}

/// One generated room, as thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    pub id: u64,
    pub ts_ms: u64,
    pub hallway: HallwaySection,
    pub room: RoomSection,
}

impl RollRecord {
    pub fn new(id: u64, ts_ms: u64, dice: &DiceResults, tables: &RollTables) -> Self {
        Self {
            id,
            ts_ms,
            hallway: HallwaySection {
                length: DieRoll::capture(Die::D4, dice, tables),
                exits: DieRoll::capture(Die::D6, dice, tables),
            },
            room: RoomSection {
                encounter: DieRoll::capture(Die::D8, dice, tables),
                width: DieRoll::capture(Die::D10, dice, tables),
                length: DieRoll::capture(Die::D100, dice, tables),
                room_type: DieRoll::capture(Die::D12, dice, tables),
                modifier: DieRoll::capture(Die::D20, dice, tables),
            },
        }
    }

    /// The raw throw this record was built from, for re-running the layout.
    pub fn dice(&self) -> DiceResults {
        let mut dice = DiceResults::default();
        for roll in self.rolls() {
            dice.set(roll.die, roll.value);
        }
        dice
    }

    /// Present dice in display order.
    pub fn rolls(&self) -> impl Iterator<Item = &DieRoll> {
        [
            self.hallway.length.as_ref(),
            self.hallway.exits.as_ref(),
            self.room.encounter.as_ref(),
            self.room.width.as_ref(),
            self.room.length.as_ref(),
            self.room.room_type.as_ref(),
            self.room.modifier.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    next_id: u64,
    records: Vec<RollRecord>,
}

/// Append-only log of generated rooms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollHistory {
    records: Vec<RollRecord>,
    next_id: u64,
}

impl RollHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a throw and return the stored record.
    pub fn push_throw(
        &mut self,
        dice: &DiceResults,
        tables: &RollTables,
        ts_ms: u64,
    ) -> &RollRecord {
        let record = RollRecord::new(self.next_id, ts_ms, dice, tables);
        self.next_id += 1;
        self.records.push(record);
        self.records.last().expect("record just pushed")
    }

    pub fn records(&self) -> &[RollRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&RollRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Plain-text export of the whole log.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Roll History:\n\n");
        for (index, record) in self.records.iter().enumerate() {
            out.push_str(&format!("Roll {} ({} ms):\n", index + 1, record.ts_ms));
            for roll in record.rolls() {
                let description = roll.description.as_deref().unwrap_or("No description");
                out.push_str(&format!("{}: {} ({})\n", roll.die, roll.value, description));
            }
            out.push('\n');
        }
        out
    }

    pub fn save_to(&self, writer: impl Write) -> Result<()> {
        let data = SaveData {
            version: SAVE_VERSION,
            next_id: self.next_id,
            records: self.records.clone(),
        };
        serde_json::to_writer(writer, &data)?;
        Ok(())
    }

    pub fn load_from(reader: impl Read) -> Result<Self> {
        let data: SaveData = serde_json::from_reader(reader)?;
        if data.version != SAVE_VERSION {
            return Err(DungeonError::SaveVersion(data.version));
        }
        Ok(Self {
            records: data.records,
            next_id: data.next_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_throw() -> DiceResults {
        DiceResults {
            d4: Some(2),
            d6: Some(4),
            d8: Some(1),
            d10: Some(5),
            d12: Some(1),
            d20: Some(3),
            d100: Some(50),
        }
    }

    #[test]
    fn records_group_dice_by_section() {
        let mut history = RollHistory::new();
        let tables = RollTables::builtin();
        let record = history.push_throw(&sample_throw(), &tables, 1000);

        assert_eq!(record.id, 0);
        assert_eq!(record.hallway.length.as_ref().unwrap().value, 2);
        assert_eq!(record.hallway.exits.as_ref().unwrap().value, 4);
        assert_eq!(record.room.width.as_ref().unwrap().value, 5);
        assert_eq!(record.room.length.as_ref().unwrap().value, 50);
        assert_eq!(
            record.room.room_type.as_ref().unwrap().description.as_deref(),
            Some("Dusty Chamber")
        );
        assert!(record.room.length.as_ref().unwrap().description.is_none());
    }

    #[test]
    fn record_reconstructs_its_throw() {
        let mut history = RollHistory::new();
        let tables = RollTables::builtin();
        let dice = sample_throw();
        let record = history.push_throw(&dice, &tables, 0).clone();
        assert_eq!(record.dice(), dice);
    }

    #[test]
    fn partial_throws_skip_absent_dice() {
        let mut history = RollHistory::new();
        let tables = RollTables::builtin();
        let dice = DiceResults {
            d10: Some(3),
            ..DiceResults::default()
        };
        let record = history.push_throw(&dice, &tables, 0);
        assert!(record.hallway.length.is_none());
        assert!(record.room.room_type.is_none());
        assert_eq!(record.room.width.as_ref().unwrap().value, 3);
    }

    #[test]
    fn export_text_lists_every_roll() {
        let mut history = RollHistory::new();
        let tables = RollTables::builtin();
        history.push_throw(&sample_throw(), &tables, 42);

        let text = history.export_text();
        assert!(text.starts_with("Roll History:\n\nRoll 1 (42 ms):\n"));
        assert!(text.contains("D4: 2 (A short corridor)\n"));
        assert!(text.contains("D100: 50 (No description)\n"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut history = RollHistory::new();
        let tables = RollTables::builtin();
        history.push_throw(&sample_throw(), &tables, 1);
        history.push_throw(&DiceResults::default(), &tables, 2);

        let mut buffer = Vec::new();
        history.save_to(&mut buffer).unwrap();
        let reloaded = RollHistory::load_from(buffer.as_slice()).unwrap();
        assert_eq!(reloaded, history);
    }

    #[test]
    fn unknown_save_versions_are_rejected() {
        let doc = "{\"version\": 9, \"next_id\": 0, \"records\": []}";
        let err = RollHistory::load_from(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, DungeonError::SaveVersion(9)));
    }

    #[test]
    fn ids_keep_increasing_after_reload() {
        let mut history = RollHistory::new();
        let tables = RollTables::builtin();
        history.push_throw(&sample_throw(), &tables, 1);

        let mut buffer = Vec::new();
        history.save_to(&mut buffer).unwrap();
        let mut reloaded = RollHistory::load_from(buffer.as_slice()).unwrap();
        let record = reloaded.push_throw(&sample_throw(), &tables, 2);
        assert_eq!(record.id, 1);
    }
}
