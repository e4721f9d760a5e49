use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Polyhedral dice recognised by the roller and the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Die {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl Die {
    /// Every die in throw order.
    pub const ALL: [Die; 7] = [
        Die::D4,
        Die::D6,
        Die::D8,
        Die::D10,
        Die::D12,
        Die::D20,
        Die::D100,
    ];

    pub const fn sides(self) -> u16 {
        match self {
            Die::D4 => 4,
            Die::D6 => 6,
            Die::D8 => 8,
            Die::D10 => 10,
            Die::D12 => 12,
            Die::D20 => 20,
            Die::D100 => 100,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Die::D4 => "D4",
            Die::D6 => "D6",
            Die::D8 => "D8",
            Die::D10 => "D10",
            Die::D12 => "D12",
            Die::D20 => "D20",
            Die::D100 => "D100",
        }
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one throw of the enabled dice.
///
/// A `None` entry means the die was not thrown; consumers substitute their
/// documented defaults. Values are face values, so always within
/// `1..=sides()` when produced by [`DiceRoller`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceResults {
    #[serde(rename = "D4", default, skip_serializing_if = "Option::is_none")]
    pub d4: Option<u16>,
    #[serde(rename = "D6", default, skip_serializing_if = "Option::is_none")]
    pub d6: Option<u16>,
    #[serde(rename = "D8", default, skip_serializing_if = "Option::is_none")]
    pub d8: Option<u16>,
    #[serde(rename = "D10", default, skip_serializing_if = "Option::is_none")]
    pub d10: Option<u16>,
    #[serde(rename = "D12", default, skip_serializing_if = "Option::is_none")]
    pub d12: Option<u16>,
    #[serde(rename = "D20", default, skip_serializing_if = "Option::is_none")]
    pub d20: Option<u16>,
    #[serde(rename = "D100", default, skip_serializing_if = "Option::is_none")]
    pub d100: Option<u16>,
}

impl DiceResults {
    pub fn get(&self, die: Die) -> Option<u16> {
        match die {
            Die::D4 => self.d4,
            Die::D6 => self.d6,
            Die::D8 => self.d8,
            Die::D10 => self.d10,
            Die::D12 => self.d12,
            Die::D20 => self.d20,
            Die::D100 => self.d100,
        }
    }

    pub fn set(&mut self, die: Die, value: u16) {
        let slot = match die {
            Die::D4 => &mut self.d4,
            Die::D6 => &mut self.d6,
            Die::D8 => &mut self.d8,
            Die::D10 => &mut self.d10,
            Die::D12 => &mut self.d12,
            Die::D20 => &mut self.d20,
            Die::D100 => &mut self.d100,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        Die::ALL.iter().all(|die| self.get(*die).is_none())
    }
}

/// Per-die enable switches. Everything is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledDice {
    #[serde(rename = "D4", default = "enabled")]
    pub d4: bool,
    #[serde(rename = "D6", default = "enabled")]
    pub d6: bool,
    #[serde(rename = "D8", default = "enabled")]
    pub d8: bool,
    #[serde(rename = "D10", default = "enabled")]
    pub d10: bool,
    #[serde(rename = "D12", default = "enabled")]
    pub d12: bool,
    #[serde(rename = "D20", default = "enabled")]
    pub d20: bool,
    #[serde(rename = "D100", default = "enabled")]
    pub d100: bool,
}

fn enabled() -> bool {
    true
}

impl Default for EnabledDice {
    fn default() -> Self {
        Self {
            d4: true,
            d6: true,
            d8: true,
            d10: true,
            d12: true,
            d20: true,
            d100: true,
        }
    }
}

impl EnabledDice {
    pub fn contains(&self, die: Die) -> bool {
        match die {
            Die::D4 => self.d4,
            Die::D6 => self.d6,
            Die::D8 => self.d8,
            Die::D10 => self.d10,
            Die::D12 => self.d12,
            Die::D20 => self.d20,
            Die::D100 => self.d100,
        }
    }

    pub fn set(&mut self, die: Die, on: bool) {
        let slot = match die {
            Die::D4 => &mut self.d4,
            Die::D6 => &mut self.d6,
            Die::D8 => &mut self.d8,
            Die::D10 => &mut self.d10,
            Die::D12 => &mut self.d12,
            Die::D20 => &mut self.d20,
            Die::D100 => &mut self.d100,
        };
        *slot = on;
    }
}

/// Rolls every enabled die uniformly in `1..=sides`.
///
/// The roller is the only place randomness enters the crate; the layout
/// engine downstream consumes finished [`DiceResults`] and stays
/// deterministic. The D100 is thrown as a true hundred-sided die.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiceRoller {
    enabled: EnabledDice,
}

impl DiceRoller {
    pub fn new(enabled: EnabledDice) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> &EnabledDice {
        &self.enabled
    }

    pub fn roll(&self, rng: &mut impl Rng) -> DiceResults {
        let mut results = DiceResults::default();
        for die in Die::ALL {
            if self.enabled.contains(die) {
                results.set(die, rng.gen_range(1..=die.sides()));
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sides_match_labels() {
        for die in Die::ALL {
            let numeric: u16 = die.label()[1..].parse().unwrap();
            assert_eq!(die.sides(), numeric);
        }
    }

    #[test]
    fn roll_stays_within_face_range() {
        let roller = DiceRoller::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let results = roller.roll(&mut rng);
            for die in Die::ALL {
                let value = results.get(die).expect("all dice enabled");
                assert!((1..=die.sides()).contains(&value), "{die}: {value}");
            }
        }
    }

    #[test]
    fn disabled_die_is_not_thrown() {
        let mut enabled = EnabledDice::default();
        enabled.set(Die::D20, false);
        enabled.set(Die::D100, false);
        let roller = DiceRoller::new(enabled);
        let mut rng = StdRng::seed_from_u64(11);

        let results = roller.roll(&mut rng);
        assert!(results.d20.is_none());
        assert!(results.d100.is_none());
        assert!(results.d6.is_some());
    }

    #[test]
    fn results_serialize_with_die_labels() {
        let results = DiceResults {
            d10: Some(7),
            d100: Some(42),
            ..DiceResults::default()
        };
        let value = serde_json::to_value(results).unwrap();
        assert_eq!(value["D10"], 7);
        assert_eq!(value["D100"], 42);
        assert!(value.get("D6").is_none());
    }

    #[test]
    fn absent_keys_deserialize_to_none() {
        let results: DiceResults = serde_json::from_str("{\"D6\": 3}").unwrap();
        assert_eq!(results.d6, Some(3));
        assert!(results.d4.is_none());
        assert!(!results.is_empty());
        assert!(DiceResults::default().is_empty());
    }
}
