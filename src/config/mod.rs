//! Application configuration.
//!
//! Serialized as JSON with every field defaulted, so configs written by
//! older builds (or hand-edited ones with missing keys) load as
//! "defaults plus whatever was present".

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::dice::EnabledDice;
use crate::error::Result;
use crate::layout::LayoutPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DungeonConfig {
    /// Which dice take part in a throw.
    pub enabled_dice: EnabledDice,
    /// Whether the floor plan is drawn at all; rolls always land in the
    /// history either way.
    pub generate_plan: bool,
    pub layout: LayoutPolicy,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            enabled_dice: EnabledDice::default(),
            generate_plan: false,
            layout: LayoutPolicy::default(),
        }
    }
}

impl DungeonConfig {
    pub fn load_from(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save_to(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Die;
    use crate::layout::LengthPolicy;

    #[test]
    fn round_trip_preserves_settings() {
        let mut config = DungeonConfig::default();
        config.generate_plan = true;
        config.enabled_dice.set(Die::D20, false);
        config.layout.length = LengthPolicy::Direct;

        let mut buffer = Vec::new();
        config.save_to(&mut buffer).unwrap();
        let reloaded = DungeonConfig::load_from(buffer.as_slice()).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = DungeonConfig::load_from("{\"generatePlan\": true}".as_bytes()).unwrap();
        assert!(config.generate_plan);
        assert_eq!(config.enabled_dice, EnabledDice::default());
        assert_eq!(config.layout, LayoutPolicy::default());
    }

    #[test]
    fn empty_document_is_the_default_config() {
        let config = DungeonConfig::load_from("{}".as_bytes()).unwrap();
        assert_eq!(config, DungeonConfig::default());
    }
}
