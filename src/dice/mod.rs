//! Dice module orchestrator.
//!
//! Downstream modules import dice types from here while the implementation
//! details live in the private `core` module.

mod core;

pub use core::{DiceResults, DiceRoller, Die, EnabledDice};
