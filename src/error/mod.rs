//! Error module orchestrator.

mod types;

pub use types::{DungeonError, Result};
