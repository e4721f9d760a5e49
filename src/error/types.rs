use thiserror::Error;

use crate::dice::Die;

/// Unified result type for the crate.
pub type Result<T> = std::result::Result<T, DungeonError>;

/// Errors surfaced outside the layout engine, which is total and never
/// fails on its own.
#[derive(Debug, Error)]
pub enum DungeonError {
    #[error("roll table for {die} has {found} entries, expected {expected}")]
    TableShape {
        die: Die,
        expected: u16,
        found: usize,
    },
    #[error("save file version {0} is not supported")]
    SaveVersion(u32),
    #[error("terminal backend error: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
