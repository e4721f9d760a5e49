//! Dicey Dungeon: a dice-driven dungeon room generator.
//!
//! A throw of polyhedral dice becomes a room: the D10 and D100 set the
//! floor dimensions, the D6 the number of secondary exits, the D4 the
//! entrance hallway, and the remaining dice pick flavor text from roll
//! tables. The layout engine in [`layout`] is the deterministic core;
//! everything else (roller, tables, history, renderer, runtime) feeds it
//! or consumes its output.

pub mod cache;
pub mod config;
pub mod dice;
pub mod error;
pub mod geometry;
pub mod history;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod runtime;
pub mod tables;
pub mod width;

pub use cache::PlanCache;
pub use config::DungeonConfig;
pub use dice::{DiceResults, DiceRoller, Die, EnabledDice};
pub use error::{DungeonError, Result};
pub use geometry::{PixelRect, Size};
pub use history::{DieRoll, RollHistory, RollRecord};
pub use layout::{
    Entrance, ExitMarker, Hallway, HallwayPolicy, LayoutEngine, LayoutPolicy, LengthPolicy,
    RoomDimensions, RoomLayout, Wall,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, NullSink,
};
pub use metrics::{MetricSnapshot, RollMetrics};
pub use render::{PlanRenderer, PlanRendererSettings};
pub use runtime::driver::cli::{CliDriver, CliDriverError, DriverResult};
pub use runtime::{DungeonRuntime, RuntimeConfig, RuntimeEvent};
pub use tables::RollTables;
pub use width::display_width;
