//! Layout module orchestrator.
//!
//! Downstream modules and demos import layout types from here while the
//! implementation details live in the private `core` module.

mod core;

pub use core::{
    DEFAULT_LENGTH_ROLL, DEFAULT_WIDTH_CELLS, Entrance, ExitMarker, FEET_PER_CELL, Hallway,
    HallwayPolicy, LayoutEngine, LayoutPolicy, LengthPolicy, RoomDimensions, RoomLayout, Wall,
};
