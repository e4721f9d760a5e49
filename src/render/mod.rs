//! Render module orchestrator.
//!
//! The renderer consumes finished [`crate::layout::RoomLayout`] values and
//! never computes geometry of its own. On this surface one "pixel" is one
//! character column, so the engine's pixel scale is driven by a
//! terminal-profile [`crate::layout::LayoutPolicy`].

mod core;

pub use core::{PlanRenderer, PlanRendererSettings};
