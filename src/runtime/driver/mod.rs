//! Terminal drivers owning the runtime loop's screen lifecycle.

pub mod cli;
