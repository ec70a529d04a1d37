//! # orbit-shared
//!
//! Identifier newtypes, tuning constants and the tracing bootstrap shared by
//! the Orbit store and agent crates.

pub mod constants;
pub mod logging;
pub mod types;
