//! Integration test utilities for huddle
//!
//! Spawns the full REST API on a random port, backed by in-memory
//! repositories, and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
