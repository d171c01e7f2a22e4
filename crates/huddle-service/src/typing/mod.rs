//! In-memory typing presence
//!
//! Process-local and never persisted. Entries expire after the configured TTL.

mod store;
mod sweeper;

pub use store::{now_millis, TypingStats, TypingStore};
pub use sweeper::spawn_sweeper;
