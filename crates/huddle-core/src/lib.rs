//! # huddle-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{ConversationKey, Device, TypingEntry};
pub use error::DomainError;
pub use traits::{
    ConversationKeyRepository, DeviceRepository, MembershipRepository, RepoResult,
};
pub use value_objects::{
    ConversationScope, ScopeTarget, Snowflake, SnowflakeParseError,
};
