//! # huddle-service
//!
//! Application layer: typing presence, conversation key fan-out and the
//! device directory, plus the DTOs the HTTP layer speaks.

pub mod dto;
pub mod memory;
pub mod services;
pub mod typing;

pub use dto::*;
pub use services::{
    DeviceService, KeyService, ScopeAuthorizer, ServiceContext,
    ServiceError, ServiceResult, TypingService,
};
pub use typing::{spawn_sweeper, TypingStats, TypingStore};
