//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of a request.

pub mod context;
pub mod devices;
pub mod error;
pub mod keys;
pub mod scope;
pub mod typing;

#[cfg(test)]
mod testing;

pub use context::ServiceContext;
pub use devices::DeviceService;
pub use error::{ServiceError, ServiceResult};
pub use keys::KeyService;
pub use scope::ScopeAuthorizer;
pub use typing::TypingService;
