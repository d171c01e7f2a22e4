//! Axum extractors for request handling
//!
//! Custom extractors for session authentication, validation, and path parameters.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{ChannelIdPath, DeviceIdPath, ScopePath, UserIdPath};
pub use validated::ValidatedJson;
