//! Path parameter extractors
//!
//! Snowflake path segments are parsed on access so a malformed id becomes
//! a 400 instead of a routing miss.

use huddle_core::Snowflake;

use crate::response::ApiError;

/// Path parameters with channel_id
#[derive(Debug, serde::Deserialize)]
pub struct ChannelIdPath {
    pub channel_id: String,
}

impl ChannelIdPath {
    /// Parse channel_id as Snowflake
    pub fn channel_id(&self) -> Result<Snowflake, ApiError> {
        self.channel_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid channel_id format"))
    }
}

/// Path parameters with user_id
#[derive(Debug, serde::Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    /// Parse user_id as Snowflake
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        self.user_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid user_id format"))
    }
}

/// Path parameters with device_id
#[derive(Debug, serde::Deserialize)]
pub struct DeviceIdPath {
    pub device_id: String,
}

/// Path parameters addressing a conversation
///
/// Scope and scope id stay raw; the key service validates them.
#[derive(Debug, serde::Deserialize)]
pub struct ScopePath {
    pub scope: String,
    pub scope_id: String,
}
