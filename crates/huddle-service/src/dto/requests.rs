//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Typing Requests
// ============================================================================

/// Start typing request
///
/// Without `user_name` the display name from the session is used.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TypingRequest {
    #[validate(length(min = 1, max = 64, message = "User name must be 1-64 characters"))]
    pub user_name: Option<String>,
}

// ============================================================================
// Conversation Key Requests
// ============================================================================

/// One device's encrypted copy of a conversation key
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct KeyEntryRequest {
    #[validate(length(min = 1, max = 128, message = "Device ID must be 1-128 characters"))]
    pub device_id: String,

    #[validate(length(
        min = 1,
        max = 8192,
        message = "Encrypted key must be 1-8192 characters"
    ))]
    pub encrypted_key: String,
}

/// Save conversation keys request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveKeysRequest {
    #[validate(
        length(min = 1, max = 500, message = "Must contain 1-500 entries"),
        nested
    )]
    pub entries: Vec<KeyEntryRequest>,
}

/// Query string of the key lookup endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GetKeyQuery {
    pub device_id: String,
}

// ============================================================================
// Device Requests
// ============================================================================

/// Register or refresh one of the caller's devices
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterDeviceRequest {
    #[validate(length(min = 1, max = 128, message = "Device ID must be 1-128 characters"))]
    pub device_id: String,

    #[validate(length(min = 1, max = 8192, message = "Public key must be 1-8192 characters"))]
    pub public_key: String,
}
