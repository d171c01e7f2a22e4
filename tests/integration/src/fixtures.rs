//! Test fixtures and data generators
//!
//! Request builders and the client-side view of response bodies.

use std::sync::atomic::{AtomicI64, Ordering};

use huddle_core::Snowflake;
use serde::{Deserialize, Serialize};

static COUNTER: AtomicI64 = AtomicI64::new(1_000);

/// A fresh Snowflake for users, channels or groups
pub fn unique_id() -> Snowflake {
    Snowflake::new(COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// A fresh device identifier
pub fn unique_device_id() -> String {
    format!("device-{}", uuid::Uuid::new_v4())
}

// ============================================================================
// Requests
// ============================================================================

/// Typing signal body
#[derive(Debug, Default, Serialize)]
pub struct TypingBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl TypingBody {
    pub fn named(name: &str) -> Self {
        Self {
            user_name: Some(name.to_string()),
        }
    }
}

/// Device registration body
#[derive(Debug, Clone, Serialize)]
pub struct RegisterDeviceBody {
    pub device_id: String,
    pub public_key: String,
}

impl RegisterDeviceBody {
    pub fn unique() -> Self {
        Self {
            device_id: unique_device_id(),
            public_key: "pk-test".to_string(),
        }
    }
}

/// One encrypted copy in a key fan-out
#[derive(Debug, Clone, Serialize)]
pub struct KeyEntryBody {
    pub device_id: String,
    pub encrypted_key: String,
}

/// Key fan-out body
#[derive(Debug, Clone, Serialize)]
pub struct SaveKeysBody {
    pub entries: Vec<KeyEntryBody>,
}

impl SaveKeysBody {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(device_id, key)| KeyEntryBody {
                    device_id: device_id.to_string(),
                    encrypted_key: key.to_string(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TypingStarted {
    pub channel_id: String,
    pub user_id: String,
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
pub struct TypingUser {
    pub user_id: String,
    pub user_name: String,
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
pub struct TypingList {
    pub typing: Vec<TypingUser>,
}

#[derive(Debug, Deserialize)]
pub struct SavedKeys {
    pub saved: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
pub struct StoredKey {
    pub scope: String,
    pub scope_id: String,
    pub device_id: String,
    pub user_id: String,
    pub encrypted_key: String,
}

#[derive(Debug, Deserialize)]
pub struct DeviceInfo {
    pub device_id: String,
    pub user_id: String,
    pub public_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ScopeDevices {
    pub scope: String,
    pub scope_id: String,
    pub devices: Vec<DeviceInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
