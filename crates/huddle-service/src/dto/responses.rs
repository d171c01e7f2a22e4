//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::typing::TypingStats;

// ============================================================================
// Typing Responses
// ============================================================================

/// Acknowledgement of a typing signal
#[derive(Debug, Clone, Serialize)]
pub struct TypingStartedResponse {
    pub channel_id: String,
    pub user_id: String,
    /// Unix milliseconds
    pub timestamp: i64,
}

/// One user typing in a channel
#[derive(Debug, Clone, Serialize)]
pub struct TypingUserResponse {
    pub user_id: String,
    pub user_name: String,
    /// Unix milliseconds of the latest signal
    pub timestamp: i64,
}

/// Users currently typing in a channel
#[derive(Debug, Clone, Serialize)]
pub struct TypingListResponse {
    pub typing: Vec<TypingUserResponse>,
}

// ============================================================================
// Conversation Key Responses
// ============================================================================

/// Outcome of a key fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaveKeysResponse {
    /// Rows written
    pub saved: usize,
    /// Entries whose device is not registered
    pub skipped: usize,
}

/// A stored encrypted conversation key
#[derive(Debug, Clone, Serialize)]
pub struct ConversationKeyResponse {
    pub scope: String,
    pub scope_id: String,
    pub device_id: String,
    pub user_id: String,
    pub encrypted_key: String,
    pub updated_at: DateTime<Utc>,
}

/// Devices of every participant of a conversation
#[derive(Debug, Clone, Serialize)]
pub struct ScopeDevicesResponse {
    pub scope: String,
    pub scope_id: String,
    pub devices: Vec<DeviceResponse>,
}

// ============================================================================
// Device Responses
// ============================================================================

/// Device directory entry
#[derive(Debug, Clone, Serialize)]
pub struct DeviceResponse {
    pub device_id: String,
    pub user_id: String,
    pub public_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
    pub typing: TypingStats,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, typing: TypingStats) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
            typing,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
