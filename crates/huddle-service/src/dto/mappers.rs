//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use huddle_core::{ConversationKey, Device, TypingEntry};

use super::responses::{
    ConversationKeyResponse, DeviceResponse, TypingStartedResponse, TypingUserResponse,
};

// ============================================================================
// Typing Mappers
// ============================================================================

impl From<&TypingEntry> for TypingStartedResponse {
    fn from(entry: &TypingEntry) -> Self {
        Self {
            channel_id: entry.channel_id.to_string(),
            user_id: entry.user_id.to_string(),
            timestamp: entry.timestamp_millis,
        }
    }
}

impl From<TypingEntry> for TypingUserResponse {
    fn from(entry: TypingEntry) -> Self {
        Self {
            user_id: entry.user_id.to_string(),
            user_name: entry.user_name,
            timestamp: entry.timestamp_millis,
        }
    }
}

// ============================================================================
// Device Mappers
// ============================================================================

impl From<&Device> for DeviceResponse {
    fn from(device: &Device) -> Self {
        Self {
            device_id: device.device_id.clone(),
            user_id: device.user_id.to_string(),
            public_key: device.public_key.clone(),
            created_at: device.created_at,
            updated_at: device.updated_at,
        }
    }
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self::from(&device)
    }
}

// ============================================================================
// Conversation Key Mappers
// ============================================================================

impl From<ConversationKey> for ConversationKeyResponse {
    fn from(key: ConversationKey) -> Self {
        Self {
            scope: key.scope.to_string(),
            scope_id: key.scope_id,
            device_id: key.device_id,
            user_id: key.user_id.to_string(),
            encrypted_key: key.encrypted_key,
            updated_at: key.updated_at,
        }
    }
}
