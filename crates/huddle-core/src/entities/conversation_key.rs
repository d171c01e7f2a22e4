//! Conversation key entity - one device's encrypted copy of a conversation key

use chrono::{DateTime, Utc};

use crate::value_objects::{ConversationScope, ScopeTarget, Snowflake};

/// Encrypted conversation key for one device
///
/// Unique on `(scope, scope_id, device_id)`. Saving again for the same
/// tuple overwrites `encrypted_key` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationKey {
    pub scope: ConversationScope,
    pub scope_id: String,
    pub user_id: Snowflake,
    pub device_id: String,
    pub encrypted_key: String,
    pub updated_at: DateTime<Utc>,
}

impl ConversationKey {
    /// Create a key record for a device owned by `user_id`
    pub fn new(
        target: &ScopeTarget,
        user_id: Snowflake,
        device_id: impl Into<String>,
        encrypted_key: impl Into<String>,
    ) -> Self {
        Self {
            scope: target.scope(),
            scope_id: target.scope_id(),
            user_id,
            device_id: device_id.into(),
            encrypted_key: encrypted_key.into(),
            updated_at: Utc::now(),
        }
    }
}
