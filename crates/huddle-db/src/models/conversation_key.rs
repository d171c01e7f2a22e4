//! Conversation key database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for conversation_keys table
#[derive(Debug, Clone, FromRow)]
pub struct ConversationKeyModel {
    pub scope: String,
    pub scope_id: String,
    pub user_id: i64,
    pub device_id: String,
    pub encrypted_key: String,
    pub updated_at: DateTime<Utc>,
}
