//! ConversationKey entity <-> model mapper

use huddle_core::{ConversationKey, ConversationScope, DomainError, Snowflake};

use crate::models::ConversationKeyModel;

impl TryFrom<ConversationKeyModel> for ConversationKey {
    type Error = DomainError;

    fn try_from(model: ConversationKeyModel) -> Result<Self, Self::Error> {
        let scope: ConversationScope = model.scope.parse().map_err(|_| {
            DomainError::DatabaseError(format!("Unknown scope in conversation_keys: {}", model.scope))
        })?;

        Ok(ConversationKey {
            scope,
            scope_id: model.scope_id,
            user_id: Snowflake::new(model.user_id),
            device_id: model.device_id,
            encrypted_key: model.encrypted_key,
            updated_at: model.updated_at,
        })
    }
}

/// Conversation key values for insertion
pub struct ConversationKeyInsert<'a> {
    pub scope: &'static str,
    pub scope_id: &'a str,
    pub user_id: i64,
    pub device_id: &'a str,
    pub encrypted_key: &'a str,
}

impl<'a> ConversationKeyInsert<'a> {
    pub fn new(key: &'a ConversationKey) -> Self {
        Self {
            scope: key.scope.as_str(),
            scope_id: &key.scope_id,
            user_id: key.user_id.into_inner(),
            device_id: &key.device_id,
            encrypted_key: &key.encrypted_key,
        }
    }
}
