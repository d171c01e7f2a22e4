//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Conversation key not found")]
    ConversationKeyNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid conversation scope: {0}")]
    InvalidScope(String),

    #[error("Invalid scope id: {0}")]
    InvalidScopeId(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a participant of this conversation")]
    NotParticipant,

    #[error("Not a member of channel {0}")]
    NotChannelMember(Snowflake),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Device is registered to another user: {0}")]
    DeviceOwnedByOtherUser(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::DeviceNotFound(_) => "UNKNOWN_DEVICE",
            Self::ConversationKeyNotFound => "UNKNOWN_CONVERSATION_KEY",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidScope(_) => "INVALID_SCOPE",
            Self::InvalidScopeId(_) => "INVALID_SCOPE_ID",

            // Authorization
            Self::NotParticipant => "NOT_PARTICIPANT",
            Self::NotChannelMember(_) => "NOT_CHANNEL_MEMBER",

            // Conflict
            Self::DeviceOwnedByOtherUser(_) => "DEVICE_OWNED_BY_OTHER_USER",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DeviceNotFound(_) | Self::ConversationKeyNotFound)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidScope(_) | Self::InvalidScopeId(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotParticipant | Self::NotChannelMember(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DeviceOwnedByOtherUser(_))
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_authorization() {
            403
        } else if self.is_validation() {
            400
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}
