//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::entities::{ConversationKey, Device};
use crate::error::DomainError;
use crate::value_objects::{ConversationScope, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Device Repository
// ============================================================================

#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Find a device by ID
    async fn find(&self, device_id: &str) -> RepoResult<Option<Device>>;

    /// Resolve device IDs to their owning users
    ///
    /// Unknown device IDs are absent from the returned map.
    async fn find_owners(&self, device_ids: &[String]) -> RepoResult<HashMap<String, Snowflake>>;

    /// List a user's devices
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Device>>;

    /// List the devices of several users
    async fn find_by_users(&self, user_ids: &[Snowflake]) -> RepoResult<Vec<Device>>;

    /// Insert a device or refresh its public key
    ///
    /// Fails with `DeviceOwnedByOtherUser` if the ID belongs to someone else.
    async fn upsert(&self, device: &Device) -> RepoResult<()>;

    /// Delete a device owned by `user_id`
    async fn delete(&self, user_id: Snowflake, device_id: &str) -> RepoResult<()>;
}

// ============================================================================
// Conversation Key Repository
// ============================================================================

#[async_trait]
pub trait ConversationKeyRepository: Send + Sync {
    /// Find the key stored for one device in one conversation
    async fn find(
        &self,
        scope: ConversationScope,
        scope_id: &str,
        device_id: &str,
    ) -> RepoResult<Option<ConversationKey>>;

    /// Upsert keys on `(scope, scope_id, device_id)`, returns rows written
    async fn upsert_many(&self, keys: &[ConversationKey]) -> RepoResult<u64>;

    /// Delete every key stored for a device
    async fn delete_by_device(&self, device_id: &str) -> RepoResult<u64>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Check if user is a member of a channel
    async fn is_channel_member(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Check if user is a member of a group chat
    async fn is_group_member(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// List all members of a channel
    async fn channel_members(&self, channel_id: Snowflake) -> RepoResult<Vec<Snowflake>>;

    /// List all members of a group chat
    async fn group_members(&self, group_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}
