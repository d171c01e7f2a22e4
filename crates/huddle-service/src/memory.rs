//! In-memory repository implementations
//!
//! Back the service layer without PostgreSQL, for tests and local runs.
//! They follow the same contracts as the `huddle-db` repositories.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use huddle_core::{
    ConversationKey, ConversationKeyRepository, ConversationScope, Device, DeviceRepository,
    DomainError, MembershipRepository, RepoResult, Snowflake,
};

// ============================================================================
// Devices
// ============================================================================

/// Device directory held in a map
#[derive(Debug, Default)]
pub struct MemoryDeviceRepository {
    devices: RwLock<HashMap<String, Device>>,
}

impl MemoryDeviceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceRepository for MemoryDeviceRepository {
    async fn find(&self, device_id: &str) -> RepoResult<Option<Device>> {
        Ok(self.devices.read().await.get(device_id).cloned())
    }

    async fn find_owners(&self, device_ids: &[String]) -> RepoResult<HashMap<String, Snowflake>> {
        let devices = self.devices.read().await;
        Ok(device_ids
            .iter()
            .filter_map(|id| devices.get(id).map(|d| (id.clone(), d.user_id)))
            .collect())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Device>> {
        self.find_by_users(&[user_id]).await
    }

    async fn find_by_users(&self, user_ids: &[Snowflake]) -> RepoResult<Vec<Device>> {
        let devices = self.devices.read().await;
        let mut found: Vec<Device> = devices
            .values()
            .filter(|d| user_ids.contains(&d.user_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            (a.user_id, a.created_at, &a.device_id).cmp(&(b.user_id, b.created_at, &b.device_id))
        });
        Ok(found)
    }

    async fn upsert(&self, device: &Device) -> RepoResult<()> {
        let mut devices = self.devices.write().await;
        match devices.get_mut(&device.device_id) {
            Some(existing) if !existing.is_owned_by(device.user_id) => Err(
                DomainError::DeviceOwnedByOtherUser(device.device_id.clone()),
            ),
            Some(existing) => {
                existing.set_public_key(device.public_key.clone());
                Ok(())
            }
            None => {
                devices.insert(device.device_id.clone(), device.clone());
                Ok(())
            }
        }
    }

    async fn delete(&self, user_id: Snowflake, device_id: &str) -> RepoResult<()> {
        let mut devices = self.devices.write().await;
        match devices.get(device_id) {
            Some(device) if device.is_owned_by(user_id) => {
                devices.remove(device_id);
                Ok(())
            }
            _ => Err(DomainError::DeviceNotFound(device_id.to_string())),
        }
    }
}

// ============================================================================
// Conversation keys
// ============================================================================

type KeyId = (ConversationScope, String, String);

/// Conversation keys held in a map keyed on `(scope, scope_id, device_id)`
#[derive(Debug, Default)]
pub struct MemoryConversationKeyRepository {
    keys: RwLock<HashMap<KeyId, ConversationKey>>,
}

impl MemoryConversationKeyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.keys.read().await.len()
    }

    /// Whether no rows are stored
    pub async fn is_empty(&self) -> bool {
        self.keys.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationKeyRepository for MemoryConversationKeyRepository {
    async fn find(
        &self,
        scope: ConversationScope,
        scope_id: &str,
        device_id: &str,
    ) -> RepoResult<Option<ConversationKey>> {
        let id = (scope, scope_id.to_string(), device_id.to_string());
        Ok(self.keys.read().await.get(&id).cloned())
    }

    async fn upsert_many(&self, keys: &[ConversationKey]) -> RepoResult<u64> {
        let mut stored = self.keys.write().await;
        for key in keys {
            let id = (key.scope, key.scope_id.clone(), key.device_id.clone());
            stored.insert(id, key.clone());
        }
        Ok(keys.len() as u64)
    }

    async fn delete_by_device(&self, device_id: &str) -> RepoResult<u64> {
        let mut stored = self.keys.write().await;
        let before = stored.len();
        stored.retain(|(_, _, id), _| id != device_id);
        Ok((before - stored.len()) as u64)
    }
}

// ============================================================================
// Membership
// ============================================================================

/// Channel and group rosters held in maps
#[derive(Debug, Default)]
pub struct MemoryMembershipRepository {
    channels: RwLock<HashMap<Snowflake, BTreeSet<Snowflake>>>,
    groups: RwLock<HashMap<Snowflake, BTreeSet<Snowflake>>>,
}

impl MemoryMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user to a channel roster
    pub async fn add_channel_member(&self, channel_id: Snowflake, user_id: Snowflake) {
        self.channels
            .write()
            .await
            .entry(channel_id)
            .or_default()
            .insert(user_id);
    }

    /// Add a user to a group roster
    pub async fn add_group_member(&self, group_id: Snowflake, user_id: Snowflake) {
        self.groups
            .write()
            .await
            .entry(group_id)
            .or_default()
            .insert(user_id);
    }
}

async fn roster(
    map: &RwLock<HashMap<Snowflake, BTreeSet<Snowflake>>>,
    id: Snowflake,
) -> Vec<Snowflake> {
    map.read()
        .await
        .get(&id)
        .map(|members| members.iter().copied().collect())
        .unwrap_or_default()
}

#[async_trait]
impl MembershipRepository for MemoryMembershipRepository {
    async fn is_channel_member(&self, channel_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .channels
            .read()
            .await
            .get(&channel_id)
            .is_some_and(|members| members.contains(&user_id)))
    }

    async fn is_group_member(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .groups
            .read()
            .await
            .get(&group_id)
            .is_some_and(|members| members.contains(&user_id)))
    }

    async fn channel_members(&self, channel_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        Ok(roster(&self.channels, channel_id).await)
    }

    async fn group_members(&self, group_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        Ok(roster(&self.groups, group_id).await)
    }
}
