//! Conversation key service
//!
//! Fans one conversation key out to per-device encrypted copies and serves
//! them back to the owning devices.

use std::collections::{HashMap, HashSet};

use huddle_core::{ConversationKey, DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    ConversationKeyResponse, DeviceResponse, KeyEntryRequest, SaveKeysRequest, SaveKeysResponse,
    ScopeDevicesResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::scope::ScopeAuthorizer;

/// Conversation key service
pub struct KeyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> KeyService<'a> {
    /// Create a new KeyService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store one encrypted key per device for a conversation
    ///
    /// Entries naming an unregistered device, or a device whose owner is not
    /// a participant of the conversation, are skipped, not rejected.
    #[instrument(skip(self, request), fields(entries = request.entries.len()))]
    pub async fn save_keys(
        &self,
        scope: &str,
        scope_id: &str,
        user_id: Snowflake,
        request: SaveKeysRequest,
    ) -> ServiceResult<SaveKeysResponse> {
        let target = ScopeAuthorizer::resolve(scope, scope_id)?;
        let authorizer = ScopeAuthorizer::new(self.ctx);
        authorizer.authorize(&target, user_id).await?;
        let participants: HashSet<Snowflake> =
            authorizer.participants(&target).await?.into_iter().collect();

        let entries = collapse_duplicates(request.entries);
        let device_ids: Vec<String> = entries.iter().map(|e| e.device_id.clone()).collect();
        let owners = self.ctx.device_repo().find_owners(&device_ids).await?;

        let mut keys = Vec::with_capacity(entries.len());
        let mut skipped = 0;
        for entry in entries {
            match owners.get(&entry.device_id) {
                Some(&owner) if !participants.contains(&owner) => {
                    skipped += 1;
                    warn!(device_id = %entry.device_id, owner = %owner, scope = %target, "Skipping key for non-participant device");
                }
                Some(&owner) => keys.push(ConversationKey::new(
                    &target,
                    owner,
                    entry.device_id,
                    entry.encrypted_key,
                )),
                None => {
                    skipped += 1;
                    warn!(device_id = %entry.device_id, scope = %target, "Skipping key for unknown device");
                }
            }
        }

        if !keys.is_empty() {
            self.ctx.key_repo().upsert_many(&keys).await?;
        }

        info!(scope = %target, saved = keys.len(), skipped, "Conversation keys saved");

        Ok(SaveKeysResponse {
            saved: keys.len(),
            skipped,
        })
    }

    /// Fetch the key stored for one of the caller's devices
    #[instrument(skip(self))]
    pub async fn get_key(
        &self,
        scope: &str,
        scope_id: &str,
        user_id: Snowflake,
        device_id: &str,
    ) -> ServiceResult<ConversationKeyResponse> {
        let target = ScopeAuthorizer::resolve(scope, scope_id)?;
        ScopeAuthorizer::new(self.ctx)
            .authorize(&target, user_id)
            .await?;

        // Another user's device is reported as unknown
        self.ctx
            .device_repo()
            .find(device_id)
            .await?
            .filter(|device| device.is_owned_by(user_id))
            .ok_or_else(|| DomainError::DeviceNotFound(device_id.to_string()))?;

        let key = self
            .ctx
            .key_repo()
            .find(target.scope(), &target.scope_id(), device_id)
            .await?
            .ok_or(DomainError::ConversationKeyNotFound)?;

        Ok(ConversationKeyResponse::from(key))
    }

    /// Devices of every participant, for encrypting one copy per device
    #[instrument(skip(self))]
    pub async fn list_scope_devices(
        &self,
        scope: &str,
        scope_id: &str,
        user_id: Snowflake,
    ) -> ServiceResult<ScopeDevicesResponse> {
        let target = ScopeAuthorizer::resolve(scope, scope_id)?;
        let authorizer = ScopeAuthorizer::new(self.ctx);
        authorizer.authorize(&target, user_id).await?;

        let participants = authorizer.participants(&target).await?;
        let devices = self.ctx.device_repo().find_by_users(&participants).await?;

        Ok(ScopeDevicesResponse {
            scope: target.scope().to_string(),
            scope_id: target.scope_id(),
            devices: devices.into_iter().map(DeviceResponse::from).collect(),
        })
    }
}

/// Keep one entry per device, the last one submitted, in first-seen order
fn collapse_duplicates(entries: Vec<KeyEntryRequest>) -> Vec<KeyEntryRequest> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(entries.len());
    let mut unique: Vec<KeyEntryRequest> = Vec::with_capacity(entries.len());

    for entry in entries {
        match positions.get(&entry.device_id) {
            Some(&index) => unique[index] = entry,
            None => {
                positions.insert(entry.device_id.clone(), unique.len());
                unique.push(entry);
            }
        }
    }

    unique
}
