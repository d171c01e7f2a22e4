//! Service context - dependency container for services
//!
//! Holds the repositories, the database pool and the typing store.

use std::sync::Arc;

use huddle_core::{ConversationKeyRepository, DeviceRepository, MembershipRepository};
use huddle_db::{PgConversationKeyRepository, PgDeviceRepository, PgMembershipRepository, PgPool};

use crate::typing::TypingStore;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    device_repo: Arc<dyn DeviceRepository>,
    key_repo: Arc<dyn ConversationKeyRepository>,
    membership_repo: Arc<dyn MembershipRepository>,

    // In-memory state
    typing_store: Arc<TypingStore>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        device_repo: Arc<dyn DeviceRepository>,
        key_repo: Arc<dyn ConversationKeyRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        typing_store: Arc<TypingStore>,
    ) -> Self {
        Self {
            pool,
            device_repo,
            key_repo,
            membership_repo,
            typing_store,
        }
    }

    /// Wire the PostgreSQL repositories over one pool
    pub fn postgres(pool: PgPool, typing_store: Arc<TypingStore>) -> Self {
        Self::new(
            pool.clone(),
            Arc::new(PgDeviceRepository::new(pool.clone())),
            Arc::new(PgConversationKeyRepository::new(pool.clone())),
            Arc::new(PgMembershipRepository::new(pool)),
            typing_store,
        )
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    /// Get the device repository
    pub fn device_repo(&self) -> &dyn DeviceRepository {
        self.device_repo.as_ref()
    }

    /// Get the conversation key repository
    pub fn key_repo(&self) -> &dyn ConversationKeyRepository {
        self.key_repo.as_ref()
    }

    /// Get the membership repository
    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    // === In-memory state ===

    /// Get the typing store
    pub fn typing_store(&self) -> &TypingStore {
        self.typing_store.as_ref()
    }

    /// Get a shared handle to the typing store (for the sweeper)
    pub fn typing_store_handle(&self) -> Arc<TypingStore> {
        Arc::clone(&self.typing_store)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("typing", &self.typing_store.stats())
            .finish()
    }
}
