//! Shared fixtures for service unit tests

use std::sync::Arc;
use std::time::Duration;

use huddle_db::{create_lazy_pool, PoolConfig};

use crate::memory::{
    MemoryConversationKeyRepository, MemoryDeviceRepository, MemoryMembershipRepository,
};
use crate::typing::TypingStore;

use super::context::ServiceContext;

/// A service context over in-memory repositories
///
/// Must be created inside a tokio runtime.
pub struct TestContext {
    pub ctx: ServiceContext,
    pub devices: Arc<MemoryDeviceRepository>,
    pub keys: Arc<MemoryConversationKeyRepository>,
    pub memberships: Arc<MemoryMembershipRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        let devices = Arc::new(MemoryDeviceRepository::new());
        let keys = Arc::new(MemoryConversationKeyRepository::new());
        let memberships = Arc::new(MemoryMembershipRepository::new());

        let pool = create_lazy_pool(&PoolConfig::new("postgres://huddle@127.0.0.1:1/unused"))
            .expect("lazy pool");

        let ctx = ServiceContext::new(
            pool,
            devices.clone(),
            keys.clone(),
            memberships.clone(),
            Arc::new(TypingStore::new(Duration::from_secs(5))),
        );

        Self {
            ctx,
            devices,
            keys,
            memberships,
        }
    }
}
