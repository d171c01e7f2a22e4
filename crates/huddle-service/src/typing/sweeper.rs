//! Background eviction of stale typing entries

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::TypingStore;

/// Sweep `store` every `interval` until the returned handle is aborted
pub fn spawn_sweeper(store: Arc<TypingStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let evicted = store.sweep();
            if evicted > 0 {
                let stats = store.stats();
                debug!(
                    evicted,
                    channels = stats.channels,
                    entries = stats.entries,
                    "Swept stale typing entries"
                );
            }
        }
    })
}
