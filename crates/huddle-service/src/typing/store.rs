//! Concurrent typing store keyed by channel

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;

use huddle_core::{Snowflake, TypingEntry};

/// Current Unix time in milliseconds
#[inline]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Snapshot of store occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypingStats {
    pub channels: usize,
    pub entries: usize,
}

/// Who is typing where
///
/// One bucket per channel, one entry per user in a bucket. A bucket never
/// outlives its last entry.
#[derive(Debug)]
pub struct TypingStore {
    channels: DashMap<Snowflake, HashMap<Snowflake, TypingEntry>>,
    ttl_millis: i64,
}

impl TypingStore {
    /// Create an empty store whose entries expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            channels: DashMap::new(),
            ttl_millis: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
        }
    }

    /// Entry lifetime
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_millis.unsigned_abs())
    }

    /// Record that `user_id` is typing in `channel_id` right now
    pub fn record(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        user_name: impl Into<String>,
    ) -> TypingEntry {
        self.record_at(channel_id, user_id, user_name, now_millis())
    }

    /// Record a typing signal stamped at `now_millis`
    ///
    /// Replaces any previous entry of the same user in the channel.
    pub fn record_at(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        user_name: impl Into<String>,
        now_millis: i64,
    ) -> TypingEntry {
        let entry = TypingEntry::new(channel_id, user_id, user_name, now_millis);
        self.channels
            .entry(channel_id)
            .or_default()
            .insert(user_id, entry.clone());
        entry
    }

    /// Fresh entries of a channel, oldest first
    pub fn list(&self, channel_id: Snowflake) -> Vec<TypingEntry> {
        self.list_at(channel_id, now_millis())
    }

    /// Entries of a channel that are still fresh at `now_millis`
    pub fn list_at(&self, channel_id: Snowflake, now_millis: i64) -> Vec<TypingEntry> {
        let Some(bucket) = self.channels.get(&channel_id) else {
            return Vec::new();
        };

        let mut entries: Vec<TypingEntry> = bucket
            .values()
            .filter(|entry| entry.is_fresh(now_millis, self.ttl_millis))
            .cloned()
            .collect();
        drop(bucket);

        entries.sort_by_key(|entry| (entry.timestamp_millis, entry.user_id));
        entries
    }

    /// Remove one user's entry; returns whether one existed
    pub fn stop(&self, channel_id: Snowflake, user_id: Snowflake) -> bool {
        let removed = match self.channels.get_mut(&channel_id) {
            Some(mut bucket) => bucket.remove(&user_id).is_some(),
            None => false,
        };

        // The shard guard above must be released before this call
        self.channels.remove_if(&channel_id, |_, bucket| bucket.is_empty());
        removed
    }

    /// Evict expired entries now; returns how many were removed
    pub fn sweep(&self) -> usize {
        self.sweep_at(now_millis())
    }

    /// Evict entries older than the TTL at `now_millis` and drop empty buckets
    pub fn sweep_at(&self, now_millis: i64) -> usize {
        let mut evicted = 0;

        self.channels.retain(|_, bucket| {
            let before = bucket.len();
            bucket.retain(|_, entry| entry.age_millis(now_millis) <= self.ttl_millis);
            evicted += before - bucket.len();
            !bucket.is_empty()
        });

        evicted
    }

    /// Count buckets and entries
    pub fn stats(&self) -> TypingStats {
        let mut stats = TypingStats {
            channels: 0,
            entries: 0,
        };
        for bucket in &self.channels {
            stats.channels += 1;
            stats.entries += bucket.len();
        }
        stats
    }
}
