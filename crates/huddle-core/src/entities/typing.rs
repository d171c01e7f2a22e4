//! Typing entry - one user currently typing in one channel

use serde::Serialize;

use crate::value_objects::Snowflake;

/// Ephemeral typing indicator entry
///
/// Lives only in process memory. `timestamp_millis` is the Unix time of the
/// most recent typing signal from this user in this channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypingEntry {
    #[serde(skip)]
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub user_name: String,
    #[serde(rename = "timestamp")]
    pub timestamp_millis: i64,
}

impl TypingEntry {
    /// Create a new entry stamped at `timestamp_millis`
    pub fn new(
        channel_id: Snowflake,
        user_id: Snowflake,
        user_name: impl Into<String>,
        timestamp_millis: i64,
    ) -> Self {
        Self {
            channel_id,
            user_id,
            user_name: user_name.into(),
            timestamp_millis,
        }
    }

    /// Age of the entry in milliseconds at `now_millis` (never negative)
    #[inline]
    pub fn age_millis(&self, now_millis: i64) -> i64 {
        (now_millis - self.timestamp_millis).max(0)
    }

    /// Whether the entry is still visible under the given TTL
    #[inline]
    pub fn is_fresh(&self, now_millis: i64, ttl_millis: i64) -> bool {
        self.age_millis(now_millis) < ttl_millis
    }
}
