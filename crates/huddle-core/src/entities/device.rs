//! Device entity - one entry of the device directory

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A user's device and the public key other clients encrypt conversation keys to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub device_id: String,
    pub user_id: Snowflake,
    pub public_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Device {
    /// Create a new device owned by `user_id`
    pub fn new(device_id: impl Into<String>, user_id: Snowflake, public_key: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            device_id: device_id.into(),
            user_id,
            public_key: public_key.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the device belongs to the given user
    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    /// Rotate the device's public key
    pub fn set_public_key(&mut self, public_key: String) {
        self.public_key = public_key;
        self.updated_at = Utc::now();
    }
}
