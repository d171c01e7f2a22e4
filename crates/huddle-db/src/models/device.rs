//! Device database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for devices table
#[derive(Debug, Clone, FromRow)]
pub struct DeviceModel {
    pub device_id: String,
    pub user_id: i64,
    pub public_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projection used when resolving device owners
#[derive(Debug, Clone, FromRow)]
pub struct DeviceOwnerModel {
    pub device_id: String,
    pub user_id: i64,
}
