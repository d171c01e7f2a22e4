//! PostgreSQL implementation of DeviceRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::{Device, DeviceRepository, DomainError, RepoResult, Snowflake};

use crate::mappers::DeviceInsert;
use crate::models::{DeviceModel, DeviceOwnerModel};

use super::error::{device_not_found, map_db_error};

/// PostgreSQL implementation of DeviceRepository
#[derive(Clone)]
pub struct PgDeviceRepository {
    pool: PgPool,
}

impl PgDeviceRepository {
    /// Create a new PgDeviceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceRepository for PgDeviceRepository {
    #[instrument(skip(self))]
    async fn find(&self, device_id: &str) -> RepoResult<Option<Device>> {
        let result = sqlx::query_as::<_, DeviceModel>(
            r#"
            SELECT device_id, user_id, public_key, created_at, updated_at
            FROM devices
            WHERE device_id = $1
            "#,
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Device::from))
    }

    #[instrument(skip(self, device_ids), fields(count = device_ids.len()))]
    async fn find_owners(&self, device_ids: &[String]) -> RepoResult<HashMap<String, Snowflake>> {
        if device_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, DeviceOwnerModel>(
            r#"
            SELECT device_id, user_id
            FROM devices
            WHERE device_id = ANY($1)
            "#,
        )
        .bind(device_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.device_id, Snowflake::new(row.user_id)))
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Device>> {
        let results = sqlx::query_as::<_, DeviceModel>(
            r#"
            SELECT device_id, user_id, public_key, created_at, updated_at
            FROM devices
            WHERE user_id = $1
            ORDER BY created_at, device_id
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Device::from).collect())
    }

    #[instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    async fn find_by_users(&self, user_ids: &[Snowflake]) -> RepoResult<Vec<Device>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = user_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, DeviceModel>(
            r#"
            SELECT device_id, user_id, public_key, created_at, updated_at
            FROM devices
            WHERE user_id = ANY($1)
            ORDER BY user_id, created_at, device_id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Device::from).collect())
    }

    #[instrument(skip(self, device), fields(device_id = %device.device_id))]
    async fn upsert(&self, device: &Device) -> RepoResult<()> {
        let insert = DeviceInsert::new(device);

        // The WHERE clause makes the update a no-op for a foreign owner
        let result = sqlx::query(
            r#"
            INSERT INTO devices (device_id, user_id, public_key, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            ON CONFLICT (device_id) DO UPDATE
            SET public_key = EXCLUDED.public_key, updated_at = NOW()
            WHERE devices.user_id = EXCLUDED.user_id
            "#,
        )
        .bind(insert.device_id)
        .bind(insert.user_id)
        .bind(insert.public_key)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::DeviceOwnedByOtherUser(device.device_id.clone()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: Snowflake, device_id: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM devices WHERE device_id = $1 AND user_id = $2
            "#,
        )
        .bind(device_id)
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(device_not_found(device_id));
        }

        Ok(())
    }
}
