//! PostgreSQL implementation of ConversationKeyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::{
    ConversationKey, ConversationKeyRepository, ConversationScope, RepoResult,
};

use crate::mappers::ConversationKeyInsert;
use crate::models::ConversationKeyModel;

use super::error::{device_not_found, map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of ConversationKeyRepository
#[derive(Clone)]
pub struct PgConversationKeyRepository {
    pool: PgPool,
}

impl PgConversationKeyRepository {
    /// Create a new PgConversationKeyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationKeyRepository for PgConversationKeyRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        scope: ConversationScope,
        scope_id: &str,
        device_id: &str,
    ) -> RepoResult<Option<ConversationKey>> {
        let result = sqlx::query_as::<_, ConversationKeyModel>(
            r#"
            SELECT scope, scope_id, user_id, device_id, encrypted_key, updated_at
            FROM conversation_keys
            WHERE scope = $1 AND scope_id = $2 AND device_id = $3
            "#,
        )
        .bind(scope.as_str())
        .bind(scope_id)
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ConversationKey::try_from).transpose()
    }

    #[instrument(skip(self, keys), fields(count = keys.len()))]
    async fn upsert_many(&self, keys: &[ConversationKey]) -> RepoResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }

        // All rows land or none do
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let mut written = 0;

        for key in keys {
            let insert = ConversationKeyInsert::new(key);

            let result = sqlx::query(
                r#"
                INSERT INTO conversation_keys
                    (scope, scope_id, user_id, device_id, encrypted_key, updated_at)
                VALUES ($1, $2, $3, $4, $5, NOW())
                ON CONFLICT (scope, scope_id, device_id) DO UPDATE
                SET encrypted_key = EXCLUDED.encrypted_key,
                    user_id = EXCLUDED.user_id,
                    updated_at = NOW()
                "#,
            )
            .bind(insert.scope)
            .bind(insert.scope_id)
            .bind(insert.user_id)
            .bind(insert.device_id)
            .bind(insert.encrypted_key)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_foreign_key_violation(e, || device_not_found(insert.device_id)))?;

            written += result.rows_affected();
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(written)
    }

    #[instrument(skip(self))]
    async fn delete_by_device(&self, device_id: &str) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM conversation_keys WHERE device_id = $1
            "#,
        )
        .bind(device_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
