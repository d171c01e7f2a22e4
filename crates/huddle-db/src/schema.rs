//! Schema bootstrap
//!
//! Every statement is idempotent, so running this on each start is safe.

use sqlx::PgPool;
use tracing::info;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS devices (
    device_id   VARCHAR(128) PRIMARY KEY,
    user_id     BIGINT NOT NULL,
    public_key  TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_devices_user ON devices(user_id);

CREATE TABLE IF NOT EXISTS conversation_keys (
    scope          VARCHAR(16) NOT NULL,
    scope_id       VARCHAR(64) NOT NULL,
    user_id        BIGINT NOT NULL,
    device_id      VARCHAR(128) NOT NULL REFERENCES devices(device_id) ON DELETE CASCADE,
    encrypted_key  TEXT NOT NULL,
    updated_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (scope, scope_id, device_id)
);

CREATE INDEX IF NOT EXISTS idx_conversation_keys_device ON conversation_keys(device_id);

CREATE TABLE IF NOT EXISTS channel_members (
    channel_id  BIGINT NOT NULL,
    user_id     BIGINT NOT NULL,
    joined_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (channel_id, user_id)
);

CREATE TABLE IF NOT EXISTS group_members (
    group_id   BIGINT NOT NULL,
    user_id    BIGINT NOT NULL,
    joined_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (group_id, user_id)
);
"#;

/// Create missing tables and indexes
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;

    info!("Database schema is up to date");
    Ok(())
}
