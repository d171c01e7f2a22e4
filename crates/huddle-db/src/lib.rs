//! # huddle-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations for devices, conversation keys and memberships
//!
//! ## Usage
//!
//! ```rust,ignore
//! use huddle_db::{create_pool, run_migrations, PgDeviceRepository};
//!
//! async fn example(config: &huddle_common::DatabaseConfig) -> Result<(), sqlx::Error> {
//!     let pool = create_pool(&config.into()).await?;
//!     run_migrations(&pool).await?;
//!     let devices = PgDeviceRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_lazy_pool, create_pool, PgPool, PoolConfig};
pub use repositories::{PgConversationKeyRepository, PgDeviceRepository, PgMembershipRepository};
pub use schema::run_migrations;
