//! Database module
//!
//! This module handles database connections, migrations, repositories and
//! the submission store built on top of them.

pub mod connection;
pub mod repositories;
pub mod store;

use sqlx::PgPool;

pub use connection::*;
pub use store::{MemoryStore, PgSubmissionStore, SubmissionStore};

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
