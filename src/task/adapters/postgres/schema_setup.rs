//! Schema bootstrap for the task tables.

use super::blocking::TaskPgPool;
use diesel::connection::SimpleConnection;
use thiserror::Error;

/// SQL creating every table the `PostgreSQL` adapters use. Idempotent.
pub const CREATE_TABLES_SQL: &str =
    include_str!("../../../../migrations/2026-01-05-000000_create_task_tables/up.sql");

/// Error raised while preparing the database schema.
#[derive(Debug, Error)]
pub enum SchemaSetupError {
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// The schema statements failed.
    #[error("schema setup failed: {0}")]
    Query(#[from] diesel::result::Error),
    /// The blocking task panicked or was cancelled.
    #[error("schema setup task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Creates the task, project, and user tables when they do not exist yet.
///
/// # Errors
///
/// Returns [`SchemaSetupError`] when no connection is available or a
/// statement fails.
pub async fn ensure_schema(pool: &TaskPgPool) -> Result<(), SchemaSetupError> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get()?;
        connection.batch_execute(CREATE_TABLES_SQL)?;
        Ok(())
    })
    .await?
}
