//! Blocking operation helpers shared by the `PostgreSQL` adapters.
//!
//! Diesel is synchronous, so every call is moved onto Tokio's blocking pool
//! to keep the async executor's worker threads free.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type for internal use.
type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Checks out a connection, runs `f` on the blocking pool, and maps pool and
/// join failures through `map_err`.
pub(super) async fn with_connection<F, T, E, M>(
    pool: &TaskPgPool,
    f: F,
    map_err: M,
) -> Result<T, E>
where
    F: FnOnce(&mut PooledConn) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: Fn(BlockingFailure) -> E + Send + Copy + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(|err| map_err(BlockingFailure::Pool(err)))?;
        f(&mut connection)
    })
    .await
    .map_err(|err| map_err(BlockingFailure::Join(err)))?
}

/// Infrastructure failure raised before or around a database call.
#[derive(Debug, thiserror::Error)]
pub enum BlockingFailure {
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// The blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
