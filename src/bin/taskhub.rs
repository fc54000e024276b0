//! Serves the task API over HTTP.
//!
//! Configuration comes from the environment (see [`taskhub::config`]) and an
//! optional `.env` file. `RUST_LOG` controls log verbosity.

use std::sync::Arc;

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use taskhub::config::{AppConfig, ConfigError, StorageMode};
use taskhub::task::adapters::http::{AppState, router};
use taskhub::task::adapters::memory::{InMemoryDirectory, InMemoryTaskRepository};
use taskhub::task::adapters::postgres::{
    PostgresDirectory, PostgresTaskRepository, TaskPgPool, ensure_schema,
};
use taskhub::task::ports::{DirectoryRepository, TaskRepository};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type Ports = (Arc<dyn TaskRepository>, Arc<dyn DirectoryRepository>);

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        storage_mode = ?config.storage_mode,
        page_size = config.page_size,
        "configuration loaded"
    );

    let (repository, directory) = open_storage(&config).await?;
    let state = AppState::new(
        repository,
        directory,
        Arc::new(DefaultClock),
        config.page_size,
    );

    let listener = TcpListener::bind(config.socket_addr()).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

async fn open_storage(config: &AppConfig) -> Result<Ports, BoxError> {
    match (config.storage_mode, config.database_url.clone()) {
        (StorageMode::Postgres, Some(url)) => {
            let pool_size = config.pool_size;
            let pool: TaskPgPool = tokio::task::spawn_blocking(move || {
                Pool::builder()
                    .max_size(pool_size)
                    .build(ConnectionManager::<PgConnection>::new(url))
            })
            .await??;
            ensure_schema(&pool).await?;
            tracing::info!(pool_size, "connected to postgres");
            Ok((
                Arc::new(PostgresTaskRepository::new(pool.clone())),
                Arc::new(PostgresDirectory::new(pool)),
            ))
        }
        (StorageMode::Postgres, None) => Err(ConfigError::MissingDatabaseUrl.into()),
        (StorageMode::InMemory, _) => {
            tracing::info!("using in-memory storage");
            Ok((
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(InMemoryDirectory::new()),
            ))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
