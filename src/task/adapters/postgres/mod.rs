//! `PostgreSQL` adapters for task persistence.

mod blocking;
mod directory;
mod models;
mod repository;
mod schema;
mod schema_setup;

pub use blocking::TaskPgPool;
pub use directory::PostgresDirectory;
pub use repository::PostgresTaskRepository;
pub use schema_setup::{CREATE_TABLES_SQL, SchemaSetupError, ensure_schema};
