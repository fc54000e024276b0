//! Port contracts for task tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod directory;
pub mod id_generator;
pub mod repository;

pub use directory::{DirectoryError, DirectoryRepository, DirectoryResult};
pub use id_generator::{RandomIdGenerator, TaskIdGenerator};
pub use repository::{TaskQueryResult, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
