//! Service-level error taxonomy.

use crate::task::{
    domain::{ProjectId, TaskDomainError, TaskId},
    ports::{DirectoryError, TaskRepositoryError},
};
use thiserror::Error;

/// Errors returned by command and query handlers.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The addressed task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The addressed project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// A request addressed one task but carried another task's identifier.
    #[error("task identifier mismatch: addressed {addressed}, payload {payload}")]
    IdMismatch {
        /// Identifier the request was addressed to.
        addressed: TaskId,
        /// Identifier carried in the payload.
        payload: TaskId,
    },

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl TaskServiceError {
    /// Returns `true` when the error stems from caller input rather than the
    /// state of the system.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::IdMismatch { .. })
    }

    /// Returns `true` when the addressed entity does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound(_)
                | Self::ProjectNotFound(_)
                | Self::Repository(TaskRepositoryError::NotFound(_))
                | Self::Directory(DirectoryError::ProjectNotFound(_))
        )
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
