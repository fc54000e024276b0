//! Repository port for the projects and users that tasks reference.

use crate::task::domain::{Project, ProjectId, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Project and user lookup contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateProject`] when the ID already exists.
    async fn store_project(&self, project: &Project) -> DirectoryResult<()>;

    /// Persists changes to an existing project, including cached task counts.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::ProjectNotFound`] when the project does not
    /// exist.
    async fn update_project(&self, project: &Project) -> DirectoryResult<()>;

    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> DirectoryResult<Option<Project>>;

    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateUser`] when the ID already exists.
    async fn store_user(&self, user: &User) -> DirectoryResult<()>;

    /// Finds a user by identifier.
    async fn find_user(&self, id: UserId) -> DirectoryResult<Option<User>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
