//! In-memory project and user directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Project, ProjectId, User, UserId},
    ports::{DirectoryError, DirectoryRepository, DirectoryResult},
};

/// Thread-safe in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    projects: HashMap<ProjectId, Project>,
    users: HashMap<UserId, User>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> DirectoryError {
    DirectoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectory {
    async fn store_project(&self, project: &Project) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.projects.contains_key(&project.id()) {
            return Err(DirectoryError::DuplicateProject(project.id()));
        }
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .projects
            .get_mut(&project.id())
            .ok_or(DirectoryError::ProjectNotFound(project.id()))?;
        *stored = project.clone();
        Ok(())
    }

    async fn find_project(&self, id: ProjectId) -> DirectoryResult<Option<Project>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn store_user(&self, user: &User) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.users.contains_key(&user.id()) {
            return Err(DirectoryError::DuplicateUser(user.id()));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_user(&self, id: UserId) -> DirectoryResult<Option<User>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.users.get(&id).cloned())
    }
}
