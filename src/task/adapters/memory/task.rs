//! In-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskQuery},
    ports::{TaskQueryResult, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Tasks are kept in insertion order so that equal sort keys come back in
/// the order the tasks were created.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is poisoned.
    pub fn len(&self) -> TaskRepositoryResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.len())
    }

    /// Returns `true` when no tasks are stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is poisoned.
    pub fn is_empty(&self) -> TaskRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insertion_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn query(&self, query: &TaskQuery) -> TaskRepositoryResult<TaskQueryResult> {
        let state = self.state.read().map_err(poisoned)?;
        let ordered = state
            .insertion_order
            .iter()
            .filter_map(|id| state.tasks.get(id).cloned());
        let (tasks, total) = query.apply(ordered);
        Ok(TaskQueryResult { tasks, total })
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        state.insertion_order.retain(|stored_id| *stored_id != id);
        Ok(())
    }
}
