//! Shared world state for task lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::fixture;
use taskhub::task::{
    adapters::memory::{InMemoryDirectory, InMemoryTaskRepository, ManualClock},
    domain::{ProjectId, TaskId},
    services::{TaskCommandService, TaskQueryService, TaskServiceError},
};

/// Command service type used by the BDD world.
pub type TestCommands =
    TaskCommandService<InMemoryTaskRepository, InMemoryDirectory, ManualClock>;

/// Query service type used by the BDD world.
pub type TestQueries = TaskQueryService<InMemoryTaskRepository, InMemoryDirectory>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub commands: TestCommands,
    pub queries: TestQueries,
    pub directory: Arc<InMemoryDirectory>,
    pub clock: ManualClock,
    pub project_id: Option<ProjectId>,
    pub tasks: HashMap<String, TaskId>,
    pub last_error: Option<TaskServiceError>,
}

impl TaskLifecycleWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 4, 1, 12, 0, 0)
            .single()
            .unwrap_or_default();
        let clock = ManualClock::new(start);
        let repository = Arc::new(InMemoryTaskRepository::new());
        let directory = Arc::new(InMemoryDirectory::new());
        Self {
            commands: TaskCommandService::new(
                Arc::clone(&repository),
                Arc::clone(&directory),
                Arc::new(clock.clone()),
            ),
            queries: TaskQueryService::new(repository, Arc::clone(&directory)),
            directory,
            clock,
            project_id: None,
            tasks: HashMap::new(),
            last_error: None,
        }
    }

    /// Returns the project created by a Given step.
    ///
    /// # Errors
    ///
    /// Returns an error when no project step ran.
    pub fn project_id(&self) -> Result<ProjectId, eyre::Report> {
        self.project_id
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the identifier of the task created with `title`.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with that title was created.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} in scenario world"))
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
