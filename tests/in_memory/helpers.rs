//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;
use taskhub::task::{
    adapters::memory::{
        InMemoryDirectory, InMemoryTaskRepository, ManualClock, SequentialIdGenerator,
    },
    services::{TaskCommandService, TaskQueryService},
};

/// Command service over in-memory ports with a manual clock.
pub type Commands = TaskCommandService<InMemoryTaskRepository, InMemoryDirectory, ManualClock>;

/// Query service over in-memory ports.
pub type Queries = TaskQueryService<InMemoryTaskRepository, InMemoryDirectory>;

/// Wired services sharing one repository, directory and clock.
pub struct Services {
    pub commands: Commands,
    pub queries: Queries,
    pub directory: Arc<InMemoryDirectory>,
    pub clock: ManualClock,
}

/// Instant the fixture clock starts at.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 2, 8, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Provides a clock frozen at [`epoch`].
#[fixture]
pub fn clock() -> ManualClock {
    ManualClock::new(epoch())
}

/// Provides services with sequential identifiers and a manual clock.
#[fixture]
pub fn services(clock: ManualClock) -> Services {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let directory = Arc::new(InMemoryDirectory::new());
    let commands = TaskCommandService::new(
        Arc::clone(&repository),
        Arc::clone(&directory),
        Arc::new(clock.clone()),
    )
    .with_id_generator(Arc::new(SequentialIdGenerator::new()));
    let queries = TaskQueryService::new(Arc::clone(&repository), Arc::clone(&directory));
    Services {
        commands,
        queries,
        directory,
        clock,
    }
}
