//! Builders shared by task unit tests.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::task::{
    adapters::memory::ManualClock,
    domain::{ProjectId, Task, TaskId},
};

/// Fixed instant the test clocks start at.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Clock frozen at [`start_time`].
pub fn clock() -> ManualClock {
    ManualClock::new(start_time())
}

/// Identifier wrapping the integer `n`.
pub fn task_id(n: u128) -> TaskId {
    TaskId::from_uuid(Uuid::from_u128(n))
}

/// Task with a predictable identifier in `project_id`.
pub fn task(n: u128, title: &str, project_id: ProjectId, clock: &ManualClock) -> Task {
    Task::new(task_id(n), title, "", project_id, clock)
        .unwrap_or_else(|err| panic!("fixture title {title:?} rejected: {err}"))
}
