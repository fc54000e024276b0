//! Predictable identifier generator.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::task::{
    domain::{AttachmentId, CommentId, ProjectId, TaskId, UserId},
    ports::TaskIdGenerator,
};

/// Generator handing out UUIDs built from an incrementing counter, starting
/// at 1 and shared by every identifier kind.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first identifier is built from 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Returns the UUID the `n`th generated identifier wraps.
    #[must_use]
    pub fn uuid_for(n: u64) -> Uuid {
        Uuid::from_u128(u128::from(n))
    }

    fn next_uuid(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        Self::uuid_for(n)
    }
}

impl TaskIdGenerator for SequentialIdGenerator {
    fn new_task_id(&self) -> TaskId {
        TaskId::from_uuid(self.next_uuid())
    }

    fn new_comment_id(&self) -> CommentId {
        CommentId::from_uuid(self.next_uuid())
    }

    fn new_attachment_id(&self) -> AttachmentId {
        AttachmentId::from_uuid(self.next_uuid())
    }

    fn new_project_id(&self) -> ProjectId {
        ProjectId::from_uuid(self.next_uuid())
    }

    fn new_user_id(&self) -> UserId {
        UserId::from_uuid(self.next_uuid())
    }
}
