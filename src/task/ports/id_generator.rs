//! Identifier generation port.

use crate::task::domain::{AttachmentId, CommentId, ProjectId, TaskId, UserId};

/// Source of fresh entity identifiers.
///
/// Injected into services so tests can predict the identifiers they create.
pub trait TaskIdGenerator: Send + Sync {
    /// Returns an unused task identifier.
    fn new_task_id(&self) -> TaskId;

    /// Returns an unused comment identifier.
    fn new_comment_id(&self) -> CommentId;

    /// Returns an unused attachment identifier.
    fn new_attachment_id(&self) -> AttachmentId;

    /// Returns an unused project identifier.
    fn new_project_id(&self) -> ProjectId;

    /// Returns an unused user identifier.
    fn new_user_id(&self) -> UserId;
}

/// Generator producing random version 4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl TaskIdGenerator for RandomIdGenerator {
    fn new_task_id(&self) -> TaskId {
        TaskId::new()
    }

    fn new_comment_id(&self) -> CommentId {
        CommentId::new()
    }

    fn new_attachment_id(&self) -> AttachmentId {
        AttachmentId::new()
    }

    fn new_project_id(&self) -> ProjectId {
        ProjectId::new()
    }

    fn new_user_id(&self) -> UserId {
        UserId::new()
    }
}
