//! Read models returned by query handlers.

use crate::task::domain::{
    Attachment, AttachmentId, Comment, CommentId, Priority, Project, ProjectId, Task, TaskId,
    TaskStatus, User, UserId,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Compact user reference for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Avatar reference, if any.
    pub avatar_url: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_owned(),
            avatar_url: user.avatar_url().map(str::to_owned),
        }
    }
}

/// Task row as shown in lists, with project and assignee names resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: Priority,
    /// Due date, if scheduled.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion timestamp; present only for completed tasks.
    pub completed_date: Option<DateTime<Utc>>,
    /// Effort estimate in hours.
    pub estimated_hours: Option<f64>,
    /// Owning project.
    pub project_id: ProjectId,
    /// Owning project's name; absent when the project is unknown.
    pub project_name: Option<String>,
    /// Assigned user; absent when unassigned or the user is unknown.
    pub assignee_id: Option<UserId>,
    /// Assigned user's display details.
    pub assignee: Option<UserSummary>,
}

impl TaskSummary {
    /// Projects a task, attaching already-resolved names.
    #[must_use]
    pub fn new(task: &Task, project_name: Option<String>, assignee: Option<UserSummary>) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
            priority: task.priority(),
            due_date: task.due_date(),
            completed_date: task.completed_date(),
            estimated_hours: task.estimated_hours().map(|hours| hours.value()),
            project_id: task.project_id(),
            project_name,
            assignee_id: task.assignee_id(),
            assignee,
        }
    }
}

/// Comment with its author's name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Comment identifier.
    pub id: CommentId,
    /// Comment body.
    pub content: String,
    /// When the comment was written.
    pub created_at: DateTime<Utc>,
    /// Author reference.
    pub author_id: UserId,
    /// Author's display details, when known.
    pub author: Option<UserSummary>,
}

impl CommentView {
    /// Projects a comment, attaching the resolved author.
    #[must_use]
    pub fn new(comment: &Comment, author: Option<UserSummary>) -> Self {
        Self {
            id: comment.id(),
            content: comment.content().to_owned(),
            created_at: comment.created_at(),
            author_id: comment.author_id(),
            author,
        }
    }
}

/// Attachment metadata with the uploader's name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentView {
    /// Attachment identifier.
    pub id: AttachmentId,
    /// File name.
    pub file_name: String,
    /// MIME type.
    pub file_type: String,
    /// File size in bytes.
    pub file_size: u64,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Uploader reference.
    pub uploaded_by_id: UserId,
    /// Uploader's display details, when known.
    pub uploaded_by: Option<UserSummary>,
}

impl AttachmentView {
    /// Projects an attachment, attaching the resolved uploader.
    #[must_use]
    pub fn new(attachment: &Attachment, uploaded_by: Option<UserSummary>) -> Self {
        Self {
            id: attachment.id(),
            file_name: attachment.file_name().to_owned(),
            file_type: attachment.mime_type().to_owned(),
            file_size: attachment.size_bytes(),
            uploaded_at: attachment.uploaded_at(),
            uploaded_by_id: attachment.uploaded_by(),
            uploaded_by,
        }
    }
}

/// Full task view returned by the single-task query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetails {
    /// Task fields shared with list rows.
    #[serde(flatten)]
    pub task: TaskSummary,
    /// Comments in the order they were added.
    pub comments: Vec<CommentView>,
    /// Attachments in the order they were added.
    pub attachments: Vec<AttachmentView>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// One page of a task list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    /// Tasks on this page, in query order.
    pub items: Vec<TaskSummary>,
    /// Number of matching tasks across all pages.
    pub total_count: u64,
    /// Number of pages the matches fill.
    pub total_pages: u64,
    /// One-indexed number of this page.
    pub page: u32,
    /// Maximum number of items per page.
    pub page_size: u32,
}

/// Project with its derived progress and resolved team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Completion percentage in `0..=100`.
    pub progress: u8,
    /// Planned start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Planned end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Known team members.
    pub team_members: Vec<UserSummary>,
    /// Number of tasks in the project.
    pub task_count: u64,
    /// Number of completed tasks in the project.
    pub completed_task_count: u64,
}

impl ProjectOverview {
    /// Projects a project, attaching the resolved team.
    #[must_use]
    pub fn new(project: &Project, team_members: Vec<UserSummary>) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_owned(),
            description: project.description().to_owned(),
            progress: project.progress(),
            start_date: project.start_date(),
            end_date: project.end_date(),
            team_members,
            task_count: project.task_count(),
            completed_task_count: project.completed_task_count(),
        }
    }
}
