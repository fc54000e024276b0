//! Request and response bodies for the HTTP adapter.
//!
//! Bodies use camelCase field names. Status and priority travel as strings
//! and accept both storage forms (`in_progress`) and display labels
//! (`In Progress`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ApiErrorResponse;
use crate::task::{
    domain::{
        AttachmentUpload, Priority, ProjectId, SortDirection, SortKey, TaskFilter, TaskId,
        TaskSort, TaskStatus, UserId,
    },
    services::{
        AddTaskAttachmentCommand, AddTaskCommentCommand, CreateProjectCommand, CreateTaskCommand,
        CreateUserCommand, GetTasksQuery, UpdateTaskCommand,
    },
};

/// Body of `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title.
    pub title: String,
    /// Task description.
    #[serde(default)]
    pub description: String,
    /// Owning project.
    pub project_id: ProjectId,
    /// Initial assignee.
    #[serde(default)]
    pub assignee_id: Option<UserId>,
    /// Due date.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Priority; medium when omitted.
    #[serde(default)]
    pub priority: Option<String>,
    /// Effort estimate in hours.
    #[serde(default)]
    pub estimated_hours: Option<f64>,
}

impl CreateTaskRequest {
    /// Converts the body into a command.
    ///
    /// # Errors
    ///
    /// Returns a 400 response when the priority is not recognised.
    pub fn into_command(self) -> Result<CreateTaskCommand, ApiErrorResponse> {
        let mut command = CreateTaskCommand::new(self.title, self.description, self.project_id);
        if let Some(assignee_id) = self.assignee_id {
            command = command.with_assignee(assignee_id);
        }
        if let Some(due_date) = self.due_date {
            command = command.with_due_date(due_date);
        }
        if let Some(priority) = self.priority {
            command = command.with_priority(Priority::try_from(priority.as_str())?);
        }
        if let Some(hours) = self.estimated_hours {
            command = command.with_estimated_hours(hours);
        }
        Ok(command)
    }
}

/// Body of `PUT /tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// Task identifier; must match the path.
    pub id: TaskId,
    /// New title.
    pub title: String,
    /// New description.
    #[serde(default)]
    pub description: String,
    /// New due date; omitted clears it.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// New assignee; omitted unassigns.
    #[serde(default)]
    pub assignee_id: Option<UserId>,
    /// New priority.
    pub priority: String,
    /// New estimate; omitted clears it.
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    /// New status.
    pub status: String,
}

impl UpdateTaskRequest {
    /// Converts the body into a command.
    ///
    /// # Errors
    ///
    /// Returns a 400 response when the status or priority is not recognised.
    pub fn into_command(self) -> Result<UpdateTaskCommand, ApiErrorResponse> {
        Ok(UpdateTaskCommand {
            id: self.id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            assignee_id: self.assignee_id,
            priority: Priority::try_from(self.priority.as_str())?,
            estimated_hours: self.estimated_hours,
            status: TaskStatus::try_from(self.status.as_str())?,
        })
    }
}

/// Body of `POST /tasks/{id}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    /// Comment author.
    pub author_id: UserId,
    /// Comment text.
    pub content: String,
}

impl AddCommentRequest {
    /// Converts the body into a command for `task_id`.
    #[must_use]
    pub fn into_command(self, task_id: TaskId) -> AddTaskCommentCommand {
        AddTaskCommentCommand {
            task_id,
            author_id: self.author_id,
            content: self.content,
        }
    }
}

/// Body of `POST /tasks/{id}/attachments`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAttachmentRequest {
    /// File name.
    pub file_name: String,
    /// MIME type.
    #[serde(default)]
    pub file_type: String,
    /// Size in bytes.
    pub file_size: u64,
    /// Uploading user.
    pub uploaded_by_id: UserId,
}

impl AddAttachmentRequest {
    /// Converts the body into a command for `task_id`.
    #[must_use]
    pub fn into_command(self, task_id: TaskId) -> AddTaskAttachmentCommand {
        AddTaskAttachmentCommand {
            task_id,
            upload: AttachmentUpload {
                file_name: self.file_name,
                mime_type: self.file_type,
                size_bytes: self.file_size,
                uploaded_by: self.uploaded_by_id,
            },
        }
    }
}

/// Body of `POST /projects`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Project name.
    pub name: String,
    /// Project description.
    #[serde(default)]
    pub description: String,
    /// Planned start date.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Planned end date.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Team roster.
    #[serde(default)]
    pub team_members: Vec<UserId>,
}

impl From<CreateProjectRequest> for CreateProjectCommand {
    fn from(body: CreateProjectRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            start_date: body.start_date,
            end_date: body.end_date,
            team_members: body.team_members,
        }
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
    /// Avatar reference.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl From<CreateUserRequest> for CreateUserCommand {
    fn from(body: CreateUserRequest) -> Self {
        Self {
            name: body.name,
            avatar_url: body.avatar_url,
        }
    }
}

/// Query string of `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    /// Text searched for in titles and descriptions.
    pub search: Option<String>,
    /// Project filter.
    pub project_id: Option<ProjectId>,
    /// Status filter.
    pub status: Option<String>,
    /// Priority filter.
    pub priority: Option<String>,
    /// Assignee filter.
    pub assignee_id: Option<UserId>,
    /// Sort key: `dueDate`, `priority` or `title`.
    pub sort_by: Option<String>,
    /// Sort direction: `asc` or `desc`.
    pub sort_direction: Option<String>,
    /// One-indexed page; the first page when omitted.
    pub page: Option<u32>,
}

impl TaskListParams {
    /// Converts the parameters into a list query.
    ///
    /// # Errors
    ///
    /// Returns a 400 response when a status, priority or sort parameter is
    /// not recognised.
    pub fn into_query(self) -> Result<GetTasksQuery, ApiErrorResponse> {
        let mut filter = TaskFilter::new();
        if let Some(search) = self.search {
            filter = filter.with_search(search);
        }
        if let Some(project_id) = self.project_id {
            filter = filter.with_project(project_id);
        }
        if let Some(status) = self.status.as_deref().filter(|value| !value.is_empty()) {
            filter = filter.with_status(TaskStatus::try_from(status)?);
        }
        if let Some(priority) = self.priority.as_deref().filter(|value| !value.is_empty()) {
            filter = filter.with_priority(Priority::try_from(priority)?);
        }
        if let Some(assignee_id) = self.assignee_id {
            filter = filter.with_assignee(assignee_id);
        }
        let key = self
            .sort_by
            .as_deref()
            .map(SortKey::try_from)
            .transpose()?
            .unwrap_or_default();
        let direction = self
            .sort_direction
            .as_deref()
            .map(SortDirection::try_from)
            .transpose()?
            .unwrap_or_default();
        Ok(GetTasksQuery {
            filter,
            sort: TaskSort::new(key, direction),
            page: self.page.unwrap_or(1),
        })
    }
}

/// Body returned when a resource is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdResponse<T> {
    /// Identifier of the new resource.
    pub id: T,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the server is serving.
    pub status: String,
}
