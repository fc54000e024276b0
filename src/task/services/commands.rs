//! Command handlers: every state change to tasks goes through here.

use crate::task::{
    domain::{
        Attachment, AttachmentId, AttachmentUpload, Comment, CommentId, Priority, Project,
        ProjectId, Task, TaskId, TaskStatus, User, UserId,
    },
    ports::{DirectoryRepository, RandomIdGenerator, TaskIdGenerator, TaskRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

use super::{TaskServiceError, TaskServiceResult, queries::project_task_counts};

/// Request to create a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskCommand {
    title: String,
    description: String,
    project_id: ProjectId,
    assignee_id: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
    priority: Priority,
    estimated_hours: Option<f64>,
}

impl CreateTaskCommand {
    /// Creates a request with the required task fields. Priority defaults to
    /// [`Priority::Medium`].
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        project_id: ProjectId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            project_id,
            assignee_id: None,
            due_date: None,
            priority: Priority::Medium,
            estimated_hours: None,
        }
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the effort estimate.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }
}

/// Request to overwrite the editable fields of a task.
///
/// Optional fields set to `None` clear the corresponding task field.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTaskCommand {
    /// Task to update.
    pub id: TaskId,
    /// New title.
    pub title: String,
    /// New description.
    pub description: String,
    /// New due date, or `None` to unschedule.
    pub due_date: Option<DateTime<Utc>>,
    /// New assignee, or `None` to unassign.
    pub assignee_id: Option<UserId>,
    /// New priority.
    pub priority: Priority,
    /// New estimate, or `None` to clear it.
    pub estimated_hours: Option<f64>,
    /// New workflow status.
    pub status: TaskStatus,
}

/// Request to delete a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTaskCommand {
    /// Task to delete.
    pub id: TaskId,
}

/// Request to append a comment to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskCommentCommand {
    /// Task to comment on.
    pub task_id: TaskId,
    /// Commenting user.
    pub author_id: UserId,
    /// Comment body.
    pub content: String,
}

/// Request to record an uploaded file against a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskAttachmentCommand {
    /// Task receiving the attachment.
    pub task_id: TaskId,
    /// Uploaded file metadata.
    pub upload: AttachmentUpload,
}

/// Request to register a project that tasks can be filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectCommand {
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Planned start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Planned end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Team roster.
    pub team_members: Vec<UserId>,
}

/// Request to register a user who can be assigned work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserCommand {
    /// Display name.
    pub name: String,
    /// Avatar reference.
    pub avatar_url: Option<String>,
}

/// Handles task commands against the task repository.
///
/// After every write the owning project's cached task counts are refreshed.
/// That refresh is best-effort: a failure is logged and does not fail the
/// command, whose task write has already been persisted.
pub struct TaskCommandService<R, D, C>
where
    R: TaskRepository + ?Sized,
    D: DirectoryRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    clock: Arc<C>,
    ids: Arc<dyn TaskIdGenerator>,
}

impl<R, D, C> Clone for TaskCommandService<R, D, C>
where
    R: TaskRepository + ?Sized,
    D: DirectoryRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            directory: Arc::clone(&self.directory),
            clock: Arc::clone(&self.clock),
            ids: Arc::clone(&self.ids),
        }
    }
}

impl<R, D, C> TaskCommandService<R, D, C>
where
    R: TaskRepository + ?Sized,
    D: DirectoryRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a command service that issues random identifiers.
    #[must_use]
    pub fn new(repository: Arc<R>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
            ids: Arc::new(RandomIdGenerator),
        }
    }

    /// Replaces the identifier source.
    #[must_use]
    pub fn with_id_generator(mut self, ids: Arc<dyn TaskIdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Creates and stores a task, returning its identifier.
    ///
    /// Optional fields are applied in the order assignee, due date, priority,
    /// estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a blank title or an invalid
    /// estimate, and [`TaskServiceError::Repository`] when storage fails.
    pub async fn create_task(&self, command: CreateTaskCommand) -> TaskServiceResult<TaskId> {
        let clock = &*self.clock;
        let mut task = Task::new(
            self.ids.new_task_id(),
            command.title,
            command.description,
            command.project_id,
            clock,
        )?;
        if let Some(assignee_id) = command.assignee_id {
            task.assign(assignee_id, clock);
        }
        if let Some(due_date) = command.due_date {
            task.reschedule(Some(due_date), clock);
        }
        task.set_priority(command.priority, clock);
        if let Some(hours) = command.estimated_hours {
            task.reestimate(Some(hours), clock)?;
        }

        self.repository.store(&task).await?;
        tracing::debug!(task_id = %task.id(), project_id = %task.project_id(), "task created");
        self.refresh_project_counts(task.project_id()).await;
        Ok(task.id())
    }

    /// Overwrites the editable fields of an existing task.
    ///
    /// The status transition always runs, so submitting `Completed` stamps
    /// the completion date with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] for an unknown task,
    /// [`TaskServiceError::Domain`] for invalid field values, and
    /// [`TaskServiceError::Repository`] when storage fails.
    pub async fn update_task(&self, command: UpdateTaskCommand) -> TaskServiceResult<()> {
        let clock = &*self.clock;
        let mut task = self.load(command.id).await?;

        task.rename(command.title, clock)?;
        task.redescribe(command.description, clock);
        task.reschedule(command.due_date, clock);
        match command.assignee_id {
            Some(assignee_id) => task.assign(assignee_id, clock),
            None => task.unassign(clock),
        }
        task.set_priority(command.priority, clock);
        task.reestimate(command.estimated_hours, clock)?;
        task.transition_status(command.status, clock);

        self.repository.update(&task).await?;
        tracing::debug!(task_id = %task.id(), status = %task.status(), "task updated");
        self.refresh_project_counts(task.project_id()).await;
        Ok(())
    }

    /// Deletes a task along with its comments and attachments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] for an unknown task and
    /// [`TaskServiceError::Repository`] when storage fails.
    pub async fn delete_task(&self, command: DeleteTaskCommand) -> TaskServiceResult<()> {
        let task = self.load(command.id).await?;
        self.repository.remove(task.id()).await?;
        tracing::debug!(task_id = %task.id(), "task deleted");
        self.refresh_project_counts(task.project_id()).await;
        Ok(())
    }

    /// Appends a comment to a task, returning the comment identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] for an unknown task,
    /// [`TaskServiceError::Domain`] for blank content, and
    /// [`TaskServiceError::Repository`] when storage fails.
    pub async fn add_comment(
        &self,
        command: AddTaskCommentCommand,
    ) -> TaskServiceResult<CommentId> {
        let clock = &*self.clock;
        let mut task = self.load(command.task_id).await?;
        let comment = Comment::new(
            self.ids.new_comment_id(),
            command.author_id,
            command.content,
            clock,
        )?;
        let comment_id = comment.id();
        task.add_comment(comment, clock);

        self.repository.update(&task).await?;
        tracing::debug!(task_id = %task.id(), comment_id = %comment_id, "comment added");
        Ok(comment_id)
    }

    /// Records an attachment against a task, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] for an unknown task,
    /// [`TaskServiceError::Domain`] for a blank file name, and
    /// [`TaskServiceError::Repository`] when storage fails.
    pub async fn add_attachment(
        &self,
        command: AddTaskAttachmentCommand,
    ) -> TaskServiceResult<AttachmentId> {
        let clock = &*self.clock;
        let mut task = self.load(command.task_id).await?;
        let attachment = Attachment::new(self.ids.new_attachment_id(), command.upload, clock)?;
        let attachment_id = attachment.id();
        task.add_attachment(attachment, clock);

        self.repository.update(&task).await?;
        tracing::debug!(
            task_id = %task.id(),
            attachment_id = %attachment_id,
            "attachment added"
        );
        Ok(attachment_id)
    }

    /// Registers a project with no tasks, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a blank name and
    /// [`TaskServiceError::Directory`] when storage fails.
    pub async fn create_project(
        &self,
        command: CreateProjectCommand,
    ) -> TaskServiceResult<ProjectId> {
        let project = Project::new(self.ids.new_project_id(), command.name, command.description)?
            .with_schedule(command.start_date, command.end_date)
            .with_team_members(command.team_members);

        self.directory.store_project(&project).await?;
        tracing::debug!(project_id = %project.id(), "project created");
        Ok(project.id())
    }

    /// Registers a user, returning their identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a blank name and
    /// [`TaskServiceError::Directory`] when storage fails.
    pub async fn create_user(&self, command: CreateUserCommand) -> TaskServiceResult<UserId> {
        let mut user = User::new(self.ids.new_user_id(), command.name)?;
        if let Some(avatar_url) = command.avatar_url {
            user = user.with_avatar_url(avatar_url);
        }

        self.directory.store_user(&user).await?;
        tracing::debug!(user_id = %user.id(), "user created");
        Ok(user.id())
    }

    async fn load(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    async fn refresh_project_counts(&self, project_id: ProjectId) {
        if let Err(err) = self.try_refresh_project_counts(project_id).await {
            tracing::warn!(%project_id, error = %err, "failed to refresh project task counts");
        }
    }

    async fn try_refresh_project_counts(&self, project_id: ProjectId) -> TaskServiceResult<()> {
        let Some(mut project) = self.directory.find_project(project_id).await? else {
            tracing::debug!(%project_id, "task references an unknown project");
            return Ok(());
        };

        let (total, completed_total) =
            project_task_counts(&*self.repository, project_id).await?;
        project.record_task_counts(total, completed_total);
        self.directory.update_project(&project).await?;
        Ok(())
    }
}
