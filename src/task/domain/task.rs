//! Task aggregate root.

use super::{
    Attachment, Comment, EstimatedHours, Priority, ProjectId, TaskDomainError, TaskId, TaskStatus,
    UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Fields are private; every change goes through a named operation so the
/// title, estimate, and completion invariants hold after each call.
/// Deserialization goes through [`PersistedTaskData`] and is checked the
/// same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PersistedTaskData")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    completed_date: Option<DateTime<Utc>>,
    estimated_hours: Option<EstimatedHours>,
    project_id: ProjectId,
    assignee_id: Option<UserId>,
    comments: Vec<Comment>,
    attachments: Vec<Attachment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted completion timestamp.
    pub completed_date: Option<DateTime<Utc>>,
    /// Persisted estimate.
    pub estimated_hours: Option<EstimatedHours>,
    /// Owning project.
    pub project_id: ProjectId,
    /// Assigned user, if any.
    pub assignee_id: Option<UserId>,
    /// Persisted comments in insertion order.
    pub comments: Vec<Comment>,
    /// Persisted attachments in insertion order.
    pub attachments: Vec<Attachment>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PersistedTaskData> for Task {
    type Error = TaskDomainError;

    fn try_from(data: PersistedTaskData) -> Result<Self, Self::Error> {
        if data.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self::from_persisted(data))
    }
}

impl Task {
    /// Creates a new task in [`TaskStatus::ToDo`] with [`Priority::Medium`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        project_id: ProjectId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id,
            title: validated_title(title.into())?,
            description: description.into(),
            status: TaskStatus::ToDo,
            priority: Priority::Medium,
            due_date: None,
            completed_date: None,
            estimated_hours: None,
            project_id,
            assignee_id: None,
            comments: Vec::new(),
            attachments: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// A completion timestamp stored against a non-completed status is
    /// dropped so the completion invariant holds for loaded tasks too.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let completed_date = if data.status.is_completed() {
            data.completed_date.or(Some(data.updated_at))
        } else {
            None
        };
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            completed_date,
            estimated_hours: data.estimated_hours,
            project_id: data.project_id,
            assignee_id: data.assignee_id,
            comments: data.comments,
            attachments: data.attachments,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if scheduled.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns when the task was completed. Present only while the status is
    /// [`TaskStatus::Completed`].
    #[must_use]
    pub const fn completed_date(&self) -> Option<DateTime<Utc>> {
        self.completed_date
    }

    /// Returns the effort estimate, if any.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<EstimatedHours> {
        self.estimated_hours
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assigned user, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns comments in the order they were added.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns attachments in the order they were added.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank; the
    /// task is left unchanged.
    pub fn rename(
        &mut self,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.title = validated_title(title.into())?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description. Any content, including empty, is accepted.
    pub fn redescribe(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Sets or clears the due date.
    pub fn reschedule(&mut self, due_date: Option<DateTime<Utc>>, clock: &impl Clock) {
        self.due_date = due_date;
        self.touch(clock);
    }

    /// Sets or clears the effort estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NegativeEstimate`] for negative hours and
    /// [`TaskDomainError::InvalidEstimate`] for non-finite hours.
    pub fn reestimate(
        &mut self,
        hours: Option<f64>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.estimated_hours = hours.map(EstimatedHours::new).transpose()?;
        self.touch(clock);
        Ok(())
    }

    /// Assigns the task to a user.
    pub fn assign(&mut self, user_id: UserId, clock: &impl Clock) {
        self.assignee_id = Some(user_id);
        self.touch(clock);
    }

    /// Removes the current assignee.
    pub fn unassign(&mut self, clock: &impl Clock) {
        self.assignee_id = None;
        self.touch(clock);
    }

    /// Changes the priority.
    pub fn set_priority(&mut self, priority: Priority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Moves the task to `status`.
    ///
    /// Entering [`TaskStatus::Completed`] stamps the completion date with the
    /// current clock time; every other status clears it. No transition is
    /// rejected, so a completed task may be reopened.
    pub fn transition_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.status = status;
        self.completed_date = status.is_completed().then_some(timestamp);
        self.updated_at = timestamp;
    }

    /// Appends a comment.
    pub fn add_comment(&mut self, comment: Comment, clock: &impl Clock) {
        self.comments.push(comment);
        self.touch(clock);
    }

    /// Appends an attachment.
    pub fn add_attachment(&mut self, attachment: Attachment, clock: &impl Clock) {
        self.attachments.push(attachment);
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_title(title: String) -> Result<String, TaskDomainError> {
    if title.trim().is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(title)
}
