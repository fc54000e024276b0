//! Projects that own tasks and the users tasks refer to.

use super::{ProjectId, TaskDomainError, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A person who can be assigned tasks, author comments, or upload files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    avatar_url: Option<String>,
}

impl User {
    /// Creates a user record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyUserName`] when the display name is
    /// blank.
    pub fn new(id: UserId, name: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyUserName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            avatar_url: None,
        })
    }

    /// Sets the avatar reference.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the avatar reference, if any.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

/// A body of work grouping related tasks.
///
/// Task counts are a cache refreshed from the task store; the progress
/// percentage is always derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    team_members: Vec<UserId>,
    task_count: u64,
    completed_task_count: u64,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: String,
    /// Persisted description.
    pub description: String,
    /// Persisted start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Persisted end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Persisted team member references.
    pub team_members: Vec<UserId>,
    /// Cached number of tasks.
    pub task_count: u64,
    /// Cached number of completed tasks.
    pub completed_task_count: u64,
}

impl Project {
    /// Creates an empty project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyProjectName`] when the name is blank.
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyProjectName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            description: description.into(),
            start_date: None,
            end_date: None,
            team_members: Vec::new(),
            task_count: 0,
            completed_task_count: 0,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        let mut project = Self {
            id: data.id,
            name: data.name,
            description: data.description,
            start_date: data.start_date,
            end_date: data.end_date,
            team_members: data.team_members,
            task_count: 0,
            completed_task_count: 0,
        };
        project.record_task_counts(data.task_count, data.completed_task_count);
        project
    }

    /// Sets the planned schedule.
    #[must_use]
    pub const fn with_schedule(
        mut self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Sets the team roster, dropping duplicate members.
    #[must_use]
    pub fn with_team_members(mut self, members: impl IntoIterator<Item = UserId>) -> Self {
        self.team_members.clear();
        for member in members {
            if !self.team_members.contains(&member) {
                self.team_members.push(member);
            }
        }
        self
    }

    /// Refreshes the cached task counts. A completed count above the total is
    /// clamped to the total.
    pub fn record_task_counts(&mut self, total: u64, completed: u64) {
        self.task_count = total;
        self.completed_task_count = completed.min(total);
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the planned start date.
    #[must_use]
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Returns the planned end date.
    #[must_use]
    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// Returns the team roster.
    #[must_use]
    pub fn team_members(&self) -> &[UserId] {
        &self.team_members
    }

    /// Returns the cached task count.
    #[must_use]
    pub const fn task_count(&self) -> u64 {
        self.task_count
    }

    /// Returns the cached completed task count.
    #[must_use]
    pub const fn completed_task_count(&self) -> u64 {
        self.completed_task_count
    }

    /// Returns the completion percentage in `0..=100`, rounded down.
    #[must_use]
    pub fn progress(&self) -> u8 {
        let Some(scaled) = self.completed_task_count.checked_mul(100) else {
            return 100;
        };
        let percent = scaled
            .checked_div(self.task_count)
            .unwrap_or_default()
            .min(100);
        u8::try_from(percent).unwrap_or(100)
    }
}
