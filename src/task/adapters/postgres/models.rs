//! Diesel row models for task persistence.

use super::schema::{projects, tasks, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status in storage form.
    pub status: String,
    /// Priority rank.
    pub priority: i16,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_date: Option<DateTime<Utc>>,
    /// Estimate in hours.
    pub estimated_hours: Option<f64>,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Comments JSON array.
    pub comments: Value,
    /// Attachments JSON array.
    pub attachments: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status in storage form.
    pub status: String,
    /// Priority rank.
    pub priority: i16,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_date: Option<DateTime<Utc>>,
    /// Estimate in hours.
    pub estimated_hours: Option<f64>,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Comments JSON array.
    pub comments: Value,
    /// Attachments JSON array.
    pub attachments: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row model for project records, used for reads and writes.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Planned start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Planned end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Team member identifiers as a JSON array.
    pub team_members: Value,
    /// Cached task count.
    pub task_count: i64,
    /// Cached completed task count.
    pub completed_task_count: i64,
}

/// Row model for user records, used for reads and writes.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Avatar reference.
    pub avatar_url: Option<String>,
}
