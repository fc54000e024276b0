//! `PostgreSQL` repository implementation for task storage.

use super::{
    blocking::{TaskPgPool, with_connection},
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        Attachment, Comment, EstimatedHours, PersistedTaskData, Priority, ProjectId, SortDirection,
        SortKey, Task, TaskFilter, TaskId, TaskQuery, TaskStatus, UserId,
    },
    ports::{TaskQueryResult, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        with_connection(
            &self.pool,
            move |connection| f(connection),
            TaskRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn query(&self, query: &TaskQuery) -> TaskRepositoryResult<TaskQueryResult> {
        let owned_query = query.clone();
        self.run_blocking(move |connection| {
            let total = filtered(&owned_query.filter)
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let offset = i64::try_from(owned_query.page.offset())
                .map_err(TaskRepositoryError::persistence)?;
            let rows = ordered(filtered(&owned_query.filter), &owned_query)
                .select(TaskRow::as_select())
                .limit(i64::from(owned_query.page.page_size()))
                .offset(offset)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let found_tasks = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskRepositoryResult<Vec<_>>>()?;
            Ok(TaskQueryResult {
                tasks: found_tasks,
                total: u64::try_from(total).map_err(TaskRepositoryError::persistence)?,
            })
        })
        .await
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Builds the boxed `WHERE` clause for a filter.
fn filtered(filter: &TaskFilter) -> tasks::BoxedQuery<'static, Pg> {
    let mut statement = tasks::table.into_boxed();
    if let Some(needle) = filter.search() {
        let pattern = format!("%{}%", escape_like(needle));
        statement = statement.filter(
            tasks::title
                .ilike(pattern.clone())
                .or(tasks::description.ilike(pattern)),
        );
    }
    if let Some(project_id) = filter.project_id() {
        statement = statement.filter(tasks::project_id.eq(project_id.into_inner()));
    }
    if let Some(status) = filter.status() {
        statement = statement.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(priority) = filter.priority() {
        statement = statement.filter(tasks::priority.eq(i16::from(priority.rank())));
    }
    if let Some(assignee_id) = filter.assignee_id() {
        statement = statement.filter(tasks::assignee_id.eq(assignee_id.into_inner()));
    }
    statement
}

/// Applies the requested ordering. Titles order under the column's
/// `und-x-icu` collation. Ties fall back to creation order so the result
/// matches a stable sort over insertion order.
fn ordered(
    statement: tasks::BoxedQuery<'static, Pg>,
    query: &TaskQuery,
) -> tasks::BoxedQuery<'static, Pg> {
    let descending = query.sort.direction == SortDirection::Desc;
    let primary = match (query.sort.key, descending) {
        (SortKey::DueDate, false) => statement.order_by(tasks::due_date.asc().nulls_last()),
        (SortKey::DueDate, true) => statement.order_by(tasks::due_date.desc().nulls_first()),
        (SortKey::Priority, false) => statement.order_by(tasks::priority.asc()),
        (SortKey::Priority, true) => statement.order_by(tasks::priority.desc()),
        (SortKey::Title, false) => statement.order_by(tasks::title.asc()),
        (SortKey::Title, true) => statement.order_by(tasks::title.desc()),
    };
    primary
        .then_order_by(tasks::created_at.asc())
        .then_order_by(tasks::id.asc())
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let comments =
        serde_json::to_value(task.comments()).map_err(TaskRepositoryError::persistence)?;
    let attachments =
        serde_json::to_value(task.attachments()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: i16::from(task.priority().rank()),
        due_date: task.due_date(),
        completed_date: task.completed_date(),
        estimated_hours: task.estimated_hours().map(EstimatedHours::value),
        project_id: task.project_id().into_inner(),
        assignee_id: task.assignee_id().map(UserId::into_inner),
        comments,
        attachments,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

/// Stored value that no longer maps onto the domain model.
#[derive(Debug, thiserror::Error)]
#[error("corrupt task row: {0}")]
struct CorruptRow(String);

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        due_date,
        completed_date,
        estimated_hours: persisted_estimate,
        project_id,
        assignee_id,
        comments: persisted_comments,
        attachments: persisted_attachments,
        created_at,
        updated_at,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let priority = u8::try_from(persisted_priority)
        .ok()
        .and_then(Priority::from_rank)
        .ok_or_else(|| {
            TaskRepositoryError::persistence(CorruptRow(format!(
                "priority rank {persisted_priority}"
            )))
        })?;
    let estimated_hours = persisted_estimate
        .map(EstimatedHours::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let comments = serde_json::from_value::<Vec<Comment>>(persisted_comments)
        .map_err(TaskRepositoryError::persistence)?;
    let attachments = serde_json::from_value::<Vec<Attachment>>(persisted_attachments)
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status,
        priority,
        due_date,
        completed_date,
        estimated_hours,
        project_id: ProjectId::from_uuid(project_id),
        assignee_id: assignee_id.map(UserId::from_uuid),
        comments,
        attachments,
        created_at,
        updated_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::{escape_like, row_to_task, to_new_row};
    use crate::task::{
        adapters::{memory::ManualClock, postgres::models::TaskRow},
        domain::{Comment, CommentId, Priority, ProjectId, Task, TaskId, TaskStatus, UserId},
    };
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("100%", "100\\%")]
    #[case("snake_case", "snake\\_case")]
    #[case("back\\slash", "back\\\\slash")]
    fn escape_like_escapes_wildcards(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(escape_like(needle), expected);
    }

    #[rstest]
    fn row_conversion_preserves_task_fields() -> eyre::Result<()> {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .ok_or_else(|| eyre::eyre!("invalid fixture timestamp"))?;
        let clock = ManualClock::new(start);
        let mut task = Task::new(
            TaskId::new(),
            "Persist me",
            "with every field set",
            ProjectId::new(),
            &clock,
        )?;
        task.assign(UserId::new(), &clock);
        task.set_priority(Priority::High, &clock);
        task.reestimate(Some(2.5), &clock)?;
        task.transition_status(TaskStatus::Completed, &clock);
        task.add_comment(
            Comment::new(CommentId::new(), UserId::new(), "done", &clock)?,
            &clock,
        );

        let new_row = to_new_row(&task)?;
        let row = TaskRow {
            id: new_row.id,
            title: new_row.title,
            description: new_row.description,
            status: new_row.status,
            priority: new_row.priority,
            due_date: new_row.due_date,
            completed_date: new_row.completed_date,
            estimated_hours: new_row.estimated_hours,
            project_id: new_row.project_id,
            assignee_id: new_row.assignee_id,
            comments: new_row.comments,
            attachments: new_row.attachments,
            created_at: new_row.created_at,
            updated_at: new_row.updated_at,
        };

        eyre::ensure!(row.priority == 3, "priority should be stored by rank");
        eyre::ensure!(row.status == "completed", "status should use its storage string");
        let restored = row_to_task(row)?;
        eyre::ensure!(restored == task, "restored task differs: {restored:?}");
        Ok(())
    }
}
