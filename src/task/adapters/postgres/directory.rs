//! `PostgreSQL` directory of projects and users.

use super::{
    blocking::{TaskPgPool, with_connection},
    models::{ProjectRow, UserRow},
    schema::{projects, users},
};
use crate::task::{
    domain::{PersistedProjectData, Project, ProjectId, User, UserId},
    ports::{DirectoryError, DirectoryRepository, DirectoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project and user directory.
#[derive(Debug, Clone)]
pub struct PostgresDirectory {
    pool: TaskPgPool,
}

impl PostgresDirectory {
    /// Creates a directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        with_connection(
            &self.pool,
            move |connection| f(connection),
            DirectoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl DirectoryRepository for PostgresDirectory {
    async fn store_project(&self, project: &Project) -> DirectoryResult<()> {
        let project_id = project.id();
        let row = to_project_row(project)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DirectoryError::DuplicateProject(project_id)
                    }
                    _ => DirectoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_project(&self, project: &Project) -> DirectoryResult<()> {
        let project_id = project.id();
        let row = to_project_row(project)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(projects::table.find(project_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(DirectoryError::persistence)?;
            if updated == 0 {
                return Err(DirectoryError::ProjectNotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> DirectoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn store_user(&self, user: &User) -> DirectoryResult<()> {
        let user_id = user.id();
        let row = UserRow {
            id: user_id.into_inner(),
            name: user.name().to_owned(),
            avatar_url: user.avatar_url().map(str::to_owned),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DirectoryError::DuplicateUser(user_id)
                    }
                    _ => DirectoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_user(&self, id: UserId) -> DirectoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

fn to_project_row(project: &Project) -> DirectoryResult<ProjectRow> {
    let team_members =
        serde_json::to_value(project.team_members()).map_err(DirectoryError::persistence)?;
    Ok(ProjectRow {
        id: project.id().into_inner(),
        name: project.name().to_owned(),
        description: project.description().to_owned(),
        start_date: project.start_date(),
        end_date: project.end_date(),
        team_members,
        task_count: i64::try_from(project.task_count()).map_err(DirectoryError::persistence)?,
        completed_task_count: i64::try_from(project.completed_task_count())
            .map_err(DirectoryError::persistence)?,
    })
}

fn row_to_project(row: ProjectRow) -> DirectoryResult<Project> {
    let team_members = serde_json::from_value::<Vec<UserId>>(row.team_members)
        .map_err(DirectoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        start_date: row.start_date,
        end_date: row.end_date,
        team_members,
        task_count: u64::try_from(row.task_count).map_err(DirectoryError::persistence)?,
        completed_task_count: u64::try_from(row.completed_task_count)
            .map_err(DirectoryError::persistence)?,
    }))
}

fn row_to_user(row: UserRow) -> DirectoryResult<User> {
    let mut user =
        User::new(UserId::from_uuid(row.id), row.name).map_err(DirectoryError::persistence)?;
    if let Some(avatar_url) = row.avatar_url {
        user = user.with_avatar_url(avatar_url);
    }
    Ok(user)
}
