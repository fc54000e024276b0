//! Query handlers: read-only projections over stored tasks.

use crate::task::{
    domain::{
        DEFAULT_PAGE_SIZE, PageRequest, ProjectId, Task, TaskFilter, TaskId, TaskQuery, TaskSort,
        TaskStatus, UserId,
    },
    ports::{DirectoryRepository, TaskRepository},
};
use std::collections::HashMap;
use std::sync::Arc;

use super::{
    AttachmentView, CommentView, ProjectOverview, TaskDetails, TaskPage, TaskServiceError,
    TaskServiceResult, TaskSummary, UserSummary,
};

/// Request for one task by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetTaskByIdQuery {
    /// Task to load.
    pub id: TaskId,
}

/// Request for a filtered, sorted page of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTasksQuery {
    /// Criteria a task must satisfy.
    pub filter: TaskFilter,
    /// Ordering of the matches.
    pub sort: TaskSort,
    /// One-indexed page number.
    pub page: u32,
}

impl Default for GetTasksQuery {
    fn default() -> Self {
        Self {
            filter: TaskFilter::default(),
            sort: TaskSort::default(),
            page: 1,
        }
    }
}

/// Request for a project with its task counts and team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetProjectOverviewQuery {
    /// Project to load.
    pub project_id: ProjectId,
}

/// Handles read-only task queries.
pub struct TaskQueryService<R, D>
where
    R: TaskRepository + ?Sized,
    D: DirectoryRepository + ?Sized,
{
    repository: Arc<R>,
    directory: Arc<D>,
    page_size: u32,
}

impl<R, D> Clone for TaskQueryService<R, D>
where
    R: TaskRepository + ?Sized,
    D: DirectoryRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            directory: Arc::clone(&self.directory),
            page_size: self.page_size,
        }
    }
}

impl<R, D> TaskQueryService<R, D>
where
    R: TaskRepository + ?Sized,
    D: DirectoryRepository + ?Sized,
{
    /// Creates a query service using [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub const fn new(repository: Arc<R>, directory: Arc<D>) -> Self {
        Self {
            repository,
            directory,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the number of tasks per page.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Returns the number of tasks per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Loads a task with project, assignee, author, and uploader names
    /// resolved.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] for an unknown task and
    /// [`TaskServiceError::Repository`] or [`TaskServiceError::Directory`]
    /// when a lookup fails.
    pub async fn get_task(&self, query: GetTaskByIdQuery) -> TaskServiceResult<TaskDetails> {
        let task = self
            .repository
            .find_by_id(query.id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(query.id))?;

        let mut names = NameResolver::new(&*self.directory);
        let summary = names.summarize(&task).await?;

        let mut comments = Vec::with_capacity(task.comments().len());
        for comment in task.comments() {
            let author = names.user(comment.author_id()).await?;
            comments.push(CommentView::new(comment, author));
        }

        let mut attachments = Vec::with_capacity(task.attachments().len());
        for attachment in task.attachments() {
            let uploader = names.user(attachment.uploaded_by()).await?;
            attachments.push(AttachmentView::new(attachment, uploader));
        }

        Ok(TaskDetails {
            task: summary,
            comments,
            attachments,
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        })
    }

    /// Returns one page of tasks matching the filter, in the requested
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for page number zero and
    /// [`TaskServiceError::Repository`] or [`TaskServiceError::Directory`]
    /// when a lookup fails.
    pub async fn list_tasks(&self, query: GetTasksQuery) -> TaskServiceResult<TaskPage> {
        let page = PageRequest::new(query.page, self.page_size)?;
        let result = self
            .repository
            .query(&TaskQuery::new(query.filter, query.sort, page))
            .await?;

        let mut names = NameResolver::new(&*self.directory);
        let mut items = Vec::with_capacity(result.tasks.len());
        for task in &result.tasks {
            items.push(names.summarize(task).await?);
        }

        Ok(TaskPage {
            items,
            total_count: result.total,
            total_pages: page.total_pages(result.total),
            page: page.page(),
            page_size: page.page_size(),
        })
    }

    /// Loads a project with task counts recomputed from the repository and
    /// its team resolved.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProjectNotFound`] for an unknown project
    /// and [`TaskServiceError::Repository`] or [`TaskServiceError::Directory`]
    /// when a lookup fails.
    pub async fn project_overview(
        &self,
        query: GetProjectOverviewQuery,
    ) -> TaskServiceResult<ProjectOverview> {
        let mut project = self
            .directory
            .find_project(query.project_id)
            .await?
            .ok_or(TaskServiceError::ProjectNotFound(query.project_id))?;
        let (total, completed) = project_task_counts(&*self.repository, project.id()).await?;
        project.record_task_counts(total, completed);

        let mut names = NameResolver::new(&*self.directory);
        let mut team = Vec::with_capacity(project.team_members().len());
        for member in project.team_members() {
            if let Some(user) = names.user(*member).await? {
                team.push(user);
            }
        }
        Ok(ProjectOverview::new(&project, team))
    }
}

/// Counts all and completed tasks in a project.
pub(super) async fn project_task_counts<R>(
    repository: &R,
    project_id: ProjectId,
) -> TaskServiceResult<(u64, u64)>
where
    R: TaskRepository + ?Sized,
{
    let count_page = PageRequest::new(1, 1)?;
    let all = TaskQuery::new(
        TaskFilter::new().with_project(project_id),
        TaskSort::default(),
        count_page,
    );
    let completed = TaskQuery::new(
        TaskFilter::new()
            .with_project(project_id)
            .with_status(TaskStatus::Completed),
        TaskSort::default(),
        count_page,
    );
    let total = repository.query(&all).await?.total;
    let completed_total = repository.query(&completed).await?.total;
    Ok((total, completed_total))
}

/// Per-request memo of directory lookups, so a page of tasks sharing a
/// project or assignee hits the directory once per reference.
struct NameResolver<'a, D: DirectoryRepository + ?Sized> {
    directory: &'a D,
    projects: HashMap<ProjectId, Option<String>>,
    users: HashMap<UserId, Option<UserSummary>>,
}

impl<'a, D: DirectoryRepository + ?Sized> NameResolver<'a, D> {
    fn new(directory: &'a D) -> Self {
        Self {
            directory,
            projects: HashMap::new(),
            users: HashMap::new(),
        }
    }

    async fn project_name(&mut self, id: ProjectId) -> TaskServiceResult<Option<String>> {
        if let Some(cached) = self.projects.get(&id) {
            return Ok(cached.clone());
        }
        let name = self
            .directory
            .find_project(id)
            .await?
            .map(|project| project.name().to_owned());
        self.projects.insert(id, name.clone());
        Ok(name)
    }

    async fn user(&mut self, id: UserId) -> TaskServiceResult<Option<UserSummary>> {
        if let Some(cached) = self.users.get(&id) {
            return Ok(cached.clone());
        }
        let summary = self
            .directory
            .find_user(id)
            .await?
            .map(|user| UserSummary::from(&user));
        self.users.insert(id, summary.clone());
        Ok(summary)
    }

    async fn summarize(&mut self, task: &Task) -> TaskServiceResult<TaskSummary> {
        let project_name = self.project_name(task.project_id()).await?;
        let assignee = match task.assignee_id() {
            Some(id) => self.user(id).await?,
            None => None,
        };
        Ok(TaskSummary::new(task, project_name, assignee))
    }
}
