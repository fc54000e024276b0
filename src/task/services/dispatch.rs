//! Request dispatch: each command or query type is bound to exactly one
//! handler through [`RequestHandler`].

use super::{
    AddTaskAttachmentCommand, AddTaskCommentCommand, CreateProjectCommand, CreateTaskCommand,
    CreateUserCommand, DeleteTaskCommand,
    GetProjectOverviewQuery, GetTaskByIdQuery, GetTasksQuery, ProjectOverview,
    TaskCommandService, TaskDetails, TaskPage, TaskQueryService, TaskServiceResult,
    UpdateTaskCommand,
};
use crate::task::{
    domain::{AttachmentId, CommentId, ProjectId, TaskId, UserId},
    ports::{DirectoryRepository, TaskRepository},
};
use async_trait::async_trait;
use mockable::Clock;

/// Handler bound to one request type.
#[async_trait]
pub trait RequestHandler<Req>: Send + Sync
where
    Req: Send + 'static,
{
    /// Value produced on success.
    type Output: Send;

    /// Handles `request`.
    ///
    /// # Errors
    ///
    /// Returns the handler's [`super::TaskServiceError`] on failure.
    async fn handle(&self, request: Req) -> TaskServiceResult<Self::Output>;
}

/// Dispatches `request` to the handler `handler` provides for its type.
///
/// # Errors
///
/// Propagates the handler's error.
pub async fn dispatch<H, Req>(
    handler: &H,
    request: Req,
) -> TaskServiceResult<<H as RequestHandler<Req>>::Output>
where
    H: RequestHandler<Req> + ?Sized,
    Req: Send + 'static,
{
    handler.handle(request).await
}

macro_rules! command_handler {
    ($request:ty => $output:ty, $method:ident) => {
        #[async_trait]
        impl<R, D, C> RequestHandler<$request> for TaskCommandService<R, D, C>
        where
            R: TaskRepository + ?Sized,
            D: DirectoryRepository + ?Sized,
            C: Clock + Send + Sync,
        {
            type Output = $output;

            async fn handle(&self, request: $request) -> TaskServiceResult<$output> {
                self.$method(request).await
            }
        }
    };
}

command_handler!(CreateTaskCommand => TaskId, create_task);
command_handler!(UpdateTaskCommand => (), update_task);
command_handler!(DeleteTaskCommand => (), delete_task);
command_handler!(AddTaskCommentCommand => CommentId, add_comment);
command_handler!(AddTaskAttachmentCommand => AttachmentId, add_attachment);
command_handler!(CreateProjectCommand => ProjectId, create_project);
command_handler!(CreateUserCommand => UserId, create_user);

#[async_trait]
impl<R, D> RequestHandler<GetTaskByIdQuery> for TaskQueryService<R, D>
where
    R: TaskRepository + ?Sized,
    D: DirectoryRepository + ?Sized,
{
    type Output = TaskDetails;

    async fn handle(&self, request: GetTaskByIdQuery) -> TaskServiceResult<TaskDetails> {
        self.get_task(request).await
    }
}

#[async_trait]
impl<R, D> RequestHandler<GetTasksQuery> for TaskQueryService<R, D>
where
    R: TaskRepository + ?Sized,
    D: DirectoryRepository + ?Sized,
{
    type Output = TaskPage;

    async fn handle(&self, request: GetTasksQuery) -> TaskServiceResult<TaskPage> {
        self.list_tasks(request).await
    }
}

#[async_trait]
impl<R, D> RequestHandler<GetProjectOverviewQuery> for TaskQueryService<R, D>
where
    R: TaskRepository + ?Sized,
    D: DirectoryRepository + ?Sized,
{
    type Output = ProjectOverview;

    async fn handle(
        &self,
        request: GetProjectOverviewQuery,
    ) -> TaskServiceResult<ProjectOverview> {
        self.project_overview(request).await
    }
}
