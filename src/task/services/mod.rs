//! Application services: command and query handlers over the task ports.

mod commands;
mod dispatch;
mod error;
mod queries;
mod views;

pub use commands::{
    AddTaskAttachmentCommand, AddTaskCommentCommand, CreateProjectCommand, CreateTaskCommand,
    CreateUserCommand, DeleteTaskCommand, TaskCommandService, UpdateTaskCommand,
};
pub use dispatch::{RequestHandler, dispatch};
pub use error::{TaskServiceError, TaskServiceResult};
pub use queries::{GetProjectOverviewQuery, GetTaskByIdQuery, GetTasksQuery, TaskQueryService};
pub use views::{
    AttachmentView, CommentView, ProjectOverview, TaskDetails, TaskPage, TaskSummary, UserSummary,
};
