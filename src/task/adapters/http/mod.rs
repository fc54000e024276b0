//! HTTP adapter built on axum.

mod dto;
mod error;
mod routes;

pub use dto::{
    AddAttachmentRequest, AddCommentRequest, CreateProjectRequest, CreateTaskRequest,
    CreateUserRequest, HealthResponse, IdResponse, TaskListParams, UpdateTaskRequest,
};
pub use error::{ApiError, ApiErrorResponse};
pub use routes::{AppState, DynCommandService, DynQueryService, router};
