//! Router and handlers exposing the task services over HTTP.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use mockable::Clock;
use tower_http::trace::TraceLayer;

use super::{
    AddAttachmentRequest, AddCommentRequest, ApiErrorResponse, CreateProjectRequest,
    CreateTaskRequest, CreateUserRequest, HealthResponse, IdResponse, TaskListParams,
    UpdateTaskRequest,
};
use crate::task::{
    domain::{AttachmentId, CommentId, ProjectId, TaskId, UserId},
    ports::{DirectoryRepository, TaskRepository},
    services::{
        CreateProjectCommand, CreateUserCommand, DeleteTaskCommand, GetProjectOverviewQuery,
        GetTaskByIdQuery, ProjectOverview, TaskCommandService, TaskDetails, TaskPage,
        TaskQueryService, TaskServiceError, dispatch,
    },
};

/// Command service over type-erased ports.
pub type DynCommandService<C> =
    TaskCommandService<dyn TaskRepository, dyn DirectoryRepository, C>;

/// Query service over type-erased ports.
pub type DynQueryService = TaskQueryService<dyn TaskRepository, dyn DirectoryRepository>;

/// Shared state handed to every handler.
pub struct AppState<C>
where
    C: Clock + Send + Sync,
{
    /// Write side.
    pub commands: DynCommandService<C>,
    /// Read side.
    pub queries: DynQueryService,
}

impl<C> Clone for AppState<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            queries: self.queries.clone(),
        }
    }
}

impl<C> AppState<C>
where
    C: Clock + Send + Sync,
{
    /// Builds both services over the same ports.
    #[must_use]
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        directory: Arc<dyn DirectoryRepository>,
        clock: Arc<C>,
        page_size: u32,
    ) -> Self {
        Self {
            commands: TaskCommandService::new(
                Arc::clone(&repository),
                Arc::clone(&directory),
                clock,
            ),
            queries: TaskQueryService::new(repository, directory).with_page_size(page_size),
        }
    }
}

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Builds the task router with request tracing.
#[must_use]
pub fn router<C>(state: AppState<C>) -> Router
where
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/tasks", get(list_tasks::<C>).post(create_task::<C>))
        .route(
            "/tasks/{id}",
            get(get_task::<C>)
                .put(update_task::<C>)
                .delete(delete_task::<C>),
        )
        .route("/tasks/{id}/comments", post(add_comment::<C>))
        .route("/tasks/{id}/attachments", post(add_attachment::<C>))
        .route("/projects", post(create_project::<C>))
        .route("/projects/{id}", get(get_project::<C>))
        .route("/users", post(create_user::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}

async fn list_tasks<C>(
    State(state): State<AppState<C>>,
    Query(params): Query<TaskListParams>,
) -> ApiResult<Json<TaskPage>>
where
    C: Clock + Send + Sync + 'static,
{
    let query = params.into_query()?;
    Ok(Json(dispatch(&state.queries, query).await?))
}

async fn get_task<C>(
    State(state): State<AppState<C>>,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<TaskDetails>>
where
    C: Clock + Send + Sync + 'static,
{
    let details = dispatch(&state.queries, GetTaskByIdQuery { id }).await?;
    Ok(Json(details))
}

async fn create_task<C>(
    State(state): State<AppState<C>>,
    Json(body): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<IdResponse<TaskId>>)>
where
    C: Clock + Send + Sync + 'static,
{
    let command = body.into_command()?;
    let id = dispatch(&state.commands, command).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

async fn update_task<C>(
    State(state): State<AppState<C>>,
    Path(id): Path<TaskId>,
    Json(body): Json<UpdateTaskRequest>,
) -> ApiResult<StatusCode>
where
    C: Clock + Send + Sync + 'static,
{
    if body.id != id {
        return Err(TaskServiceError::IdMismatch {
            addressed: id,
            payload: body.id,
        }
        .into());
    }
    let command = body.into_command()?;
    dispatch(&state.commands, command).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_task<C>(
    State(state): State<AppState<C>>,
    Path(id): Path<TaskId>,
) -> ApiResult<StatusCode>
where
    C: Clock + Send + Sync + 'static,
{
    dispatch(&state.commands, DeleteTaskCommand { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_comment<C>(
    State(state): State<AppState<C>>,
    Path(id): Path<TaskId>,
    Json(body): Json<AddCommentRequest>,
) -> ApiResult<(StatusCode, Json<IdResponse<CommentId>>)>
where
    C: Clock + Send + Sync + 'static,
{
    let comment_id = dispatch(&state.commands, body.into_command(id)).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id: comment_id })))
}

async fn add_attachment<C>(
    State(state): State<AppState<C>>,
    Path(id): Path<TaskId>,
    Json(body): Json<AddAttachmentRequest>,
) -> ApiResult<(StatusCode, Json<IdResponse<AttachmentId>>)>
where
    C: Clock + Send + Sync + 'static,
{
    let attachment_id = dispatch(&state.commands, body.into_command(id)).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id: attachment_id })))
}

async fn get_project<C>(
    State(state): State<AppState<C>>,
    Path(project_id): Path<ProjectId>,
) -> ApiResult<Json<ProjectOverview>>
where
    C: Clock + Send + Sync + 'static,
{
    let overview = dispatch(&state.queries, GetProjectOverviewQuery { project_id }).await?;
    Ok(Json(overview))
}

async fn create_project<C>(
    State(state): State<AppState<C>>,
    Json(body): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<IdResponse<ProjectId>>)>
where
    C: Clock + Send + Sync + 'static,
{
    let id = dispatch(&state.commands, CreateProjectCommand::from(body)).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

async fn create_user<C>(
    State(state): State<AppState<C>>,
    Json(body): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<IdResponse<UserId>>)>
where
    C: Clock + Send + Sync + 'static,
{
    let id = dispatch(&state.commands, CreateUserCommand::from(body)).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}
