//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::{
    domain::{ParsePriorityError, ParseSortError, ParseTaskStatusError},
    ports::{DirectoryError, TaskRepositoryError},
    services::TaskServiceError,
};

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Status code paired with an error body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {}", .error.message)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// 400 with the given code.
    #[must_use]
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(code, message))
    }

    /// 400 for rejected input values.
    #[must_use]
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::bad_request("VALIDATION_ERROR", message)
    }

    /// 404.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    /// 409.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, ApiError::new("CONFLICT", message))
    }

    /// 500 with a generic message.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", "an internal error occurred"),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<TaskServiceError> for ApiErrorResponse {
    fn from(error: TaskServiceError) -> Self {
        match error {
            TaskServiceError::Domain(err) => Self::validation_error(err.to_string()),
            TaskServiceError::IdMismatch { .. } => {
                Self::bad_request("ID_MISMATCH", error.to_string())
            }
            TaskServiceError::TaskNotFound(_)
            | TaskServiceError::ProjectNotFound(_)
            | TaskServiceError::Repository(TaskRepositoryError::NotFound(_))
            | TaskServiceError::Directory(DirectoryError::ProjectNotFound(_)) => {
                Self::not_found(error.to_string())
            }
            TaskServiceError::Repository(TaskRepositoryError::DuplicateTask(_))
            | TaskServiceError::Directory(
                DirectoryError::DuplicateProject(_) | DirectoryError::DuplicateUser(_),
            ) => Self::conflict(error.to_string()),
            TaskServiceError::Repository(TaskRepositoryError::Persistence(_))
            | TaskServiceError::Directory(DirectoryError::Persistence(_)) => {
                tracing::error!(error = %error, "request failed on storage");
                Self::internal_error()
            }
        }
    }
}

impl From<ParseTaskStatusError> for ApiErrorResponse {
    fn from(error: ParseTaskStatusError) -> Self {
        Self::bad_request("INVALID_PARAMETER", error.to_string())
    }
}

impl From<ParsePriorityError> for ApiErrorResponse {
    fn from(error: ParsePriorityError) -> Self {
        Self::bad_request("INVALID_PARAMETER", error.to_string())
    }
}

impl From<ParseSortError> for ApiErrorResponse {
    fn from(error: ParseSortError) -> Self {
        Self::bad_request("INVALID_PARAMETER", error.to_string())
    }
}
