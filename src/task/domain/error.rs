//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The estimated hours value is below zero.
    #[error("estimated hours cannot be negative, got {0}")]
    NegativeEstimate(String),

    /// The estimated hours value is not a finite number.
    #[error("estimated hours must be a finite number, got {0}")]
    InvalidEstimate(String),

    /// A comment was submitted without content.
    #[error("comment content must not be empty")]
    EmptyCommentContent,

    /// An attachment was submitted without a file name.
    #[error("attachment file name must not be empty")]
    EmptyFileName,

    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The user display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,

    /// Page numbers are 1-indexed.
    #[error("page number must be at least 1, got {0}")]
    InvalidPageNumber(u32),

    /// Page sizes must hold at least one item.
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(u32),
}

/// Error returned while parsing task statuses from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing a sort key or sort direction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort option: {0}")]
pub struct ParseSortError(pub String);
