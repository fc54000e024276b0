//! Domain model for task tracking.
//!
//! Tasks belong to projects, reference users, and own their comments and
//! attachments. All infrastructure concerns stay outside this boundary.

mod activity;
mod error;
mod estimate;
mod ids;
mod project;
mod query;
mod status;
mod task;

pub use activity::{Attachment, AttachmentUpload, Comment};
pub use error::{ParsePriorityError, ParseSortError, ParseTaskStatusError, TaskDomainError};
pub use estimate::EstimatedHours;
pub use ids::{AttachmentId, CommentId, ProjectId, TaskId, UserId};
pub use project::{PersistedProjectData, Project, User};
pub use query::{
    DEFAULT_PAGE_SIZE, PageRequest, SortDirection, SortKey, TaskFilter, TaskQuery, TaskSort,
};
pub use status::{Priority, TaskStatus};
pub use task::{PersistedTaskData, Task};
