//! Comments and attachments owned by a task.

use super::{AttachmentId, CommentId, TaskDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Free-text note left on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    content: String,
    author_id: UserId,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment timestamped with the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCommentContent`] when the content is
    /// blank.
    pub fn new(
        id: CommentId,
        author_id: UserId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw = content.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyCommentContent);
        }
        Ok(Self {
            id,
            content: raw,
            author_id,
            created_at: clock.utc(),
        })
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the comment body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the author reference.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns when the comment was written.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Metadata for a file uploaded against a task. The file contents live
/// outside this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    file_name: String,
    mime_type: String,
    size_bytes: u64,
    uploaded_by: UserId,
    uploaded_at: DateTime<Utc>,
}

/// Parameter object describing an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type reported by the uploader.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Uploading user.
    pub uploaded_by: UserId,
}

impl Attachment {
    /// Creates attachment metadata timestamped with the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyFileName`] when the file name is blank.
    pub fn new(
        id: AttachmentId,
        upload: AttachmentUpload,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let file_name = upload.file_name.trim();
        if file_name.is_empty() {
            return Err(TaskDomainError::EmptyFileName);
        }
        let mime_type = match upload.mime_type.trim() {
            "" => "application/octet-stream".to_owned(),
            declared => declared.to_owned(),
        };
        Ok(Self {
            id,
            file_name: file_name.to_owned(),
            mime_type,
            size_bytes: upload.size_bytes,
            uploaded_by: upload.uploaded_by,
            uploaded_at: clock.utc(),
        })
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Returns the uploader reference.
    #[must_use]
    pub const fn uploaded_by(&self) -> UserId {
        self.uploaded_by
    }

    /// Returns when the file was uploaded.
    #[must_use]
    pub const fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}
