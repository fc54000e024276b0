//! Identifier types for the task domain.
//!
//! Every entity is keyed by an opaque UUID wrapper so identifiers of
//! different entities cannot be mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", $label, " identifier.")]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", $label, " identifier from an existing UUID.")]
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a task record.
    TaskId,
    "task"
);

uuid_identifier!(
    /// Unique identifier for a project that owns tasks.
    ProjectId,
    "project"
);

uuid_identifier!(
    /// Unique identifier for a user referenced by tasks, comments, and
    /// attachments.
    UserId,
    "user"
);

uuid_identifier!(
    /// Unique identifier for a task comment.
    CommentId,
    "comment"
);

uuid_identifier!(
    /// Unique identifier for a task attachment.
    AttachmentId,
    "attachment"
);
