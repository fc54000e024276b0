//! Task status and priority enumerations.

use super::{ParsePriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a task.
///
/// Any status may follow any other; the only rule attached to a status
/// change is the completion timestamp bookkeeping done by
/// [`super::Task::transition_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    ToDo,
    /// Work is under way.
    InProgress,
    /// Work is awaiting review.
    InReview,
    /// Work is finished.
    Completed,
    /// Work cannot proceed.
    Blocked,
}

impl TaskStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 5] = [
        Self::ToDo,
        Self::InProgress,
        Self::InReview,
        Self::Completed,
        Self::Blocked,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "to_do",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
        }
    }

    /// Returns the human-readable label shown by clients.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::InReview => "In Review",
            Self::Completed => "Completed",
            Self::Blocked => "Blocked",
        }
    }

    /// Returns `true` for the status that carries a completion timestamp.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    /// Accepts the storage form (`in_progress`), the label form
    /// (`In Progress`), and the compact form (`inprogress`).
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "todo" => Ok(Self::ToDo),
            "inprogress" => Ok(Self::InProgress),
            "inreview" => Ok(Self::InReview),
            "completed" | "done" => Ok(Self::Completed),
            "blocked" => Ok(Self::Blocked),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Relative importance of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal importance.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns the severity rank used for ordering (`Low` = 1, `High` = 3).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Returns the priority with the given severity rank.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
