//! Validated effort estimate.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative, finite number of hours a task is expected to take.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EstimatedHours(f64);

impl EstimatedHours {
    /// Creates a validated estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidEstimate`] for NaN or infinite values
    /// and [`TaskDomainError::NegativeEstimate`] for values below zero.
    pub fn new(hours: f64) -> Result<Self, TaskDomainError> {
        if !hours.is_finite() {
            return Err(TaskDomainError::InvalidEstimate(hours.to_string()));
        }
        if hours < 0.0 {
            return Err(TaskDomainError::NegativeEstimate(hours.to_string()));
        }
        Ok(Self(hours))
    }

    /// Returns the number of hours.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for EstimatedHours {
    type Error = TaskDomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for EstimatedHours {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hours = f64::deserialize(deserializer)?;
        Self::new(hours).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EstimatedHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.0)
    }
}
