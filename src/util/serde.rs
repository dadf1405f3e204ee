//! Serializable identifiers and priority labels shared across the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::SchedulerError;

/// Globally unique task identifier (UUID v4 string form).
pub type TaskId = String;

/// Generate a fresh task identifier.
#[must_use]
pub fn new_task_id() -> TaskId {
    uuid::Uuid::new_v4().to_string()
}

/// Lane selection for a submitted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Drained before any low-priority task on every dispatch.
    High,
    /// Default lane.
    #[default]
    Low,
}

impl Priority {
    /// Lowercase label used in configuration and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            other => Err(SchedulerError::InvalidPriority(other.to_string())),
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = SchedulerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
