//! Error types for scheduler operations.

use thiserror::Error;

/// Structural errors surfaced synchronously to the caller of `submit`.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Target lane (or ring buffer) cannot hold the requested items.
    #[error("ring overflow: capacity {capacity}, requested {requested}")]
    Overflow {
        /// Fixed capacity of the buffer.
        capacity: usize,
        /// Occupancy the push would have required.
        requested: usize,
    },
    /// Priority label is neither `high` nor `low`.
    #[error("invalid priority: {0}")]
    InvalidPriority(String),
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// No runtime available to drive the dispatch loop.
    #[error("runtime unavailable: {0}")]
    Runtime(String),
}

/// Failure delivered asynchronously through a task's own handle.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The task's operation returned an error.
    #[error("task failed: {0}")]
    Failed(#[source] anyhow::Error),
    /// The task's operation panicked while running.
    #[error("task panicked: {0}")]
    Panicked(String),
    /// The completion notifier went away before the task reported back.
    #[error("task abandoned before completion")]
    Abandoned,
}

impl TaskError {
    /// Borrow the underlying error of a failed task, if any.
    #[must_use]
    pub const fn as_failure(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Application-facing result using anyhow for task operations.
pub type AppResult<T> = Result<T, anyhow::Error>;
