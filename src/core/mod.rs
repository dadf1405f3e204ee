//! Core scheduling abstractions: the event queue, its tasks and errors.

pub mod error;
pub mod event_queue;
pub mod job;
pub mod stats;

pub use error::{AppResult, SchedulerError, TaskError};
pub use event_queue::{EventQueue, Spawn, TaskHandle};
pub use job::Job;
pub use stats::QueueStats;
