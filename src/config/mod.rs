//! Configuration models for event queues.

pub mod queue;

pub use queue::{QueueConfig, SchedulerConfig};
