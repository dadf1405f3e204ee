//! Completion notifier backends.

pub mod oneshot;

pub use oneshot::OneshotMailbox;
