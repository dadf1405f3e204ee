//! One-shot completion registry keyed by task id.

use std::collections::HashMap;

use tokio::sync::oneshot;

use crate::core::TaskError;
use crate::util::serde::TaskId;

/// Outcome routed to a task's subscriber.
pub type TaskOutcome<T> = Result<T, TaskError>;

/// Registry mapping each task id to exactly one pending subscriber.
///
/// Entries are removed when they fire, so a second delivery for the same id
/// finds nothing and is ignored.
pub struct OneshotMailbox<T> {
    subscribers: HashMap<TaskId, oneshot::Sender<TaskOutcome<T>>>,
}

impl<T> OneshotMailbox<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    /// Register the single subscriber for `id` and return its receiving end.
    ///
    /// Registering an id twice replaces the earlier subscriber, whose receiver
    /// then observes a closed channel.
    pub fn register(&mut self, id: TaskId) -> oneshot::Receiver<TaskOutcome<T>> {
        let (tx, rx) = oneshot::channel();
        if self.subscribers.insert(id, tx).is_some() {
            tracing::warn!("replaced an existing completion subscriber");
        }
        rx
    }

    /// Drop the subscriber for `id` without firing it.
    pub fn withdraw(&mut self, id: &TaskId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    /// Fire the subscriber for `id` once and discard it.
    ///
    /// Returns `false` when no subscriber was registered or the receiving
    /// handle had already been dropped.
    pub fn deliver(&mut self, id: &TaskId, outcome: TaskOutcome<T>) -> bool {
        let Some(tx) = self.subscribers.remove(id) else {
            tracing::debug!(task_id = %id, "no subscriber registered for outcome");
            return false;
        };
        tx.send(outcome).is_ok()
    }

    /// Subscribers registered but not yet fired.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T> Default for OneshotMailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}
