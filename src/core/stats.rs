//! Counters describing queue throughput.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of queue activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Tasks accepted by `submit`.
    pub submitted: u64,
    /// Tasks refused because their lane was full.
    pub rejected: u64,
    /// Tasks taken off a lane and started.
    pub dispatched: u64,
    /// Tasks whose operation returned a value.
    pub completed: u64,
    /// Tasks whose operation failed or panicked.
    pub failed: u64,
    /// Tasks dropped unsettled because their runtime went away.
    pub abandoned: u64,
    /// Tasks waiting in the high-priority lane.
    pub high_queued: usize,
    /// Tasks waiting in the low-priority lane.
    pub low_queued: usize,
    /// Handles still waiting for an outcome.
    pub pending: usize,
    /// Whether a dispatch loop is active.
    pub running: bool,
}

/// Internal counters for queue statistics (thread-safe).
#[derive(Debug, Default)]
pub(crate) struct QueueCounters {
    pub submitted: AtomicU64,
    pub rejected: AtomicU64,
    pub dispatched: AtomicU64,
    pub completed: AtomicU64,
    pub failed: AtomicU64,
    pub abandoned: AtomicU64,
}

impl QueueCounters {
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the counters into a snapshot; lane depths are filled in by the caller.
    pub fn snapshot(&self) -> QueueStats {
        QueueStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            abandoned: self.abandoned.load(Ordering::Relaxed),
            ..QueueStats::default()
        }
    }
}
