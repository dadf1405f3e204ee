//! Priority-lane event queue with a throttled dispatch loop.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::config::QueueConfig;
use crate::core::stats::QueueCounters;
use crate::core::{AppResult, Job, QueueStats, SchedulerError, TaskError};
use crate::infra::mailbox::oneshot::TaskOutcome;
use crate::infra::{OneshotMailbox, RingBuffer};
use crate::runtime::TokioSpawner;
use crate::util::serde::{new_task_id, Priority, TaskId};

/// Abstraction for spawning work on a runtime.
pub trait Spawn {
    /// Spawn a detached future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

type Operation<T> = Box<dyn FnOnce() -> BoxFuture<'static, AppResult<T>> + Send>;

/// A queued unit of work and the id its outcome is routed by.
struct Task<T> {
    id: TaskId,
    exec: Operation<T>,
}

/// Both lanes plus the running flag, guarded together so that push +
/// ensure-running and take + go-idle are each a single critical section.
struct Lanes<T> {
    high: RingBuffer<Task<T>>,
    low: RingBuffer<Task<T>>,
    running: bool,
}

impl<T> Lanes<T> {
    fn lane_mut(&mut self, priority: Priority) -> &mut RingBuffer<Task<T>> {
        match priority {
            Priority::High => &mut self.high,
            Priority::Low => &mut self.low,
        }
    }

    fn lane(&self, priority: Priority) -> &RingBuffer<Task<T>> {
        match priority {
            Priority::High => &self.high,
            Priority::Low => &self.low,
        }
    }

    /// Head of the high lane, else head of the low lane.
    fn next(&mut self) -> Option<(Task<T>, Priority)> {
        self.high
            .shift()
            .map(|task| (task, Priority::High))
            .or_else(|| self.low.shift().map(|task| (task, Priority::Low)))
    }
}

struct Shared<T> {
    lanes: Mutex<Lanes<T>>,
    mailbox: Mutex<OneshotMailbox<T>>,
    counters: QueueCounters,
    delay: Duration,
}

/// Future resolving to the outcome of one submitted task.
///
/// Dropping the handle does not cancel the task; its outcome is discarded.
#[must_use = "the task still runs, but its outcome is lost unless the handle is awaited"]
pub struct TaskHandle<T> {
    id: TaskId,
    rx: oneshot::Receiver<TaskOutcome<T>>,
}

impl<T> TaskHandle<T> {
    /// Identifier assigned at submission.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T, TaskError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or_else(|_| Err(TaskError::Abandoned)))
    }
}

impl<T> std::fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle").field("id", &self.id).finish()
    }
}

/// Bounded, priority-aware, throttled task scheduler.
///
/// Tasks land in one of two fixed-capacity lanes. A single dispatch loop per
/// queue drains the high lane before the low lane, starts each task without
/// waiting for it, then sleeps for the configured delay. The loop exits when
/// both lanes are empty and the next submission starts a new one.
///
/// # Example
///
/// ```rust,ignore
/// use prometheus_event_queue::config::QueueConfig;
/// use prometheus_event_queue::core::EventQueue;
/// use prometheus_event_queue::util::Priority;
///
/// let queue = EventQueue::<u32>::new(QueueConfig::new().with_max_size(50))?;
/// let low = queue.submit(|| async { Ok(1) })?;
/// let high = queue.submit_with_priority(|| async { Ok(2) }, Priority::High)?;
/// assert_eq!(high.await?, 2);
/// assert_eq!(low.await?, 1);
/// ```
pub struct EventQueue<T, S = TokioSpawner> {
    config: QueueConfig,
    shared: Arc<Shared<T>>,
    spawner: S,
}

impl<T, S: Clone> Clone for EventQueue<T, S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            shared: Arc::clone(&self.shared),
            spawner: self.spawner.clone(),
        }
    }
}

impl<T> EventQueue<T, TokioSpawner>
where
    T: Send + 'static,
{
    /// Create a queue that dispatches on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::InvalidConfig` if the configuration is invalid
    /// - `SchedulerError::Runtime` if called outside a Tokio runtime
    pub fn new(config: QueueConfig) -> Result<Self, SchedulerError> {
        Self::with_spawner(config, TokioSpawner::try_current()?)
    }
}

impl<T, S> EventQueue<T, S>
where
    T: Send + 'static,
    S: Spawn + Clone + Send + Sync + 'static,
{
    /// Create a queue that dispatches through the given spawner.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` if the configuration is invalid.
    pub fn with_spawner(config: QueueConfig, spawner: S) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;

        let shared = Shared {
            lanes: Mutex::new(Lanes {
                high: RingBuffer::new(config.max_high_priority),
                low: RingBuffer::new(config.max_size),
                running: false,
            }),
            mailbox: Mutex::new(OneshotMailbox::new()),
            counters: QueueCounters::default(),
            delay: config.delay(),
        };

        info!(
            delay_ms = config.delay_ms,
            max_size = config.max_size,
            max_high_priority = config.max_high_priority,
            "EventQueue initialized"
        );

        Ok(Self {
            config,
            shared: Arc::new(shared),
            spawner,
        })
    }

    /// Submit a low-priority task.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Overflow` if the low lane is full.
    pub fn submit<F, Fut>(&self, exec: F) -> Result<TaskHandle<T>, SchedulerError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        self.submit_with_priority(exec, Priority::default())
    }

    /// Submit a task using a textual priority (`"high"` or `"low"`).
    ///
    /// # Errors
    ///
    /// - `SchedulerError::InvalidPriority` for any other label; nothing is queued
    /// - `SchedulerError::Overflow` if the target lane is full
    pub fn submit_labeled<F, Fut>(
        &self,
        exec: F,
        priority: &str,
    ) -> Result<TaskHandle<T>, SchedulerError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let priority = priority.parse::<Priority>().inspect_err(|_| {
            warn!(priority, "rejected submission with unknown priority");
        })?;
        self.submit_with_priority(exec, priority)
    }

    /// Submit a [`Job`] on the given lane.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Overflow` if the target lane is full.
    pub fn submit_job<J>(&self, job: J, priority: Priority) -> Result<TaskHandle<T>, SchedulerError>
    where
        J: Job<T>,
    {
        debug!(job = job.name(), %priority, "submitting job");
        self.submit_with_priority(move || job.run(), priority)
    }

    /// Submit a task on the given lane.
    ///
    /// Returns immediately; the handle settles once the task has been
    /// dispatched and its operation has finished.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Overflow` if the target lane is full. The task
    /// is not queued and no subscriber is left behind.
    pub fn submit_with_priority<F, Fut>(
        &self,
        exec: F,
        priority: Priority,
    ) -> Result<TaskHandle<T>, SchedulerError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let id = new_task_id();
        let rx = self.shared.mailbox.lock().register(id.clone());
        let task = Task {
            id: id.clone(),
            exec: Box::new(move || exec().boxed()),
        };

        let start_loop = {
            let mut lanes = self.shared.lanes.lock();
            let pushed = lanes.lane_mut(priority).push(task);
            let depth = match pushed {
                Ok(depth) => depth,
                Err(err) => {
                    drop(lanes);
                    self.shared.mailbox.lock().withdraw(&id);
                    QueueCounters::bump(&self.shared.counters.rejected);
                    warn!(task_id = %id, %priority, "lane full, task rejected");
                    return Err(err);
                }
            };
            debug!(task_id = %id, %priority, depth, "task enqueued");
            !std::mem::replace(&mut lanes.running, true)
        };

        QueueCounters::bump(&self.shared.counters.submitted);
        if start_loop {
            self.start_dispatch_loop();
        }

        Ok(TaskHandle { id, rx })
    }

    fn start_dispatch_loop(&self) {
        debug!("starting dispatch loop");
        let guard = LoopGuard {
            shared: Arc::clone(&self.shared),
            idle: false,
        };
        let spawner = self.spawner.clone();
        self.spawner.spawn(Self::dispatch_loop(guard, spawner));
    }

    async fn dispatch_loop(mut guard: LoopGuard<T>, spawner: S) {
        let shared = Arc::clone(&guard.shared);
        loop {
            let next = {
                let mut lanes = shared.lanes.lock();
                let next = lanes.next();
                if next.is_none() {
                    lanes.running = false;
                    guard.idle = true;
                }
                next
            };
            let Some((task, priority)) = next else {
                break;
            };

            debug!(task_id = %task.id, %priority, "dispatching task");
            QueueCounters::bump(&shared.counters.dispatched);
            Self::dispatch(&shared, &spawner, task);

            if shared.delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(shared.delay).await;
            }
        }
        debug!("lanes drained, dispatch loop idle");
    }

    /// Invoke a task's operation and detach the future it returns.
    ///
    /// The operation is called on the loop itself, so the call marks the
    /// dispatch instant; only the returned future runs independently.
    fn dispatch(shared: &Arc<Shared<T>>, spawner: &S, task: Task<T>) {
        let Task { id, exec } = task;

        let fut = match std::panic::catch_unwind(AssertUnwindSafe(exec)) {
            Ok(fut) => fut,
            Err(panic) => {
                shared.settle(&id, Err(panic));
                return;
            }
        };

        let settlement = Settlement {
            shared: Arc::clone(shared),
            id: Some(id),
        };
        spawner.spawn(async move {
            let result = AssertUnwindSafe(fut).catch_unwind().await;
            settlement.settle(result);
        });
    }
}

impl<T> Shared<T> {
    /// Route a finished operation to its one subscriber.
    fn settle(&self, id: &TaskId, result: Result<AppResult<T>, Box<dyn Any + Send>>) {
        let outcome = match result {
            Ok(Ok(value)) => {
                QueueCounters::bump(&self.counters.completed);
                debug!(task_id = %id, "task completed");
                Ok(value)
            }
            Ok(Err(err)) => {
                QueueCounters::bump(&self.counters.failed);
                warn!(task_id = %id, error = %err, "task failed");
                Err(TaskError::Failed(err))
            }
            Err(panic) => {
                QueueCounters::bump(&self.counters.failed);
                let message = panic_message(panic.as_ref());
                error!(task_id = %id, panic = %message, "task panicked");
                Err(TaskError::Panicked(message))
            }
        };
        self.deliver(id, outcome);
    }

    /// Settle a task whose future was dropped before it could finish.
    fn abandon(&self, id: &TaskId) {
        QueueCounters::bump(&self.counters.abandoned);
        warn!(task_id = %id, "task abandoned before settling");
        self.deliver(id, Err(TaskError::Abandoned));
    }

    /// Mark the loop idle and abandon everything still queued.
    fn abandon_queued(&self) {
        let orphaned: Vec<Task<T>> = {
            let mut lanes = self.lanes.lock();
            lanes.running = false;
            std::iter::from_fn(|| lanes.next())
                .map(|(task, _)| task)
                .collect()
        };
        warn!(orphaned = orphaned.len(), "dispatch loop dropped before lanes drained");
        for task in orphaned {
            self.abandon(&task.id);
        }
    }

    fn deliver(&self, id: &TaskId, outcome: TaskOutcome<T>) {
        if !self.mailbox.lock().deliver(id, outcome) {
            debug!(task_id = %id, "outcome discarded, handle dropped");
        }
    }
}

/// Owned by a dispatch loop future. If that future is dropped before the
/// lanes drain (its runtime shut down), queued tasks are abandoned and the
/// running flag is cleared so a later submit can start a fresh loop.
struct LoopGuard<T> {
    shared: Arc<Shared<T>>,
    idle: bool,
}

impl<T> Drop for LoopGuard<T> {
    fn drop(&mut self) {
        if !self.idle {
            self.shared.abandon_queued();
        }
    }
}

/// Pending settlement for one dispatched task; abandons the task if dropped
/// without settling.
struct Settlement<T> {
    shared: Arc<Shared<T>>,
    id: Option<TaskId>,
}

impl<T> Settlement<T> {
    fn settle(mut self, result: Result<AppResult<T>, Box<dyn Any + Send>>) {
        if let Some(id) = self.id.take() {
            self.shared.settle(&id, result);
        }
    }
}

impl<T> Drop for Settlement<T> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.shared.abandon(&id);
        }
    }
}

impl<T, S> EventQueue<T, S> {
    /// Configuration fixed at construction.
    #[must_use]
    pub const fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Whether a dispatch loop is currently active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.lanes.lock().running
    }

    /// Tasks waiting across both lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        let lanes = self.shared.lanes.lock();
        lanes.high.len() + lanes.low.len()
    }

    /// Whether both lanes are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tasks waiting in one lane.
    #[must_use]
    pub fn lane_len(&self, priority: Priority) -> usize {
        self.shared.lanes.lock().lane(priority).len()
    }

    /// Handles registered but not yet settled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.shared.mailbox.lock().pending()
    }

    /// Snapshot of counters and lane depths.
    #[must_use]
    pub fn stats(&self) -> QueueStats {
        let mut stats = self.shared.counters.snapshot();
        {
            let lanes = self.shared.lanes.lock();
            stats.high_queued = lanes.high.len();
            stats.low_queued = lanes.low.len();
            stats.running = lanes.running;
        }
        stats.pending = self.pending();
        stats
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
