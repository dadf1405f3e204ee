//! # Prometheus Event Queue
//!
//! A bounded, priority-aware, throttled task scheduler.
//!
//! Callers submit asynchronous operations that are queued in one of two
//! fixed-capacity lanes, dispatched in strict priority order at a bounded rate,
//! and reported back through a per-task handle that settles exactly once.
//!
//! ## Key Features
//!
//! - **Fixed-capacity lanes**: each lane is a [`RingBuffer`](infra::RingBuffer) allocated once;
//!   a full lane rejects the submission immediately instead of growing
//! - **Strict priority**: the high lane is drained before any low-lane task, re-checked on
//!   every dispatch
//! - **Dispatch throttling**: a fixed delay separates dispatch starts; tasks themselves run
//!   concurrently and are never awaited by the loop
//! - **Self-managing loop**: one dispatch loop per queue, started on demand and retired when
//!   both lanes are empty
//! - **Isolated failures**: task errors and panics settle only that task's handle
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prometheus_event_queue::config::QueueConfig;
//! use prometheus_event_queue::core::EventQueue;
//! use prometheus_event_queue::util::Priority;
//! use std::time::Duration;
//!
//! let queue = EventQueue::<String>::new(
//!     QueueConfig::new()
//!         .with_delay(Duration::from_millis(20))
//!         .with_max_size(100)
//!         .with_max_high_priority(10),
//! )?;
//!
//! let report = queue.submit(|| async { Ok("nightly report".to_string()) })?;
//! let alert = queue.submit_with_priority(|| async { Ok("alert".to_string()) }, Priority::High)?;
//!
//! assert_eq!(alert.await?, "alert");
//! assert_eq!(report.await?, "nightly report");
//! ```
//!
//! For complete examples, see `tests/event_queue_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions: event queue, tasks, errors and stats.
pub mod core;
/// Configuration models for event queues.
pub mod config;
/// Builders to construct event queues from configuration.
pub mod builders;
/// Infrastructure adapters for lane storage and completion delivery.
pub mod infra;
/// Runtime adapters for spawning dispatch loops and tasks.
pub mod runtime;
/// Shared utilities.
pub mod util;
