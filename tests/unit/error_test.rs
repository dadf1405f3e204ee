//! Tests for error types

use prometheus_event_queue::core::{SchedulerError, TaskError};

#[test]
fn test_overflow_error() {
    let err = SchedulerError::Overflow {
        capacity: 2,
        requested: 3,
    };
    assert_eq!(format!("{}", err), "ring overflow: capacity 2, requested 3");
}

#[test]
fn test_invalid_priority_error() {
    let err = SchedulerError::InvalidPriority("urgent".to_string());
    assert_eq!(format!("{}", err), "invalid priority: urgent");
}

#[test]
fn test_invalid_config_error() {
    let err = SchedulerError::InvalidConfig("max_size must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: max_size must be greater than 0"
    );
}

#[test]
fn test_task_error_display() {
    let err = TaskError::Failed(anyhow::anyhow!("connection reset"));
    assert_eq!(format!("{}", err), "task failed: connection reset");
    assert!(std::error::Error::source(&err).is_some());

    let err = TaskError::Panicked("boom".to_string());
    assert_eq!(format!("{}", err), "task panicked: boom");
    assert!(err.as_failure().is_none());

    assert_eq!(
        format!("{}", TaskError::Abandoned),
        "task abandoned before completion"
    );
}
