//! Tests for utility functions

use prometheus_event_queue::core::SchedulerError;
use prometheus_event_queue::util::{new_task_id, Priority, TaskId};

#[test]
fn test_priority_default_is_low() {
    assert_eq!(Priority::default(), Priority::Low);
}

#[test]
fn test_priority_serde_labels() {
    assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    let parsed: Priority = serde_json::from_str("\"low\"").unwrap();
    assert_eq!(parsed, Priority::Low);
    assert!(serde_json::from_str::<Priority>("\"critical\"").is_err());
}

#[test]
fn test_priority_parse_invalid() {
    let err = "medium".parse::<Priority>().unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidPriority(_)));
}

#[test]
fn test_task_id() {
    let id: TaskId = new_task_id();
    assert!(uuid_like(&id));
}

fn uuid_like(id: &str) -> bool {
    let parts: Vec<_> = id.split('-').map(str::len).collect();
    parts == [8, 4, 4, 4, 12]
}

#[test]
fn test_init_tracing_is_idempotent() {
    prometheus_event_queue::util::init_tracing();
    prometheus_event_queue::util::init_tracing();
    tracing::info!("tracing initialized twice without panicking");
}
