//! Tests for configuration validation

use prometheus_event_queue::config::queue::{
    ENV_DELAY_MS, ENV_MAX_HIGH_PRIORITY, ENV_MAX_SIZE,
};
use prometheus_event_queue::config::{QueueConfig, SchedulerConfig};

#[test]
fn test_queue_config_validation() {
    let valid = QueueConfig {
        delay_ms: 10,
        max_size: 100,
        max_high_priority: 10,
    };
    assert!(valid.validate().is_ok());
}

#[test]
fn test_queue_config_invalid_max_size() {
    let invalid = QueueConfig::new().with_max_size(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_queue_config_invalid_max_high_priority() {
    let invalid = QueueConfig::new().with_max_high_priority(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_queue_config_from_json_rejects_zero() {
    assert!(QueueConfig::from_json_str(r#"{ "max_size": 0 }"#).is_err());
    assert!(QueueConfig::from_json_str("not json").is_err());
}

#[test]
fn test_scheduler_config_validation() {
    let mut queues = std::collections::HashMap::new();
    queues.insert("inference".to_string(), QueueConfig::default());

    let config = SchedulerConfig { queues };
    assert!(config.validate().is_ok());
}

#[test]
fn test_scheduler_config_empty_queues() {
    let config = SchedulerConfig {
        queues: std::collections::HashMap::new(),
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_scheduler_config_names_invalid_queue() {
    let mut queues = std::collections::HashMap::new();
    queues.insert("broken".to_string(), QueueConfig::new().with_max_size(0));

    let err = SchedulerConfig { queues }.validate().unwrap_err();
    assert!(err.contains("broken"));
}

#[test]
fn test_scheduler_config_from_json() {
    let json = r#"{
        "queues": {
            "inference": {
                "delay_ms": 5,
                "max_size": 50,
                "max_high_priority": 5
            },
            "webhooks": {}
        }
    }"#;

    let config = SchedulerConfig::from_json_str(json).unwrap();
    assert_eq!(config.queues["inference"].max_size, 50);
    assert_eq!(config.queues["webhooks"], QueueConfig::default());
}

// All environment handling lives in one test to avoid racing other tests.
#[test]
fn test_queue_config_from_env() {
    std::env::set_var(ENV_DELAY_MS, "15");
    std::env::set_var(ENV_MAX_SIZE, "64");
    std::env::remove_var(ENV_MAX_HIGH_PRIORITY);

    let cfg = QueueConfig::from_env().unwrap();
    assert_eq!(cfg.delay_ms, 15);
    assert_eq!(cfg.max_size, 64);
    assert_eq!(cfg.max_high_priority, 10);

    std::env::set_var(ENV_MAX_SIZE, "lots");
    assert!(QueueConfig::from_env().is_err());

    std::env::remove_var(ENV_DELAY_MS);
    std::env::remove_var(ENV_MAX_SIZE);
}
