//! Event queue and scheduler configuration structures.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`QueueConfig::delay_ms`].
pub const ENV_DELAY_MS: &str = "EVENT_QUEUE_DELAY_MS";
/// Environment variable overriding [`QueueConfig::max_size`].
pub const ENV_MAX_SIZE: &str = "EVENT_QUEUE_MAX_SIZE";
/// Environment variable overriding [`QueueConfig::max_high_priority`].
pub const ENV_MAX_HIGH_PRIORITY: &str = "EVENT_QUEUE_MAX_HIGH_PRIORITY";

const DEFAULT_DELAY_MS: u64 = 0;
const DEFAULT_MAX_SIZE: usize = 100;
const DEFAULT_MAX_HIGH_PRIORITY: usize = 10;

const fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

const fn default_max_size() -> usize {
    DEFAULT_MAX_SIZE
}

const fn default_max_high_priority() -> usize {
    DEFAULT_MAX_HIGH_PRIORITY
}

/// Settings for a single event queue, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Throttle between successive dispatches, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Capacity of the low-priority lane.
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Capacity of the high-priority lane.
    #[serde(default = "default_max_high_priority")]
    pub max_high_priority: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            max_size: DEFAULT_MAX_SIZE,
            max_high_priority: DEFAULT_MAX_HIGH_PRIORITY,
        }
    }
}

impl QueueConfig {
    /// Configuration with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dispatch throttle delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the low-priority lane capacity.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the high-priority lane capacity.
    #[must_use]
    pub const fn with_max_high_priority(mut self, max_high_priority: usize) -> Self {
        self.max_high_priority = max_high_priority;
        self
    }

    /// Throttle delay as a [`Duration`].
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Validate queue configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_size == 0 {
            return Err("max_size must be greater than 0".into());
        }
        if self.max_high_priority == 0 {
            return Err("max_high_priority must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse queue configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the process environment.
    ///
    /// A `.env` file is loaded first when present; a malformed one is an error.
    /// Unset variables keep their defaults; set but unparsable ones are an error.
    pub fn from_env() -> Result<Self, String> {
        check_dotenv(dotenvy::dotenv())?;
        let mut cfg = Self::default();
        if let Some(delay_ms) = read_env(ENV_DELAY_MS)? {
            cfg.delay_ms = delay_ms;
        }
        if let Some(max_size) = read_env(ENV_MAX_SIZE)? {
            cfg.max_size = max_size;
        }
        if let Some(max_high_priority) = read_env(ENV_MAX_HIGH_PRIORITY)? {
            cfg.max_high_priority = max_high_priority;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Accept a loaded or missing `.env` file; reject anything else.
fn check_dotenv<P>(loaded: dotenvy::Result<P>) -> Result<(), String> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(format!(".env: {e}")),
    }
}

fn read_env<V: std::str::FromStr>(key: &str) -> Result<Option<V>, String>
where
    V::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("{key}={raw:?}: {e}")),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(format!("{key}: {e}")),
    }
}

/// Root configuration for a set of named event queues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Map of queue name to configuration.
    pub queues: HashMap<String, QueueConfig>,
}

impl SchedulerConfig {
    /// Validate all queues and ensure at least one queue exists.
    pub fn validate(&self) -> Result<(), String> {
        if self.queues.is_empty() {
            return Err("at least one queue must be defined".into());
        }
        for (name, queue) in &self.queues {
            queue
                .validate()
                .map_err(|e| format!("queue `{name}` invalid: {e}"))?;
        }
        Ok(())
    }

    /// Parse scheduler configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
