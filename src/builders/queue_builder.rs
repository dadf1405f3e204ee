//! Builders to construct event queues from configuration.

use std::collections::HashMap;

use crate::config::SchedulerConfig;
use crate::core::{EventQueue, SchedulerError, Spawn};

/// Build one event queue per named entry of the scheduler configuration.
///
/// Every queue shares the provided spawner but owns its own lanes, running
/// flag and completion registry.
///
/// # Errors
///
/// Returns `SchedulerError::InvalidConfig` if the configuration is invalid.
pub fn build_queues<T, S>(
    cfg: &SchedulerConfig,
    spawner: S,
) -> Result<HashMap<String, EventQueue<T, S>>, SchedulerError>
where
    T: Send + 'static,
    S: Spawn + Clone + Send + Sync + 'static,
{
    cfg.validate().map_err(SchedulerError::InvalidConfig)?;

    let mut queues = HashMap::with_capacity(cfg.queues.len());
    for (name, queue_cfg) in &cfg.queues {
        tracing::debug!(queue = %name, "building event queue");
        let queue = EventQueue::with_spawner(queue_cfg.clone(), spawner.clone())?;
        queues.insert(name.clone(), queue);
    }

    Ok(queues)
}
