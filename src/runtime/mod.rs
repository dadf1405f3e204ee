//! Runtime adapters for driving dispatch loops.

pub mod tokio_spawner;

pub use tokio_spawner::TokioSpawner;
