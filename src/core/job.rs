//! Trait for submitting structured jobs instead of bare closures.

use async_trait::async_trait;

use super::AppResult;

/// A unit of asynchronous work that can be queued on an [`EventQueue`](super::EventQueue).
///
/// Closures cover most callers; implement `Job` when the work carries its own
/// state and a name worth keeping in logs.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use prometheus_event_queue::core::{AppResult, Job};
///
/// struct Embed {
///     text: String,
/// }
///
/// #[async_trait]
/// impl Job<usize> for Embed {
///     async fn run(self) -> AppResult<usize> {
///         Ok(self.text.len())
///     }
/// }
/// ```
#[async_trait]
pub trait Job<T>: Send + 'static
where
    T: Send + 'static,
{
    /// Short label recorded in dispatch logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Run the job to completion, consuming it.
    async fn run(self) -> AppResult<T>;
}
