//! Infrastructure adapters for lane storage and completion delivery.

pub mod mailbox;
pub mod queue;
pub use mailbox::OneshotMailbox;
pub use queue::RingBuffer;
