//! Unit tests for individual components

mod config_test;
mod error_test;
mod mailbox_test;
mod ring_buffer_test;
mod util_test;
