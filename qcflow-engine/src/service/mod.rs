//! Service layer
//!
//! Small stateful helpers owned by the orchestration view.

pub mod log_buffer;

pub use log_buffer::LogBuffer;
