//! Scheduler layer
//!
//! Timer-driven work of the orchestration view. The only scheduled task is
//! the log poller of the run currently being tracked.

pub mod poller;

pub use poller::{LogPoller, PollTarget};
