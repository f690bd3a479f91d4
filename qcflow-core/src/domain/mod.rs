//! Core domain types
//!
//! This module contains the structures the orchestration view works with.
//! They describe what the remote pipeline service produces (log chunks,
//! report indexes, QC summaries) and the client-side lifecycle around it.

pub mod job;
pub mod log;
pub mod report;
pub mod session;
pub mod summary;
