//! Data Transfer Objects for the remote services
//!
//! Request and response bodies for the pipeline service and the auth
//! service. Field names follow the wire format of those services.

pub mod auth;
pub mod job;
pub mod report;
