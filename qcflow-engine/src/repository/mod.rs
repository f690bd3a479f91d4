//! Repository layer
//!
//! Repositories abstract communication with the remote services. The
//! orchestration view, poller, report viewer and auth context only see
//! these traits, so they can run against the real HTTP clients or against
//! scripted doubles in tests.

mod auth;
#[cfg(test)]
pub(crate) mod mock;
mod pipeline;

pub use auth::AuthApi;
pub use pipeline::PipelineApi;
