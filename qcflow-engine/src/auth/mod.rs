//! Authentication session
//!
//! An explicitly constructed [`AuthContext`] owns the session of the
//! current user. It is initialised from durable storage (load, then verify
//! against the auth service) and torn down by logging out.

mod context;
mod store;

pub use context::{AuthContext, AuthError};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
