//! QCFlow Engine
//!
//! Client-side orchestration of remote QC pipeline runs.
//!
//! Architecture:
//! - Configuration: service endpoints, poll cadence, session location
//! - Repositories: trait seams over the pipeline and auth HTTP clients
//! - Workflow: the upload -> run -> poll -> complete/error state machine
//! - Scheduler: the cancellable log poller of the tracked run
//! - Report: selection and lazy loading of a run's reports
//! - Auth: the explicitly constructed session context and its storage
//!
//! Everything runs on the caller's tokio runtime; the only background task
//! is the log poller, and at most one exists per [`PipelineView`].

pub mod auth;
pub mod config;
pub mod report;
pub mod repository;
pub mod scheduler;
pub mod service;
pub mod workflow;

pub use auth::{AuthContext, AuthError, FileSessionStore, MemorySessionStore, SessionStore};
pub use config::Config;
pub use report::{ReportContent, ReportViewer};
pub use repository::{AuthApi, PipelineApi};
pub use workflow::{PipelineView, RunForm, ViewState, WorkflowError};
