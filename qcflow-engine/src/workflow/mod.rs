//! Job orchestration
//!
//! Drives one job through upload, run, log polling and report retrieval,
//! and owns the state a front-end renders.

mod error;
mod form;
mod view;

pub use error::{RunStep, ValidationError, WorkflowError};
pub use form::RunForm;
pub use view::{PipelineView, ViewState};
