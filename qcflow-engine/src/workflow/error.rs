//! Orchestration errors

use qcflow_client::ClientError;
use thiserror::Error;

/// Message shown when a failed call carries no detail of its own
pub const GENERIC_ERROR: &str = "An error occurred";

/// Missing or inconsistent run input, caught before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide sample name and read files.")]
    MissingInputs,

    #[error("Reference file is required for full stage.")]
    MissingReference,

    #[error("Reference file must be a FASTA file (.fa, .fna or .fasta).")]
    InvalidReference,

    #[error("A run is already in progress.")]
    RunInProgress,
}

/// Step of the run sequence that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStep {
    CreateJob,
    UploadReads,
    UploadReference,
    LaunchRun,
}

impl RunStep {
    pub fn describe(&self) -> &'static str {
        match self {
            RunStep::CreateJob => "create job",
            RunStep::UploadReads => "upload reads",
            RunStep::UploadReference => "upload reference",
            RunStep::LaunchRun => "launch run",
        }
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to {}: {source}", step.describe())]
    Remote {
        step: RunStep,
        #[source]
        source: ClientError,
    },
}

impl WorkflowError {
    pub(crate) fn remote(step: RunStep) -> impl FnOnce(ClientError) -> Self {
        move |source| WorkflowError::Remote { step, source }
    }

    /// Message for the user: the server's detail when it sent one
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::Validation(err) => err.to_string(),
            WorkflowError::Remote { source, .. } => match source {
                ClientError::FileRead { .. } => source.to_string(),
                _ => source.detail().unwrap_or_else(|| GENERIC_ERROR.to_string()),
            },
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, WorkflowError::Validation(_))
    }
}
