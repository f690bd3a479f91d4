//! Orchestration view
//!
//! `PipelineView` is the single source of truth for one mounted front-end
//! view. It runs the upload/run sequence itself and hands log polling to a
//! [`LogPoller`] that lives exactly as long as the view tracks a running
//! job. Dropping the view unmounts it and stops polling.

use qcflow_core::domain::job::JobStatus;
use qcflow_core::domain::report::ReportIndex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

use super::error::{RunStep, WorkflowError};
use super::form::RunForm;
use crate::repository::PipelineApi;
use crate::scheduler::{LogPoller, PollTarget};
use crate::service::LogBuffer;

/// Everything a front-end renders for the orchestration view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub status: JobStatus,
    pub job_id: Option<String>,
    /// Zero until the run request returns
    pub iteration: u32,
    pub sample_name: String,
    pub logs: LogBuffer,
    pub reports: Option<ReportIndex>,
    /// Set between completion and the end of the report-index request
    pub reports_pending: bool,
    /// Inline error message for the user
    pub error: Option<String>,
}

impl ViewState {
    /// Polling should be active for this state
    pub fn wants_polling(&self) -> bool {
        self.status == JobStatus::Running && self.iteration > 0 && self.job_id.is_some()
    }
}

pub struct PipelineView<A: PipelineApi + 'static> {
    api: Arc<A>,
    state: Arc<watch::Sender<ViewState>>,
    poll_interval: Duration,
    poller: Option<LogPoller>,
}

impl<A: PipelineApi + 'static> PipelineView<A> {
    /// Mounts a new idle view
    pub fn new(api: Arc<A>, poll_interval: Duration) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            api,
            state: Arc::new(state),
            poll_interval,
            poller: None,
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> JobStatus {
        self.state.borrow().status
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|poller| poller.is_active())
    }

    /// Runs the upload/run sequence and starts log polling
    ///
    /// Invalid input is rejected before any network call and leaves the
    /// status unchanged. A failing step aborts the sequence and moves the
    /// view to `Error`; anything already created remotely is abandoned.
    ///
    /// # Returns
    /// The iteration number of the launched run
    pub async fn start_run(&mut self, form: &RunForm) -> Result<u32, WorkflowError> {
        if let Err(err) = self.check_form(form) {
            let message = err.to_string();
            self.state.send_modify(|s| s.error = Some(message));
            return Err(err.into());
        }

        self.stop_polling();
        self.state.send_modify(|s| {
            s.status = JobStatus::Uploading;
            s.job_id = None;
            s.iteration = 0;
            s.sample_name = form.sample_name.clone();
            s.logs.clear();
            s.reports = None;
            s.reports_pending = false;
            s.error = None;
        });

        match self.launch(form).await {
            Ok(iteration) => {
                self.state.send_modify(|s| {
                    s.status = JobStatus::Running;
                    s.iteration = iteration;
                });
                self.sync_polling();
                Ok(iteration)
            }
            Err(err) => {
                error!("Run for sample {} failed: {:#}", form.sample_name, err);
                let message = err.user_message();
                self.state.send_modify(|s| {
                    s.status = JobStatus::Error;
                    s.error = Some(message);
                });
                Err(err)
            }
        }
    }

    /// Ends the view and stops polling; the remote job keeps running regardless
    ///
    /// Subscribers see the state channel close once the poll task is gone.
    pub fn unmount(self) {
        drop(self);
    }

    fn check_form(&self, form: &RunForm) -> Result<(), super::ValidationError> {
        if self.status().is_busy() {
            return Err(super::ValidationError::RunInProgress);
        }
        form.validate().map(|_| ())
    }

    async fn launch(&self, form: &RunForm) -> Result<u32, WorkflowError> {
        let (r1, r2) = form.validate()?;

        let job = self
            .api
            .create_job()
            .await
            .map_err(WorkflowError::remote(RunStep::CreateJob))?;
        info!("Created job {}", job.job_id);
        self.state
            .send_modify(|s| s.job_id = Some(job.job_id.clone()));

        let reads = self
            .api
            .upload_reads(&form.sample_name, r1, r2)
            .await
            .map_err(WorkflowError::remote(RunStep::UploadReads))?;

        let reference_path = match form.reference.as_deref() {
            Some(fasta) => Some(
                self.api
                    .upload_reference(fasta)
                    .await
                    .map_err(WorkflowError::remote(RunStep::UploadReference))?
                    .reference,
            ),
            None => None,
        };

        let request = form.to_request(reads.pattern, reference_path);
        let started = self
            .api
            .run_job(&job.job_id, &request)
            .await
            .map_err(WorkflowError::remote(RunStep::LaunchRun))?;
        info!(
            "Launched {} run of job {} (iteration {})",
            request.stage, job.job_id, started.iteration
        );

        Ok(started.iteration)
    }

    /// Makes the poller match the tracked job and iteration
    ///
    /// Any previous poller is cancelled before a new one starts, so at most
    /// one is ever active.
    fn sync_polling(&mut self) {
        let state = self.state();
        let target = match (&state.job_id, state.wants_polling()) {
            (Some(job_id), true) => PollTarget {
                job_id: job_id.clone(),
                iteration: state.iteration,
                sample: state.sample_name.clone(),
            },
            _ => {
                self.stop_polling();
                return;
            }
        };

        if let Some(poller) = &self.poller {
            if poller.target() == &target && poller.is_active() {
                return;
            }
        }

        self.stop_polling();
        self.poller = Some(LogPoller::spawn(
            Arc::clone(&self.api),
            Arc::clone(&self.state),
            target,
            self.poll_interval,
        ));
    }

    fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.cancel();
        }
    }
}

impl<A: PipelineApi + 'static> Drop for PipelineView<A> {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
