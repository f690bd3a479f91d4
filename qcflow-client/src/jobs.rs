//! Job-related API endpoints

use qcflow_core::domain::job::RunRequest;
use qcflow_core::domain::log::LogChunk;
use qcflow_core::dto::job::{CreatedJob, RunStarted};
use reqwest::multipart::Form;
use tracing::debug;

use crate::error::Result;
use crate::{PipelineClient, handle_response};

impl PipelineClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Request a new job identifier
    ///
    /// # Example
    /// ```no_run
    /// # use qcflow_client::PipelineClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = PipelineClient::new("http://localhost:8000");
    /// let job = client.create_job().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_job(&self) -> Result<CreatedJob> {
        let url = format!("{}/jobs", self.base_url);
        let response = self.post(&url).send().await?;

        handle_response(response).await
    }

    /// Launch a pipeline run for a job
    ///
    /// # Arguments
    /// * `job_id` - The job identifier returned by [`create_job`](Self::create_job)
    /// * `req` - Stage, thresholds and the server-side input references
    ///
    /// # Returns
    /// The iteration number assigned to this run
    pub async fn run_job(&self, job_id: &str, req: &RunRequest) -> Result<RunStarted> {
        let url = self.endpoint(&["jobs", job_id, "run"])?;

        let form = req
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        debug!("Launching {} run for job {}", req.stage, job_id);
        let response = self.post(url).multipart(form).send().await?;

        handle_response(response).await
    }

    // =============================================================================
    // Job Logs
    // =============================================================================

    /// Fetch the log text produced since the previous poll
    ///
    /// # Arguments
    /// * `job_id` - The job identifier
    /// * `iteration` - The run within the job
    pub async fn get_logs(&self, job_id: &str, iteration: u32) -> Result<LogChunk> {
        let url = self.endpoint(&["jobs", job_id, "logs", &iteration.to_string()])?;
        let response = self.get(url).send().await?;

        handle_response(response).await
    }
}
