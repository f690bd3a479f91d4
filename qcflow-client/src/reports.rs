//! Report and health endpoints

use qcflow_core::domain::report::ReportIndex;
use qcflow_core::domain::summary::QcSummary;
use qcflow_core::dto::job::HealthStatus;
use qcflow_core::dto::report::ReportIndexResponse;

use crate::error::Result;
use crate::{PipelineClient, handle_response};

impl PipelineClient {
    /// Check that the pipeline service is up
    pub async fn check_health(&self) -> Result<HealthStatus> {
        let url = format!("{}/", self.base_url);
        let response = self.get(&url).send().await?;

        handle_response(response).await
    }

    /// List the reports produced by a finished run
    ///
    /// # Arguments
    /// * `job_id` - The job identifier
    /// * `iteration` - The run within the job
    /// * `sample` - The sample name the reads were uploaded under
    pub async fn get_reports(
        &self,
        job_id: &str,
        iteration: u32,
        sample: &str,
    ) -> Result<ReportIndex> {
        let url = self.endpoint(&["qc", job_id, &iteration.to_string(), sample])?;
        let response = self.get(url).send().await?;

        let listing: ReportIndexResponse = handle_response(response).await?;
        Ok(listing.reports)
    }

    /// Fetch and parse a structured QC summary artifact
    ///
    /// # Arguments
    /// * `artifact` - Server-relative artifact URL from a [`ReportIndex`]
    pub async fn fetch_qc_summary(&self, artifact: &str) -> Result<QcSummary> {
        let url = self.artifact_url(artifact);
        let response = self.get(&url).send().await?;

        handle_response(response).await
    }
}
