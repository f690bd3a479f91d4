//! Pipeline service repository

use async_trait::async_trait;
use qcflow_client::{PipelineClient, Result};
use qcflow_core::domain::job::RunRequest;
use qcflow_core::domain::log::LogChunk;
use qcflow_core::domain::report::ReportIndex;
use qcflow_core::domain::summary::QcSummary;
use qcflow_core::dto::job::{CreatedJob, RunStarted, UploadedReads, UploadedReference};
use std::path::Path;

/// Operations the orchestration view needs from the pipeline service
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Requests a new job identifier
    async fn create_job(&self) -> Result<CreatedJob>;

    /// Uploads the paired read files tagged with the sample name
    async fn upload_reads(&self, sample: &str, r1: &Path, r2: &Path) -> Result<UploadedReads>;

    /// Uploads a reference genome
    async fn upload_reference(&self, fasta: &Path) -> Result<UploadedReference>;

    /// Launches a run and returns its iteration number
    async fn run_job(&self, job_id: &str, req: &RunRequest) -> Result<RunStarted>;

    /// Fetches the log text produced since the last poll
    async fn get_logs(&self, job_id: &str, iteration: u32) -> Result<LogChunk>;

    /// Lists the reports of a finished run
    async fn get_reports(&self, job_id: &str, iteration: u32, sample: &str)
    -> Result<ReportIndex>;

    /// Fetches and parses a structured QC summary artifact
    async fn fetch_qc_summary(&self, artifact: &str) -> Result<QcSummary>;

    /// Absolute URL of a server-relative artifact
    fn artifact_url(&self, artifact: &str) -> String;
}

#[async_trait]
impl PipelineApi for PipelineClient {
    async fn create_job(&self) -> Result<CreatedJob> {
        PipelineClient::create_job(self).await
    }

    async fn upload_reads(&self, sample: &str, r1: &Path, r2: &Path) -> Result<UploadedReads> {
        PipelineClient::upload_reads(self, sample, r1, r2).await
    }

    async fn upload_reference(&self, fasta: &Path) -> Result<UploadedReference> {
        PipelineClient::upload_reference(self, fasta).await
    }

    async fn run_job(&self, job_id: &str, req: &RunRequest) -> Result<RunStarted> {
        PipelineClient::run_job(self, job_id, req).await
    }

    async fn get_logs(&self, job_id: &str, iteration: u32) -> Result<LogChunk> {
        PipelineClient::get_logs(self, job_id, iteration).await
    }

    async fn get_reports(
        &self,
        job_id: &str,
        iteration: u32,
        sample: &str,
    ) -> Result<ReportIndex> {
        PipelineClient::get_reports(self, job_id, iteration, sample).await
    }

    async fn fetch_qc_summary(&self, artifact: &str) -> Result<QcSummary> {
        PipelineClient::fetch_qc_summary(self, artifact).await
    }

    fn artifact_url(&self, artifact: &str) -> String {
        PipelineClient::artifact_url(self, artifact)
    }
}
