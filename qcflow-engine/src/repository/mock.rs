//! Scripted repository doubles for tests

use async_trait::async_trait;
use qcflow_client::{ClientError, Result};
use qcflow_core::domain::job::RunRequest;
use qcflow_core::domain::log::LogChunk;
use qcflow_core::domain::report::ReportIndex;
use qcflow_core::domain::summary::QcSummary;
use qcflow_core::dto::auth::{AuthResponse, TokenVerifyResponse};
use qcflow_core::dto::job::{CreatedJob, RunStarted, UploadedReads, UploadedReference};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Mutex;

use super::{AuthApi, PipelineApi};

fn scripted_failure(op: &str) -> ClientError {
    ClientError::api_error(500, format!(r#"{{"detail":"{} failed"}}"#, op))
}

/// Pipeline service double recording every call it receives
pub(crate) struct MockPipeline {
    calls: Mutex<Vec<String>>,
    failing: Option<&'static str>,
    job_id: String,
    pattern: String,
    reference: String,
    iteration: u32,
    last_run: Mutex<Option<RunRequest>>,
    /// `None` entries fail; an exhausted script keeps answering "not done"
    log_script: Mutex<VecDeque<Option<LogChunk>>>,
    reports: Option<ReportIndex>,
    summaries: HashMap<String, String>,
}

impl MockPipeline {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: None,
            job_id: "J1".to_string(),
            pattern: "sampleA_R{1,2}.fastq".to_string(),
            reference: "ref.fa".to_string(),
            iteration: 3,
            last_run: Mutex::new(None),
            log_script: Mutex::new(VecDeque::new()),
            reports: Some(ReportIndex::default()),
            summaries: HashMap::new(),
        }
    }

    pub fn failing_at(mut self, op: &'static str) -> Self {
        self.failing = Some(op);
        self
    }

    pub fn with_logs(self, script: Vec<Option<LogChunk>>) -> Self {
        *self.log_script.lock().unwrap() = script.into();
        self
    }

    pub fn with_reports(mut self, reports: ReportIndex) -> Self {
        self.reports = Some(reports);
        self
    }

    pub fn without_reports(mut self) -> Self {
        self.reports = None;
        self
    }

    pub fn with_summary(mut self, artifact: &str, body: &str) -> Self {
        self.summaries.insert(artifact.to_string(), body.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == op).count()
    }

    pub fn last_run(&self) -> Option<RunRequest> {
        self.last_run.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(op.to_string());
        match self.failing {
            Some(failing) if failing == op => Err(scripted_failure(op)),
            _ => Ok(()),
        }
    }
}

pub(crate) fn chunk(logs: &str, done: bool) -> Option<LogChunk> {
    Some(LogChunk {
        logs: logs.to_string(),
        done,
    })
}

#[async_trait]
impl PipelineApi for MockPipeline {
    async fn create_job(&self) -> Result<CreatedJob> {
        self.record("create_job")?;
        Ok(CreatedJob {
            job_id: self.job_id.clone(),
        })
    }

    async fn upload_reads(&self, _sample: &str, _r1: &Path, _r2: &Path) -> Result<UploadedReads> {
        self.record("upload_reads")?;
        Ok(UploadedReads {
            pattern: self.pattern.clone(),
            sample: None,
            files: Vec::new(),
        })
    }

    async fn upload_reference(&self, _fasta: &Path) -> Result<UploadedReference> {
        self.record("upload_reference")?;
        Ok(UploadedReference {
            reference: self.reference.clone(),
        })
    }

    async fn run_job(&self, _job_id: &str, req: &RunRequest) -> Result<RunStarted> {
        self.record("run_job")?;
        *self.last_run.lock().unwrap() = Some(req.clone());
        Ok(RunStarted {
            iteration: self.iteration,
            job_id: None,
            stage: None,
        })
    }

    async fn get_logs(&self, _job_id: &str, _iteration: u32) -> Result<LogChunk> {
        self.record("get_logs")?;
        match self.log_script.lock().unwrap().pop_front() {
            Some(Some(chunk)) => Ok(chunk),
            Some(None) => Err(scripted_failure("get_logs")),
            None => Ok(LogChunk::default()),
        }
    }

    async fn get_reports(&self, _job_id: &str, _iteration: u32, _sample: &str) -> Result<ReportIndex> {
        self.record("get_reports")?;
        self.reports
            .clone()
            .ok_or_else(|| ClientError::api_error(404, r#"{"detail":"No QC reports found for sample"}"#))
    }

    async fn fetch_qc_summary(&self, artifact: &str) -> Result<QcSummary> {
        self.record("fetch_qc_summary")?;
        let body = self
            .summaries
            .get(artifact)
            .ok_or_else(|| ClientError::api_error(404, r#"{"detail":"Report not found"}"#))?;
        serde_json::from_str(body).map_err(|e| ClientError::ParseError(e.to_string()))
    }

    fn artifact_url(&self, artifact: &str) -> String {
        format!("http://pipeline.test{}", artifact)
    }
}

/// Auth service double
pub(crate) struct MockAuth {
    calls: Mutex<Vec<String>>,
    /// `None` makes verification fail at the transport level
    verify: Option<TokenVerifyResponse>,
    reject_credentials: bool,
}

impl MockAuth {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            verify: Some(TokenVerifyResponse {
                valid: true,
                email: Some("ann@example.org".to_string()),
                username: Some("ann".to_string()),
            }),
            reject_credentials: false,
        }
    }

    pub fn with_verify(mut self, verify: Option<TokenVerifyResponse>) -> Self {
        self.verify = verify;
        self
    }

    pub fn rejecting_credentials(mut self) -> Self {
        self.reject_credentials = true;
        self
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == op).count()
    }

    fn issue(&self, op: &str, email: &str, username: &str) -> Result<AuthResponse> {
        self.calls.lock().unwrap().push(op.to_string());
        if self.reject_credentials {
            return Err(ClientError::api_error(
                401,
                r#"{"detail":"Invalid email or password"}"#,
            ));
        }
        Ok(AuthResponse {
            access_token: format!("token-for-{}", email),
            token_type: "bearer".to_string(),
            email: email.to_string(),
            username: username.to_string(),
        })
    }
}

#[async_trait]
impl AuthApi for MockAuth {
    async fn register(&self, email: &str, username: &str, _password: &str) -> Result<AuthResponse> {
        self.issue("register", email, username)
    }

    async fn login(&self, email: &str, _password: &str) -> Result<AuthResponse> {
        self.issue("login", email, "ann")
    }

    async fn verify_token(&self, _token: &str) -> Result<TokenVerifyResponse> {
        self.calls.lock().unwrap().push("verify_token".to_string());
        self.verify
            .clone()
            .ok_or_else(|| ClientError::InvalidRequest("connection refused".to_string()))
    }
}
