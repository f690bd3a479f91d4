//! Job DTOs for the pipeline service

use serde::{Deserialize, Serialize};

/// Response of `POST /jobs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedJob {
    pub job_id: String,
}

/// Response of `POST /upload-reads`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedReads {
    /// Server-side glob matching both read files
    pub pattern: String,
    #[serde(default)]
    pub sample: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

/// Response of `POST /upload-ref`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedReference {
    pub reference: String,
}

/// Response of `POST /jobs/{job_id}/run`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStarted {
    pub iteration: u32,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
}

/// Response of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
