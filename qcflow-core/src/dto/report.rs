//! Report DTOs for the pipeline service

use serde::Deserialize;

use crate::domain::report::ReportIndex;

/// Response of `GET /qc/{job_id}/{iteration}/{sample}`
#[derive(Debug, Clone, Deserialize)]
pub struct ReportIndexResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub iteration: Option<u32>,
    #[serde(default)]
    pub sample: Option<String>,
    pub reports: ReportIndex,
}
