//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of the job tracked by an orchestration view
///
/// `Idle -> Uploading -> Running -> {Completed | Error}`. A new run resets
/// a finished view back to `Uploading`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Idle,
    Uploading,
    Running,
    Completed,
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Idle => "idle",
            JobStatus::Uploading => "uploading",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }

    /// Label shown to the user; an idle view reads as "Ready"
    pub fn display_label(&self) -> &'static str {
        match self {
            JobStatus::Idle => "Ready",
            JobStatus::Uploading => "Uploading",
            JobStatus::Running => "Running",
            JobStatus::Completed => "Completed",
            JobStatus::Error => "Error",
        }
    }

    /// A run is in flight and a new one may not start
    pub fn is_busy(&self) -> bool {
        matches!(self, JobStatus::Uploading | JobStatus::Running)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline scope selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Trimming, QC and alignment against a reference genome
    #[default]
    Full,
    QcOnly,
    TrimQc,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Full, Stage::QcOnly, Stage::TrimQc];

    /// Wire value sent to the run endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Full => "full",
            Stage::QcOnly => "qc_only",
            Stage::TrimQc => "trim_qc",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::Full => "Full Pipeline",
            Stage::QcOnly => "QC Only",
            Stage::TrimQc => "Trim & QC",
        }
    }

    /// Only the full pipeline aligns reads and needs a reference genome
    pub fn requires_reference(&self) -> bool {
        matches!(self, Stage::Full)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "invalid stage `{}` (expected one of: full, qc_only, trim_qc)",
                    s
                )
            })
    }
}

/// Parameters for one pipeline invocation
///
/// Built fresh from the run form and never modified after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub stage: Stage,
    pub quality_threshold: u32,
    pub min_length: u32,
    /// Server-side file pattern returned by the reads upload
    pub reads_pattern: Option<String>,
    /// Server-side path returned by the reference upload
    pub reference_path: Option<String>,
}

impl RunRequest {
    pub const DEFAULT_QUALITY_THRESHOLD: u32 = 20;
    pub const DEFAULT_MIN_LENGTH: u32 = 36;

    /// Form fields in the order the run endpoint reads them
    ///
    /// Absent references are omitted rather than sent empty.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("stage", self.stage.as_str().to_string()),
            ("qual", self.quality_threshold.to_string()),
            ("min_len", self.min_length.to_string()),
        ];

        if let Some(pattern) = self.reads_pattern.as_deref().filter(|p| !p.is_empty()) {
            fields.push(("reads_pattern", pattern.to_string()));
        }
        if let Some(path) = self.reference_path.as_deref().filter(|p| !p.is_empty()) {
            fields.push(("ref_path", path.to_string()));
        }

        fields
    }
}

impl Default for RunRequest {
    fn default() -> Self {
        Self {
            stage: Stage::default(),
            quality_threshold: Self::DEFAULT_QUALITY_THRESHOLD,
            min_length: Self::DEFAULT_MIN_LENGTH,
            reads_pattern: None,
            reference_path: None,
        }
    }
}
