//! Run form

use qcflow_core::domain::job::{RunRequest, Stage};
use std::path::{Path, PathBuf};

use super::error::ValidationError;

const FASTA_EXTENSIONS: [&str; 3] = ["fa", "fna", "fasta"];

/// Inputs collected by a front-end before a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunForm {
    pub sample_name: String,
    pub r1: Option<PathBuf>,
    pub r2: Option<PathBuf>,
    pub reference: Option<PathBuf>,
    pub stage: Stage,
    pub quality_threshold: u32,
    pub min_length: u32,
}

impl RunForm {
    pub fn new(sample_name: impl Into<String>) -> Self {
        Self {
            sample_name: sample_name.into(),
            ..Default::default()
        }
    }

    pub fn reads(mut self, r1: impl Into<PathBuf>, r2: impl Into<PathBuf>) -> Self {
        self.r1 = Some(r1.into());
        self.r2 = Some(r2.into());
        self
    }

    pub fn reference(mut self, fasta: impl Into<PathBuf>) -> Self {
        self.reference = Some(fasta.into());
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    pub fn thresholds(mut self, quality_threshold: u32, min_length: u32) -> Self {
        self.quality_threshold = quality_threshold;
        self.min_length = min_length;
        self
    }

    /// Checks required inputs
    ///
    /// # Returns
    /// The two read files on success
    pub fn validate(&self) -> Result<(&Path, &Path), ValidationError> {
        let (Some(r1), Some(r2)) = (self.r1.as_deref(), self.r2.as_deref()) else {
            return Err(ValidationError::MissingInputs);
        };
        if self.sample_name.trim().is_empty() {
            return Err(ValidationError::MissingInputs);
        }

        match self.reference.as_deref() {
            None if self.stage.requires_reference() => Err(ValidationError::MissingReference),
            Some(fasta) if !is_fasta(fasta) => Err(ValidationError::InvalidReference),
            _ => Ok((r1, r2)),
        }
    }

    /// Run request for the server-side references returned by the uploads
    pub fn to_request(&self, reads_pattern: String, reference_path: Option<String>) -> RunRequest {
        RunRequest {
            stage: self.stage,
            quality_threshold: self.quality_threshold,
            min_length: self.min_length,
            reads_pattern: Some(reads_pattern),
            reference_path,
        }
    }
}

impl Default for RunForm {
    fn default() -> Self {
        Self {
            sample_name: String::new(),
            r1: None,
            r2: None,
            reference: None,
            stage: Stage::default(),
            quality_threshold: RunRequest::DEFAULT_QUALITY_THRESHOLD,
            min_length: RunRequest::DEFAULT_MIN_LENGTH,
        }
    }
}

fn is_fasta(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FASTA_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RunForm {
        RunForm::new("sampleA")
            .reads("a_R1.fastq.gz", "a_R2.fastq.gz")
            .reference("ref.fa")
    }

    #[test]
    fn test_complete_form_is_valid() {
        let form = complete();
        let (r1, r2) = form.validate().unwrap();
        assert_eq!(r1, Path::new("a_R1.fastq.gz"));
        assert_eq!(r2, Path::new("a_R2.fastq.gz"));
    }

    #[test]
    fn test_missing_inputs() {
        let mut form = complete();
        form.sample_name = "  ".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MissingInputs));

        let mut form = complete();
        form.r2 = None;
        assert_eq!(form.validate(), Err(ValidationError::MissingInputs));

        let mut form = complete();
        form.r1 = None;
        assert_eq!(form.validate(), Err(ValidationError::MissingInputs));
    }

    #[test]
    fn test_full_stage_needs_reference() {
        let mut form = complete();
        form.reference = None;
        assert_eq!(form.validate(), Err(ValidationError::MissingReference));

        let form = form.stage(Stage::QcOnly);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_reference_extension() {
        let form = complete().reference("genome.FASTA");
        assert!(form.validate().is_ok());

        let form = complete().reference("genome.gb");
        assert_eq!(form.validate(), Err(ValidationError::InvalidReference));
    }

    #[test]
    fn test_defaults() {
        let form = RunForm::default();
        assert_eq!(form.stage, Stage::Full);
        assert_eq!(form.quality_threshold, 20);
        assert_eq!(form.min_length, 36);
    }

    #[test]
    fn test_to_request() {
        let req = complete()
            .thresholds(25, 50)
            .to_request("p".to_string(), Some("ref.fa".to_string()));
        assert_eq!(req.quality_threshold, 25);
        assert_eq!(req.min_length, 50);
        assert_eq!(req.reads_pattern.as_deref(), Some("p"));
    }
}
