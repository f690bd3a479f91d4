//! Upload endpoints

use qcflow_core::dto::job::{UploadedReads, UploadedReference};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{PipelineClient, handle_response};

impl PipelineClient {
    /// Upload a pair of read files for a sample
    ///
    /// # Returns
    /// The server-side file pattern matching both reads
    pub async fn upload_reads(&self, sample: &str, r1: &Path, r2: &Path) -> Result<UploadedReads> {
        let url = format!("{}/upload-reads", self.base_url);

        let form = Form::new()
            .text("sample", sample.to_string())
            .part("r1", file_part(r1).await?)
            .part("r2", file_part(r2).await?);

        debug!("Uploading reads for sample {}", sample);
        let response = self.post(&url).multipart(form).send().await?;

        handle_response(response).await
    }

    /// Upload a reference genome in FASTA format
    ///
    /// # Returns
    /// The server-side path of the stored reference
    pub async fn upload_reference(&self, fasta: &Path) -> Result<UploadedReference> {
        let url = format!("{}/upload-ref", self.base_url);

        let form = Form::new().part("fasta", file_part(fasta).await?);

        debug!("Uploading reference {}", fasta.display());
        let response = self.post(&url).multipart(form).send().await?;

        handle_response(response).await
    }
}

/// Read a local file into a multipart part named after the file
async fn file_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ClientError::InvalidRequest(format!("{} is not a file path", path.display()))
        })?;

    Ok(Part::bytes(bytes).file_name(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let err = file_part(Path::new("/nonexistent/qcflow/reads_R1.fastq.gz"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::FileRead { .. }));
        assert!(err.to_string().contains("reads_R1.fastq.gz"));
    }
}
