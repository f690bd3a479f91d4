//! Error types for the QCFlow clients

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the pipeline or auth service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Raw response body
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// A local file could not be read for upload
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Message the server gave for a failed request
    ///
    /// Error bodies look like `{"detail": "Invalid job_id"}`; anything else
    /// non-empty is returned as is.
    pub fn detail(&self) -> Option<String> {
        let Self::ApiError { message, .. } = self else {
            return None;
        };

        match serde_json::from_str::<serde_json::Value>(message) {
            Ok(serde_json::Value::Object(body)) => match body.get("detail") {
                Some(serde_json::Value::String(detail)) => Some(detail.clone()),
                Some(serde_json::Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            },
            _ => {
                let trimmed = message.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }
}
