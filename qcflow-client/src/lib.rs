//! QCFlow HTTP Client
//!
//! A thin, type-safe HTTP client for the remote QC pipeline service and the
//! auth service that issues bearer tokens for it.
//!
//! Every call is a single request/response round trip. There are no retries;
//! callers decide what a failure means.
//!
//! # Example
//!
//! ```no_run
//! use qcflow_client::PipelineClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PipelineClient::new("http://localhost:8000");
//!
//!     let job = client.create_job().await?;
//!     println!("Created job: {}", job.job_id);
//!     Ok(())
//! }
//! ```

mod auth;
pub mod error;
mod jobs;
mod reports;
mod uploads;

// Re-export commonly used types
pub use auth::AuthClient;
pub use error::{ClientError, Result};

use reqwest::{Client, IntoUrl, RequestBuilder, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the pipeline service API
///
/// Endpoints are organized into logical groups:
/// - Job lifecycle (create, run, poll logs)
/// - Uploads (paired reads, reference genome)
/// - Reports (index listing, QC summary artifacts, health)
#[derive(Debug, Clone)]
pub struct PipelineClient {
    /// Base URL of the pipeline service (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token attached to every request, if any
    token: Option<String>,
}

impl PipelineClient {
    /// Create a new pipeline client
    ///
    /// # Example
    /// ```
    /// use qcflow_client::PipelineClient;
    ///
    /// let client = PipelineClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new pipeline client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use qcflow_client::PipelineClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = PipelineClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        }
    }

    /// Attach a stored bearer token to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL of the pipeline service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a server-relative artifact URL against the base URL
    ///
    /// Absolute URLs are returned unchanged.
    pub fn artifact_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Endpoint URL under the base URL, one percent-encoded path segment per item
    ///
    /// Sample names and ids may contain `/`, `?` or `#`; each stays a single segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!("Base URL {} cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: impl IntoUrl) -> RequestBuilder {
        self.authorize(self.client.get(url))
    }

    fn post(&self, url: impl IntoUrl) -> RequestBuilder {
        self.authorize(self.client.post(url))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Handle an API response and deserialize JSON
///
/// Checks the status code and returns an `ApiError` carrying the body if
/// the request failed, or deserializes the body if it succeeded.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}
