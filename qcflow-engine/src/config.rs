//! Client configuration
//!
//! Defines the service endpoints, polling cadence and session storage
//! location used by the orchestration view and the auth context.

use std::path::PathBuf;
use std::time::Duration;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Pipeline service base URL (e.g., "http://localhost:8000")
    pub api_url: String,

    /// Auth service base URL; usually the same host as the pipeline service
    pub auth_url: String,

    /// How often to poll for new log output while a run is in progress
    pub poll_interval: Duration,

    /// Per-request timeout for HTTP calls
    pub request_timeout: Duration,

    /// File holding the persisted session record
    pub session_path: PathBuf,
}

impl Config {
    pub const DEFAULT_API_URL: &'static str = "http://localhost:8000";
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a new configuration with defaults for everything but the URLs
    pub fn new(api_url: String, auth_url: String) -> Self {
        Self {
            api_url,
            auth_url,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            session_path: default_session_path(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognised variables:
    /// - QCFLOW_API_URL (default: http://localhost:8000)
    /// - QCFLOW_AUTH_URL (default: QCFLOW_API_URL)
    /// - QCFLOW_POLL_INTERVAL (seconds, default: 2)
    /// - QCFLOW_REQUEST_TIMEOUT (seconds, default: 30)
    /// - QCFLOW_SESSION_PATH (default: see [`default_session_path`])
    ///
    /// Interval values that are not whole seconds are rejected.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("QCFLOW_API_URL").unwrap_or_else(|| Self::DEFAULT_API_URL.to_string());
        let auth_url = lookup("QCFLOW_AUTH_URL").unwrap_or_else(|| api_url.clone());

        let poll_interval = seconds(&lookup, "QCFLOW_POLL_INTERVAL")?
            .unwrap_or(Self::DEFAULT_POLL_INTERVAL);
        let request_timeout = seconds(&lookup, "QCFLOW_REQUEST_TIMEOUT")?
            .unwrap_or(Self::DEFAULT_REQUEST_TIMEOUT);

        let session_path = lookup("QCFLOW_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_session_path);

        let config = Self {
            api_url,
            auth_url,
            poll_interval,
            request_timeout,
            session_path,
        };
        config.validate()?;

        Ok(config)
    }

    /// Points the pipeline client at `api_url`
    ///
    /// An auth URL that was only following the old API URL follows the new one.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        if self.auth_url == self.api_url {
            self.auth_url = api_url.clone();
        }
        self.api_url = api_url;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_url("api_url", &self.api_url)?;
        validate_url("auth_url", &self.auth_url)?;

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    /// HTTP client honouring the configured timeout
    pub fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_API_URL.to_string(),
            Self::DEFAULT_API_URL.to_string(),
        )
    }
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> anyhow::Result<Option<Duration>> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| anyhow::anyhow!("{} must be a whole number of seconds, got `{}`", key, value)),
        None => Ok(None),
    }
}

fn validate_url(name: &str, url: &str) -> anyhow::Result<()> {
    if url.is_empty() {
        anyhow::bail!("{} cannot be empty", name);
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", name);
    }

    Ok(())
}

/// `$QCFLOW_HOME/session.json`, else `$HOME/.qcflow/session.json`,
/// else `.qcflow/session.json` in the working directory
pub fn default_session_path() -> PathBuf {
    if let Ok(home) = std::env::var("QCFLOW_HOME") {
        return PathBuf::from(home).join("session.json");
    }

    std::env::var("HOME")
        .map(|home| PathBuf::from(home).join(".qcflow"))
        .unwrap_or_else(|_| PathBuf::from(".qcflow"))
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_env_defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config.api_url, Config::DEFAULT_API_URL);
        assert_eq!(config.auth_url, Config::DEFAULT_API_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.session_path.ends_with("session.json"));
    }

    #[test]
    fn test_env_overrides() {
        let config = from_vars(&[
            ("QCFLOW_API_URL", "https://qc.example.org"),
            ("QCFLOW_POLL_INTERVAL", "5"),
            ("QCFLOW_REQUEST_TIMEOUT", " 10 "),
            ("QCFLOW_SESSION_PATH", "/tmp/qcflow/session.json"),
        ])
        .unwrap();

        // Auth follows the API URL unless set on its own
        assert_eq!(config.auth_url, "https://qc.example.org");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.session_path, PathBuf::from("/tmp/qcflow/session.json"));

        let config = from_vars(&[
            ("QCFLOW_API_URL", "https://qc.example.org"),
            ("QCFLOW_AUTH_URL", "https://auth.example.org"),
        ])
        .unwrap();
        assert_eq!(config.auth_url, "https://auth.example.org");
    }

    #[test]
    fn test_env_rejects_bad_values() {
        let err = from_vars(&[("QCFLOW_POLL_INTERVAL", "abc")]).unwrap_err();
        assert!(err.to_string().contains("QCFLOW_POLL_INTERVAL"));

        assert!(from_vars(&[("QCFLOW_REQUEST_TIMEOUT", "-1")]).is_err());
        assert!(from_vars(&[("QCFLOW_POLL_INTERVAL", "0")]).is_err());
        assert!(from_vars(&[("QCFLOW_API_URL", "qc.example.org")]).is_err());
    }

    #[test]
    fn test_with_api_url() {
        let config = Config::default().with_api_url("https://qc.example.org");
        assert_eq!(config.auth_url, "https://qc.example.org");

        let config = Config::new(
            "http://localhost:8000".to_string(),
            "https://auth.example.org".to_string(),
        )
        .with_api_url("https://qc.example.org");
        assert_eq!(config.api_url, "https://qc.example.org");
        assert_eq!(config.auth_url, "https://auth.example.org");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.auth_url, config.api_url);
        assert!(config.session_path.ends_with("session.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Empty URL should fail
        config.api_url = String::new();
        assert!(config.validate().is_err());

        // Invalid URL should fail
        config.api_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.api_url = "https://qc.example.org".to_string();
        assert!(config.validate().is_ok());

        config.auth_url = "ftp://qc.example.org".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let config = Config {
            poll_interval: Duration::ZERO,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
