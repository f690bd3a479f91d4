//! Configuration module
//!
//! Wraps the engine configuration and builds the service clients the
//! commands talk to.

use anyhow::Result;
use qcflow_client::{AuthClient, PipelineClient};
use qcflow_engine::{AuthContext, FileSessionStore, SessionStore};
use tracing::warn;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub engine: qcflow_engine::Config,
    http: reqwest::Client,
}

impl Config {
    pub fn new(engine: qcflow_engine::Config) -> Result<Self> {
        engine.validate()?;
        let http = engine.http_client()?;

        Ok(Self { engine, http })
    }

    pub fn session_store(&self) -> FileSessionStore {
        FileSessionStore::new(&self.engine.session_path)
    }

    pub fn auth_context(&self) -> AuthContext<AuthClient, FileSessionStore> {
        let api = AuthClient::with_client(&self.engine.auth_url, self.http.clone());
        AuthContext::new(api, self.session_store())
    }

    /// Pipeline client carrying `token` as its bearer credential, if any
    pub fn pipeline_client(&self, token: Option<&str>) -> PipelineClient {
        let client = PipelineClient::with_client(&self.engine.api_url, self.http.clone());
        match token {
            Some(token) => client.with_token(token),
            None => client,
        }
    }

    /// Token from the persisted session, without asking the auth service
    pub fn stored_token(&self) -> Option<String> {
        match self.session_store().stored_token() {
            Ok(token) => token,
            Err(e) => {
                warn!("Ignoring unreadable session: {:#}", e);
                None
            }
        }
    }
}
