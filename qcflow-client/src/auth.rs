//! Auth service endpoints

use qcflow_core::dto::auth::{AuthResponse, LoginRequest, RegisterRequest, TokenVerifyResponse};
use reqwest::Client;
use reqwest::multipart::Form;

use crate::error::Result;
use crate::handle_response;

/// HTTP client for the auth service
///
/// The auth service issues the bearer tokens the pipeline client carries.
/// It may live at a different base URL than the pipeline service.
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    client: Client,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create an account and receive a token for it
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/auth/register", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&RegisterRequest {
                email: email.to_string(),
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        handle_response(response).await
    }

    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        handle_response(response).await
    }

    /// Ask the auth service whether a stored token is still valid
    pub async fn verify_token(&self, token: &str) -> Result<TokenVerifyResponse> {
        let url = format!("{}/auth/verify", self.base_url);
        let form = Form::new().text("token", token.to_string());
        let response = self.client.post(&url).multipart(form).send().await?;

        handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_client_trims_trailing_slash() {
        let client = AuthClient::new("http://localhost:8000//");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
