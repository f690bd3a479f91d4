//! Auth service repository

use async_trait::async_trait;
use qcflow_client::{AuthClient, Result};
use qcflow_core::dto::auth::{AuthResponse, TokenVerifyResponse};

/// Operations the auth context needs from the auth service
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, email: &str, username: &str, password: &str) -> Result<AuthResponse>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse>;

    async fn verify_token(&self, token: &str) -> Result<TokenVerifyResponse>;
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn register(&self, email: &str, username: &str, password: &str) -> Result<AuthResponse> {
        AuthClient::register(self, email, username, password).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        AuthClient::login(self, email, password).await
    }

    async fn verify_token(&self, token: &str) -> Result<TokenVerifyResponse> {
        AuthClient::verify_token(self, token).await
    }
}
