//! Auth context

use qcflow_client::ClientError;
use qcflow_core::domain::session::{AuthSession, StoredSession, User};
use qcflow_core::dto::auth::AuthResponse;
use thiserror::Error;
use tracing::{info, warn};

use super::store::SessionStore;
use crate::repository::AuthApi;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The auth service refused the request
    #[error("{}", rejection_message(.0))]
    Rejected(#[source] ClientError),

    #[error("Session storage failed: {0:#}")]
    Storage(#[from] anyhow::Error),
}

fn rejection_message(err: &ClientError) -> String {
    err.detail().unwrap_or_else(|| err.to_string())
}

/// Session of the current user, with explicit init and teardown
pub struct AuthContext<A: AuthApi, S: SessionStore> {
    api: A,
    store: S,
    session: Option<AuthSession>,
    loading: bool,
}

impl<A: AuthApi, S: SessionStore> AuthContext<A, S> {
    /// Creates an unauthenticated context; call [`init`](Self::init) before use
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            session: None,
            loading: true,
        }
    }

    /// Restores the stored session if the auth service still accepts its token
    ///
    /// Any verification failure, rejected or unreachable, clears the stored
    /// record and leaves the context unauthenticated.
    pub async fn init(&mut self) -> Result<(), AuthError> {
        self.session = None;

        let result = self.restore().await;
        self.loading = false;
        result
    }

    async fn restore(&mut self) -> Result<(), AuthError> {
        let Some(stored) = self.store.load()? else {
            return Ok(());
        };

        match self.api.verify_token(&stored.access_token).await {
            Ok(response) if response.valid => match stored.user() {
                Some(user) => {
                    info!("Restored session for {}", user.email);
                    self.session = Some(AuthSession {
                        token: stored.access_token,
                        user,
                    });
                }
                None => {
                    warn!("Stored session has no user identity, clearing it");
                    self.store.clear()?;
                }
            },
            Ok(_) => {
                warn!("Stored token is no longer valid, clearing session");
                self.store.clear()?;
            }
            Err(e) => {
                warn!("Failed to verify stored token, clearing session: {:#}", e);
                self.store.clear()?;
            }
        }

        Ok(())
    }

    /// Authenticates with email and password and persists the session
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&AuthSession, AuthError> {
        let response = self
            .api
            .login(email, password)
            .await
            .map_err(AuthError::Rejected)?;
        self.establish(response)
    }

    /// Creates an account and persists the session it comes with
    pub async fn register(
        &mut self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<&AuthSession, AuthError> {
        let response = self
            .api
            .register(email, username, password)
            .await
            .map_err(AuthError::Rejected)?;
        self.establish(response)
    }

    /// Clears the stored session and forgets the user
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.session = None;
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// True until [`init`](Self::init) has finished
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|session| &session.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.token.as_str())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn establish(&mut self, response: AuthResponse) -> Result<&AuthSession, AuthError> {
        self.store.save(&StoredSession::new(
            response.access_token.clone(),
            response.email.clone(),
            response.username.clone(),
        ))?;

        info!("Signed in as {}", response.email);
        self.loading = false;
        Ok(&*self.session.insert(AuthSession {
            token: response.access_token,
            user: User {
                email: response.email,
                username: response.username,
            },
        }))
    }
}
