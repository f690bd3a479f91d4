//! Authenticated session types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub username: String,
}

/// A bearer token together with the identity it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Session record kept in durable client storage
///
/// Field names are the fixed storage keys. Nothing here is used for expiry;
/// only the auth service decides whether a token is still valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_username: Option<String>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl StoredSession {
    pub fn new(token: impl Into<String>, email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            access_token: token.into(),
            user_email: Some(email.into()),
            user_username: Some(username.into()),
            saved_at: Some(Utc::now()),
        }
    }

    /// The stored identity, when an email was recorded
    pub fn user(&self) -> Option<User> {
        let email = self.user_email.clone().filter(|e| !e.is_empty())?;
        Some(User {
            email,
            username: self.user_username.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_requires_email() {
        let mut stored = StoredSession::new("tok", "a@b.c", "ann");
        assert_eq!(stored.user().unwrap().username, "ann");

        stored.user_email = None;
        assert!(stored.user().is_none());
    }

    #[test]
    fn test_storage_keys() {
        let stored = StoredSession::new("tok", "a@b.c", "ann");
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["access_token"], "tok");
        assert_eq!(json["user_email"], "a@b.c");
        assert_eq!(json["user_username"], "ann");
    }
}
