//! Session storage
//!
//! Persists the session record (token, email, username) in client-local
//! durable storage. There is no client-side expiry; the record is only
//! removed on logout or when the auth service rejects the token.

use anyhow::{Context, Result, anyhow};
use qcflow_core::domain::session::{StoredSession, User};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Durable storage for the session record
pub trait SessionStore: Send + Sync {
    /// Reads the stored record, if any
    fn load(&self) -> Result<Option<StoredSession>>;

    /// Replaces the stored record
    fn save(&self, session: &StoredSession) -> Result<()>;

    /// Removes token, email and username together
    fn clear(&self) -> Result<()>;

    fn stored_token(&self) -> Result<Option<String>> {
        Ok(self.load()?.map(|session| session.access_token))
    }

    fn stored_user(&self) -> Result<Option<User>> {
        Ok(self.load()?.and_then(|session| session.user()))
    }
}

/// Session record kept as a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<StoredSession>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(
                    "Ignoring unreadable session record {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let body = serde_json::to_string_pretty(session).context("Failed to encode session")?;

        // Write then rename so readers never see a partial record
        let temp = self.temp_path();
        std::fs::write(&temp, body)
            .with_context(|| format!("Failed to write {}", temp.display()))?;
        std::fs::rename(&temp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Cleared session at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }
}

/// In-process session storage
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<StoredSession>> {
        let session = self
            .session
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        Ok(session.clone())
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        let mut stored = self
            .session
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        *stored = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut stored = self
            .session
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        *stored = None;
        Ok(())
    }
}
