//! Persistent storage for the bearer token returned by `/login`

use crate::error::Result;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub email: String,
    pub logged_in_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(access_token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            email: email.into(),
            logged_in_at: Utc::now(),
        }
    }
}

pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;
        debug!("Session stored at {}", self.path.display());
        Ok(())
    }

    /// Returns `None` when nobody is logged in. A corrupt file counts as logged out.
    pub fn load(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                debug!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.load()?.map(|s| s.access_token))
    }

    /// Remove the stored token. Returns whether a session existed.
    pub fn clear(&self) -> Result<bool> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
