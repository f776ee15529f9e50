//! Persisted bearer-token session.
//!
//! The access/refresh pair lives in a small JSON file under the platform
//! data directory, with the same fixed keys the web client kept in browser
//! storage. Cleared on logout and on an irrecoverable refresh failure.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Thread-safe handle to the persisted token pair.
///
/// The gateway refreshes tokens from whichever thread carries the failed
/// request, so all access goes through a mutex.
pub struct SessionStore {
    path: PathBuf,
    tokens: Mutex<StoredTokens>,
}

impl SessionStore {
    /// Load the session file if present; a missing or unreadable file just
    /// means "not logged in".
    pub fn load(path: &Path) -> Self {
        let tokens = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();

        Self {
            path: path.to_path_buf(),
            tokens: Mutex::new(tokens),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens.lock().unwrap().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.tokens.lock().unwrap().refresh_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.lock().unwrap().access_token.is_some()
    }

    /// Store a full pair (after login).
    pub fn store(&self, access: &str, refresh: &str) -> Result<()> {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.access_token = Some(access.to_string());
        tokens.refresh_token = Some(refresh.to_string());
        self.persist(&tokens)
    }

    /// Replace only the access token (after a refresh exchange).
    pub fn store_access(&self, access: &str) -> Result<()> {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.access_token = Some(access.to_string());
        self.persist(&tokens)
    }

    /// Drop both tokens and the session file (logout, failed refresh).
    pub fn clear(&self) {
        let mut tokens = self.tokens.lock().unwrap();
        *tokens = StoredTokens::default();
        let _ = std::fs::remove_file(&self.path);
    }

    fn persist(&self, tokens: &StoredTokens) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create session directory")?;
        }
        let content = serde_json::to_string_pretty(tokens)?;
        std::fs::write(&self.path, content)
            .context("Failed to write session file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_means_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::load(&dir.path().join("session.json"));
        assert!(!store.is_authenticated());
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn test_store_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::load(&path);
        store.store("acc-1", "ref-1").unwrap();
        assert_eq!(store.access_token().as_deref(), Some("acc-1"));

        // A fresh load sees the persisted pair.
        let reloaded = SessionStore::load(&path);
        assert_eq!(reloaded.access_token().as_deref(), Some("acc-1"));
        assert_eq!(reloaded.refresh_token().as_deref(), Some("ref-1"));
    }

    #[test]
    fn test_store_access_keeps_refresh() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::load(&path);
        store.store("acc-1", "ref-1").unwrap();
        store.store_access("acc-2").unwrap();

        assert_eq!(store.access_token().as_deref(), Some("acc-2"));
        assert_eq!(store.refresh_token().as_deref(), Some("ref-1"));
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::load(&path);
        store.store("acc", "ref").unwrap();
        assert!(path.exists());

        store.clear();
        assert!(!store.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_treated_as_logged_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SessionStore::load(&path);
        assert!(!store.is_authenticated());
    }
}
