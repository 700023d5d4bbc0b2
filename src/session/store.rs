use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use tracing::warn;

/// The signed-in account, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Default)]
struct SessionData {
    token: Option<String>,
    user: Option<CurrentUser>,
}

/// Process-wide session state, shared between the UI and the worker thread.
///
/// Token presence is the sole authorization signal. The token is written
/// through to a file so a restart recovers the session; memory stays
/// authoritative between writes. File IO failures are logged, never fatal.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionData>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Opens the store backed by `path`, picking up any previously saved
    /// token.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = fs::read_to_string(&path)
            .ok()
            .map(|contents| contents.trim().to_string())
            .filter(|token| !token.is_empty());
        Self {
            inner: Arc::new(Mutex::new(SessionData { token, user: None })),
            path: Some(path),
        }
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionData::default())),
            path: None,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().token.is_some()
    }

    /// Stores a fresh token in memory and on disk together. An empty token
    /// clears the session instead.
    pub fn set_token(&self, token: &str) {
        if token.is_empty() {
            self.clear();
            return;
        }
        self.lock().token = Some(token.to_string());
        if let Some(path) = &self.path
            && let Err(err) = persist(path, token)
        {
            warn!(error = %err, "failed to persist session token");
        }
    }

    /// Drops the session locally: memory, disk, and the cached account.
    /// Server-side invalidation is a separate, best-effort call.
    pub fn clear(&self) {
        {
            let mut data = self.lock();
            data.token = None;
            data.user = None;
        }
        if let Some(path) = &self.path
            && path.exists()
            && let Err(err) = fs::remove_file(path)
        {
            warn!(error = %err, "failed to remove session token file");
        }
    }

    pub fn user(&self) -> Option<CurrentUser> {
        self.lock().user.clone()
    }

    pub fn set_user(&self, user: CurrentUser) {
        self.lock().user = Some(user);
    }

    fn lock(&self) -> MutexGuard<'_, SessionData> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn persist(path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, token).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unauthenticated() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn set_token_with_empty_value_clears() {
        let store = SessionStore::in_memory();
        store.set_token("abc123");
        assert!(store.is_authenticated());
        store.set_token("");
        assert!(!store.is_authenticated());
    }

    #[test]
    fn clear_drops_the_cached_account_too() {
        let store = SessionStore::in_memory();
        store.set_token("abc123");
        store.set_user(CurrentUser {
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
        });
        store.clear();
        assert!(store.user().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::in_memory();
        let handle = store.clone();
        store.set_token("abc123");
        assert_eq!(handle.token().as_deref(), Some("abc123"));
    }
}
