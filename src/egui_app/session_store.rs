//! Session persistence
//!
//! Keeps the identity provider's session on disk so a restart finds the user
//! still signed in. The file holds the tokens, so it is only ever written
//! by this module and never logged.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::egui_app::types::Session;

/// Tokens are refreshed this long before they expire
const REFRESH_MARGIN_SECS: i64 = 60;

/// Everything needed to resume a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub uid: String,
    pub email: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn session(&self) -> Session {
        Session {
            uid: self.uid.clone(),
            email: self.email.clone(),
        }
    }

    /// Whether the id token should be refreshed before use at `now`
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) >= self.expires_at
    }
}

/// Shared, optionally file-backed, holder of the current session
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: Arc<RwLock<Option<StoredSession>>>,
}

impl SessionStore {
    /// A store that forgets everything on exit
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed store, loading any session already saved there.
    ///
    /// An unreadable or corrupt file is treated as "signed out".
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = load_file(&path);
        Self {
            path: Some(path),
            current: Arc::new(RwLock::new(current)),
        }
    }

    /// Default location under the platform data directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("contact_book").join("session.json"))
    }

    pub fn get(&self) -> Option<StoredSession> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    pub fn set(&self, session: StoredSession) {
        if let Some(path) = &self.path {
            if let Err(e) = save_file(path, &session) {
                tracing::error!("Failed to persist session to {}: {}", path.display(), e);
            }
        }
        if let Ok(mut guard) = self.current.write() {
            *guard = Some(session);
        }
    }

    pub fn clear(&self) {
        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    tracing::error!("Failed to remove session file {}: {}", path.display(), e);
                }
            }
        }
        if let Ok(mut guard) = self.current.write() {
            *guard = None;
        }
    }
}

fn load_file(path: &Path) -> Option<StoredSession> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::error!("Failed to read session file {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("Ignoring corrupt session file {}: {}", path.display(), e);
            None
        }
    }
}

fn save_file(path: &Path, session: &StoredSession) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(session)?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(json.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(expires_at: DateTime<Utc>) -> StoredSession {
        StoredSession {
            uid: "uid-1".to_string(),
            email: Some("ana@x.com".to_string()),
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at,
        }
    }

    #[test]
    fn test_in_memory_set_and_clear() {
        let store = SessionStore::in_memory();
        assert!(store.get().is_none());
        store.set(sample(Utc::now()));
        assert_eq!(store.get().unwrap().uid, "uid-1");
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_roundtrip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let first = SessionStore::open(&path);
        first.set(sample(Utc::now()));
        assert!(path.exists());

        let second = SessionStore::open(&path);
        assert_eq!(second.get().unwrap().email.as_deref(), Some("ana@x.com"));

        second.clear();
        assert!(!path.exists());
        assert!(SessionStore::open(&path).get().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        SessionStore::open(&path).set(sample(Utc::now()));

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_corrupt_file_means_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        assert!(SessionStore::open(&path).get().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::in_memory();
        let other = store.clone();
        store.set(sample(Utc::now()));
        assert!(other.get().is_some());
    }

    #[test]
    fn test_needs_refresh_margin() {
        let now = Utc::now();
        assert!(sample(now + Duration::seconds(30)).needs_refresh(now));
        assert!(!sample(now + Duration::seconds(3600)).needs_refresh(now));
    }
}
