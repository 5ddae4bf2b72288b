// Session/auth gate: roster login and session-file persistence.
//
// A single shared secret gates a fixed roster; the matched identity is
// persisted as JSON in a session file (the browser session-storage
// analogue) and restored on the next launch until logout deletes it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::{self, Manager, SHARED_PASSWORD};

/// The one message shown on any login failure. Never reveals which of the
/// two checks failed.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{INVALID_CREDENTIALS}")]
    InvalidCredentials,

    #[error("failed to write session file {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Session identity
// ---------------------------------------------------------------------------

/// The currently authenticated manager, as stored in the session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub username: String,
    pub entry_id: u64,
    pub display_name: String,
}

impl From<&Manager> for SessionIdentity {
    fn from(m: &Manager) -> Self {
        SessionIdentity {
            username: m.username.to_string(),
            entry_id: m.entry_id,
            display_name: m.display_name.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Check a submitted username/password pair against the static roster.
///
/// The username is lower-cased and trimmed before lookup; the password
/// must equal the shared constant exactly.
pub fn authenticate(username: &str, password: &str) -> Result<&'static Manager, SessionError> {
    let normalized = username.trim().to_lowercase();
    match config::find_manager(&normalized) {
        Some(manager) if password == SHARED_PASSWORD => Ok(manager),
        _ => Err(SessionError::InvalidCredentials),
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Loads, saves, and clears the persisted session identity. The path is
/// injected so tests can point it at a scratch file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore the saved identity, if any. A missing file means no
    /// session; an unreadable or corrupt file is treated the same way
    /// (with a warning), never as a hard error.
    pub fn load(&self) -> Option<SessionIdentity> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("could not read session file {}: {e}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!("corrupt session file {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Persist the identity for the next launch.
    pub fn save(&self, identity: &SessionIdentity) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(identity).map_err(|e| SessionError::Persist {
            path: self.path.clone(),
            source: std::io::Error::other(e),
        })?;
        std::fs::write(&self.path, json).map_err(|source| SessionError::Persist {
            path: self.path.clone(),
            source,
        })
    }

    /// Delete the saved identity. Already-absent files are fine.
    pub fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("could not remove session file {}: {e}", self.path.display());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store(name: &str) -> SessionStore {
        let path = std::env::temp_dir().join(format!("touchline_session_{name}.json"));
        let _ = std::fs::remove_file(&path);
        SessionStore::new(path)
    }

    #[test]
    fn login_accepts_roster_member_with_shared_password() {
        let manager = authenticate("danpatel", SHARED_PASSWORD).expect("valid login");
        assert_eq!(manager.display_name, "Dan Patel");
    }

    #[test]
    fn login_normalizes_case_and_whitespace() {
        let manager = authenticate("  DanPatel \n", SHARED_PASSWORD).expect("valid login");
        assert_eq!(manager.username, "danpatel");
    }

    #[test]
    fn login_rejects_wrong_password() {
        let err = authenticate("danpatel", "wrong").unwrap_err();
        assert_eq!(err.to_string(), INVALID_CREDENTIALS);
    }

    #[test]
    fn login_rejects_unknown_username_with_same_message() {
        let err = authenticate("stranger", SHARED_PASSWORD).unwrap_err();
        // Same fixed message as a wrong password: the gate never reveals
        // which check failed.
        assert_eq!(err.to_string(), INVALID_CREDENTIALS);
    }

    #[test]
    fn password_comparison_is_exact() {
        assert!(authenticate("danpatel", &SHARED_PASSWORD.to_uppercase()).is_err());
        assert!(authenticate("danpatel", &format!(" {SHARED_PASSWORD}")).is_err());
    }

    #[test]
    fn save_load_clear_round_trip() {
        let store = scratch_store("round_trip");
        assert!(store.load().is_none());

        let identity = SessionIdentity::from(&crate::config::ROSTER[0]);
        store.save(&identity).expect("save should succeed");
        assert_eq!(store.load(), Some(identity));

        store.clear();
        assert!(store.load().is_none());
        // Clearing twice is a no-op.
        store.clear();
    }

    #[test]
    fn corrupt_session_file_is_treated_as_absent() {
        let store = scratch_store("corrupt");
        std::fs::write(store.path(), "not json {{{").unwrap();
        assert!(store.load().is_none());
        store.clear();
    }
}
