//! File-backed session persistence.
//!
//! Each profile gets one JSON file holding exactly two entries: the
//! serialized user profile and the derived bearer credential. Presence of
//! the file is the login-state signal; any read failure degrades to
//! "no session" so the CLI falls back to a signed-out state instead of
//! failing the command.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use tickline_core::auth::{Session, SessionPersistence};
use tickline_core::{Error, Result, UserProfile};

const SESSION_FILE_SUFFIX: &str = ".session.json";

#[derive(Clone)]
pub struct SessionStore {
    path: PathBuf,
}

/// On-disk layout: the two fixed keys the session contract names.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    user_data: UserProfile,
    user_token: String,
}

impl SessionStore {
    pub fn for_profile(profile_name: &str) -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| panic!("Failed to resolve CLI config directory"))
            .join("tickline")
            .join("sessions")
            .join(format!("{profile_name}{SESSION_FILE_SUFFIX}"));
        Self { path }
    }

    /// Store rooted at an explicit path, for tests.
    #[cfg(test)]
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionPersistence for SessionStore {
    fn load_session(&self) -> Result<Option<Session>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                tracing::warn!(
                    "Failed to read session file {}: {}",
                    self.path.display(),
                    error
                );
                return Ok(None);
            }
        };

        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) => Ok(Some(Session::from_parts(
                stored.user_data,
                stored.user_token,
            ))),
            Err(error) => {
                tracing::warn!(
                    "Discarding unreadable session file {}: {}",
                    self.path.display(),
                    error
                );
                Ok(None)
            }
        }
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|error| Error::Storage(error.to_string()))?;
        }
        let stored = StoredSession {
            user_data: session.profile.clone(),
            user_token: session.bearer_token().to_string(),
        };
        let raw = serde_json::to_string_pretty(&stored)?;
        std::fs::write(&self.path, raw).map_err(|error| Error::Storage(error.to_string()))
    }

    fn clear_session(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(Error::Storage(error.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            user_id: 7,
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            mobile: Some("9998887776".to_string()),
            role_id: Some(2),
            client_id: Some(5),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::at_path(dir.path().join("default.session.json"))
    }

    #[test]
    fn load_after_save_round_trips_profile() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let session = Session::new(profile());

        store.save_session(&session).unwrap();
        let loaded = store.load_session().unwrap().expect("stored session");
        assert_eq!(loaded, session);
        assert_eq!(loaded.bearer_token(), "7");
    }

    #[test]
    fn clear_then_load_is_absent_and_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save_session(&Session::new(profile())).unwrap();
        store.clear_session().unwrap();
        assert!(store.load_session().unwrap().is_none());

        // Clearing an already-empty store is not an error.
        store.clear_session().unwrap();
    }

    #[test]
    fn missing_file_loads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load_session().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_loads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::at_path(path);
        assert!(store.load_session().unwrap().is_none());
    }

    #[test]
    fn stored_file_uses_the_two_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.session.json");
        let store = SessionStore::at_path(path.clone());
        store.save_session(&Session::new(profile())).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(raw["user_token"], "7");
        assert_eq!(raw["user_data"]["user_id"], 7);
    }
}
