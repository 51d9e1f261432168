//! User store for authentication.
//!
//! `users.json` in the data directory holds a single JSON array of
//! `{username, passwordHash}` records. Every operation is a whole-file
//! read-modify-write: load the array, mutate in memory, rewrite the file.
//! There is no locking, so two concurrent registrations can interleave and
//! the last writer wins. Usernames are case-sensitive keys.

use crate::types::{AppError, Result, UserRecord};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store of registered users.
#[derive(Debug, Clone)]
pub struct UserStore {
    /// Path to the users.json file.
    path: PathBuf,
}

impl UserStore {
    /// Creates a store persisting to `users.json` under `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("users.json"),
        }
    }

    /// Loads all users. A missing file reads as an empty list.
    pub fn load(&self) -> Result<Vec<UserRecord>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!(error = %e, op = "load_users", "failed to read user file");
                return Err(AppError::Storage(format!("Failed to read users: {}", e)));
            }
        };

        serde_json::from_str(&data).map_err(|e| {
            tracing::error!(error = %e, op = "load_users", "failed to parse user file");
            AppError::Storage(format!("Failed to parse users: {}", e))
        })
    }

    /// Looks up a user by exact (case-sensitive) username.
    pub fn get(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.load()?.into_iter().find(|u| u.username == username))
    }

    /// Appends a new user and rewrites the whole file.
    ///
    /// Fails with a conflict if the username is already taken
    /// (case-sensitive match).
    pub fn insert(&self, user: UserRecord) -> Result<()> {
        let mut users = self.load()?;

        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        users.push(user);
        self.save(&users)
    }

    fn save(&self, users: &[UserRecord]) -> Result<()> {
        let data = serde_json::to_string_pretty(users).map_err(|e| {
            tracing::error!(error = %e, op = "save_users", "failed to serialize user file");
            AppError::Storage(format!("Failed to serialize users: {}", e))
        })?;

        fs::write(&self.path, data).map_err(|e| {
            tracing::error!(error = %e, op = "save_users", "failed to write user file");
            AppError::Storage(format!("Failed to write users: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(username: &str) -> UserRecord {
        UserRecord {
            username: username.to_string(),
            password_hash: format!("$argon2id$fake-hash-for-{}", username),
        }
    }

    #[test]
    fn test_load_empty_when_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = UserStore::new(temp_dir.path());

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = UserStore::new(temp_dir.path());

        store.insert(record("alice")).unwrap();
        store.insert(record("bob")).unwrap();

        let alice = store.get("alice").unwrap().unwrap();
        assert_eq!(alice.username, "alice");
        assert!(alice.password_hash.contains("alice"));

        assert!(store.get("nobody").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        let store = UserStore::new(temp_dir.path());

        store.insert(record("alice")).unwrap();
        let err = store.insert(record("alice")).unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let store = UserStore::new(temp_dir.path());

        store.insert(record("Alice")).unwrap();
        // A different casing is a different user.
        store.insert(record("alice")).unwrap();

        assert_eq!(store.load().unwrap().len(), 2);
        assert!(store.get("ALICE").unwrap().is_none());
    }

    #[test]
    fn test_persisted_field_names() {
        let temp_dir = TempDir::new().unwrap();
        let store = UserStore::new(temp_dir.path());

        store.insert(record("alice")).unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("users.json")).unwrap();
        assert!(raw.contains("\"username\""));
        assert!(raw.contains("\"passwordHash\""));
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("users.json"), b"not json").unwrap();

        let store = UserStore::new(temp_dir.path());
        let err = store.load().unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
    }
}
