//! # Session Persistence
//!
//! The authenticated session survives restarts as exactly two string keys,
//! [`TOKEN_KEY`] and [`USER_KEY`] (the user serialized as JSON). They are
//! written and cleared together.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use carestay_types::{AuthSession, User};

use crate::error::SessionError;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the serialized user.
pub const USER_KEY: &str = "user";

/// Key-value storage for the persisted session.
pub trait SessionStorage: Send + Sync {
    /// Reads one key.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Writes several keys in one step.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), SessionError>;

    /// Removes several keys in one step. Missing keys are ignored.
    fn remove_many(&self, keys: &[&str]) -> Result<(), SessionError>;
}

/// Loads the persisted session.
///
/// Returns `None` unless both keys are present.
pub fn load_session(storage: &dyn SessionStorage) -> Result<Option<AuthSession>, SessionError> {
    let (Some(token), Some(user)) = (storage.get(TOKEN_KEY)?, storage.get(USER_KEY)?) else {
        return Ok(None);
    };
    let user: User = serde_json::from_str(&user)?;
    Ok(Some(AuthSession { token, user }))
}

/// Persists a session, replacing any previous one.
pub fn save_session(storage: &dyn SessionStorage, session: &AuthSession) -> Result<(), SessionError> {
    let user = serde_json::to_string(&session.user)?;
    storage.set_many(&[(TOKEN_KEY, session.token.clone()), (USER_KEY, user)])
}

/// Replaces only the persisted user, keeping the token.
pub fn save_user(storage: &dyn SessionStorage, user: &User) -> Result<(), SessionError> {
    storage.set_many(&[(USER_KEY, serde_json::to_string(user)?)])
}

/// Clears the persisted session.
pub fn clear_session(storage: &dyn SessionStorage) -> Result<(), SessionError> {
    storage.remove_many(&[TOKEN_KEY, USER_KEY])
}

/// Session storage kept in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), SessionError> {
        let mut map = self.entries.write();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), SessionError> {
        let mut map = self.entries.write();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

/// Session storage backed by a JSON file.
///
/// Every write replaces the file through a temporary sibling and a rename, so
/// a crash never leaves a half-written session behind.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Creates a storage at the given path. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Default location: `<config dir>/carestay/session.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("carestay").join("session.json"))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = ?self.path, "Saved session");
        Ok(())
    }

    fn modify(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), SessionError> {
        let _guard = self.lock.lock();
        let mut entries = self.read()?;
        f(&mut entries);
        self.write(&entries)
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock();
        Ok(self.read()?.remove(key))
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), SessionError> {
        self.modify(|map| {
            for (key, value) in entries {
                map.insert((*key).to_string(), value.clone());
            }
        })
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), SessionError> {
        self.modify(|map| {
            for key in keys {
                map.remove(*key);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carestay_types::Role;
    use pretty_assertions::assert_eq;

    fn session() -> AuthSession {
        AuthSession {
            token: "tok-123".into(),
            user: User {
                id: 3,
                name: "Grace Hopper".into(),
                email: "grace@example.com".into(),
                role: Role::Provider,
                phone: None,
                created_at: None,
            },
        }
    }

    #[test]
    fn test_memory_round_trip_and_clear() {
        let storage = MemorySessionStorage::new();
        assert!(load_session(&storage).unwrap().is_none());

        save_session(&storage, &session()).unwrap();
        assert_eq!(load_session(&storage).unwrap(), Some(session()));

        clear_session(&storage).unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_token_without_user_is_no_session() {
        let storage = MemorySessionStorage::new();
        storage.set_many(&[(TOKEN_KEY, "orphan".into())]).unwrap();
        assert!(load_session(&storage).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_user_is_an_error() {
        let storage = MemorySessionStorage::new();
        storage
            .set_many(&[(TOKEN_KEY, "tok".into()), (USER_KEY, "{oops".into())])
            .unwrap();
        assert!(matches!(
            load_session(&storage),
            Err(SessionError::Serialization(_))
        ));
    }

    #[test]
    fn test_file_storage_persists_only_two_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let storage = FileSessionStorage::new(&path);

        save_session(&storage, &session()).unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            raw.keys().cloned().collect::<Vec<_>>(),
            vec![TOKEN_KEY.to_string(), USER_KEY.to_string()]
        );

        let reopened = FileSessionStorage::new(&path);
        assert_eq!(load_session(&reopened).unwrap(), Some(session()));
    }

    #[test]
    fn test_file_storage_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = FileSessionStorage::new(&path);

        save_session(&storage, &session()).unwrap();
        assert!(path.exists());

        clear_session(&storage).unwrap();
        assert!(!path.exists());
        // clearing twice is fine
        clear_session(&storage).unwrap();
    }

    #[test]
    fn test_save_user_keeps_token() {
        let storage = MemorySessionStorage::new();
        save_session(&storage, &session()).unwrap();

        let mut user = session().user;
        user.name = "Rear Admiral Hopper".into();
        save_user(&storage, &user).unwrap();

        let restored = load_session(&storage).unwrap().unwrap();
        assert_eq!(restored.token, "tok-123");
        assert_eq!(restored.user.name, "Rear Admiral Hopper");
    }
}
