//! File-backed session storage.
//!
//! The session survives process restarts in a small JSON object in the
//! platform-specific config directory:
//! - Linux: ~/.config/dailybook/session.json
//! - macOS: ~/Library/Application Support/dailybook/session.json
//! - Windows: %APPDATA%/dailybook/session.json

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dailybook_application::ports::{SessionStorage, StorageError};
use dailybook_domain::SessionSlot;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::warn;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

type Entries = BTreeMap<String, String>;

/// Session storage persisted as a flat JSON object of strings.
///
/// Writes are read-modify-write under a lock, so concurrent calls through
/// the same instance never lose each other's keys.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Creates a storage backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the default session file location, if a config directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dailybook").join("session.json"))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Entries, StorageError> {
        match fs::read(&self.path).await {
            Ok(content) => from_json_bytes(&content).map_err(to_storage_error),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Reads entries for an update. An unreadable document is replaced.
    async fn read_entries_for_update(&self) -> Result<Entries, StorageError> {
        match self.read_entries().await {
            Err(StorageError::Serialization(message)) => {
                warn!(path = %self.path.display(), %message, "replacing unreadable session file");
                Ok(Entries::new())
            }
            other => other,
        }
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = to_json_stable_bytes(entries).map_err(to_storage_error)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

fn to_storage_error(e: SerializationError) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_update().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_update().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }

    /// Removes every session slot in a single write.
    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_update().await?;
        let before = entries.len();
        for slot in SessionSlot::all() {
            entries.remove(slot.key());
        }
        if entries.len() != before {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.json"));

        assert_eq!(storage.get("dailybook_token").await.unwrap(), None);
        storage.remove("dailybook_token").await.unwrap();
        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileSessionStorage::new(&path)
            .set("dailybook_token", "tok")
            .await
            .unwrap();

        let reopened = FileSessionStorage::new(&path);
        assert_eq!(
            reopened.get("dailybook_token").await.unwrap().as_deref(),
            Some("tok")
        );
    }

    #[tokio::test]
    async fn test_clear_keeps_unrelated_keys() {
        let dir = tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.json"));
        storage.set("dailybook_token", "tok").await.unwrap();
        storage.set("dailybook_username", "alice").await.unwrap();
        storage.set("theme", "dark").await.unwrap();

        storage.clear().await.unwrap();

        let content = std::fs::read_to_string(storage.path()).unwrap();
        assert_eq!(content, "{\n  \"theme\": \"dark\"\n}\n");
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_reads_and_is_replaced_on_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        let storage = FileSessionStorage::new(&path);

        assert!(matches!(
            storage.get("dailybook_token").await,
            Err(StorageError::Serialization(_))
        ));

        storage.set("dailybook_token", "tok").await.unwrap();
        assert_eq!(
            storage.get("dailybook_token").await.unwrap().as_deref(),
            Some("tok")
        );
    }
}
