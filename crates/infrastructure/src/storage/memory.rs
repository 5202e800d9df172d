//! Process-local session storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dailybook_application::ports::{SessionStorage, StorageError};
use tokio::sync::RwLock;

/// Session storage that lives as long as the process.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStorage {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Returns true if no key is set.
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}
