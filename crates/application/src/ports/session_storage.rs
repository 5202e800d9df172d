//! Session storage port
//!
//! Defines the durable key-value medium the session is persisted in.

use async_trait::async_trait;
use dailybook_domain::SessionSlot;

/// Errors that can occur during session storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing medium cannot be used.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage that survives process restarts.
///
/// Implementations decide the medium: an in-memory map for tests, a file
/// for the command-line client.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads a value, `None` if the key is not set.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Removes every session slot.
    ///
    /// # Errors
    /// Returns the first removal failure.
    async fn clear(&self) -> Result<(), StorageError> {
        for slot in SessionSlot::all() {
            self.remove(slot.key()).await?;
        }
        Ok(())
    }
}
