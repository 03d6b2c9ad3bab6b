//! Durable key/value storage seam for the session record.
//!
//! DESIGN
//! ======
//! Mirrors browser `localStorage`: synchronous string get/set/remove. The
//! browser backend lives in the `client` crate; `MemoryStorage` serves tests
//! and server-side rendering.

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;

use std::collections::HashMap;
use std::sync::RwLock;

/// Failure talking to the durable store (quota, disabled storage, ...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage backend is reachable (e.g. storage disabled by the browser).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The backend rejected a write.
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Persistent string storage scoped to the client.
pub trait SessionStorage: Send + Sync {
    /// Read the entry for `key`; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when storage cannot be reached.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the write is rejected.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the entry for `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when storage cannot be reached.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage. Data is lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed storage with one entry, e.g. a record left by a previous visit.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        storage
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
