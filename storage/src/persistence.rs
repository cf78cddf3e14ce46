//! Typed persistence adapter.

use crate::backend::KeyValueBackend;
use crate::error::{Result, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// JSON-typed view over a [`KeyValueBackend`].
///
/// Clones share the same backend. Every failure is logged here, at the
/// boundary where it happens; callers decide whether to degrade.
#[derive(Debug)]
pub struct Persistence<B> {
    backend: Arc<B>,
}

impl<B> Clone for Persistence<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: KeyValueBackend> Persistence<B> {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Wrap an already shared backend.
    #[must_use]
    pub const fn from_shared(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// The underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Serialize `value` to JSON and store it under `key`.
    ///
    /// On failure nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if `value` cannot be encoded, or
    /// the backend's error if the write is rejected.
    pub fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let serialized = serde_json::to_string(value).map_err(|e| {
            let error = StorageError::from(e);
            tracing::error!(key, %error, "Failed to serialize value for storage");
            error
        })?;

        self.backend.set_item(key, &serialized).map_err(|error| {
            tracing::error!(key, %error, "Failed to write to storage");
            error
        })
    }

    /// Read and deserialize the value stored under `key`.
    ///
    /// Missing keys, unreadable storage and content that is not valid JSON
    /// for `T` all yield `None`.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(key, %error, "Ignoring unreadable stored value");
                None
            },
        }
    }

    /// Read the raw stored text under `key`.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<String> {
        match self.backend.get_item(key) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(key, %error, "Failed to read from storage");
                None
            },
        }
    }

    /// Remove `key`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the removal fails.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove_item(key).map_err(|error| {
            tracing::error!(key, %error, "Failed to remove from storage");
            error
        })
    }

    /// Whether anything is stored under `key`. Unreadable storage counts as absent.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.get_raw(key).is_some()
    }

    /// Wipe the entire namespace.
    ///
    /// This removes keys written by anything sharing the backend, not just
    /// CardVault's own keys.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the namespace cannot be cleared.
    pub fn clear(&self) -> Result<()> {
        self.backend.clear().map_err(|error| {
            tracing::error!(%error, "Failed to clear storage");
            error
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::MemoryBackend;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    #[test]
    fn set_then_get_typed() {
        let storage = Persistence::new(MemoryBackend::new());
        let record = Record {
            name: "pikachu".to_string(),
            count: 2,
        };
        storage.set("record", &record).unwrap();
        assert_eq!(storage.get::<Record>("record"), Some(record));
    }

    #[test]
    fn foreign_data_reads_as_absent() {
        let backend = MemoryBackend::new();
        backend.set_item("record", "not json at all").unwrap();
        let storage = Persistence::new(backend);

        assert_eq!(storage.get::<Record>("record"), None);
        // Present but unreadable is still "has".
        assert!(storage.has("record"));
        assert_eq!(storage.get_raw("record").as_deref(), Some("not json at all"));
    }

    #[test]
    fn wrong_shape_reads_as_absent() {
        let storage = Persistence::new(MemoryBackend::new());
        storage.set("record", &vec![1, 2, 3]).unwrap();
        assert_eq!(storage.get::<Record>("record"), None);
    }

    #[test]
    fn failed_write_is_reported_and_leaves_store_untouched() {
        let storage = Persistence::new(MemoryBackend::with_quota(16));
        storage.set("k", "small").unwrap();

        let result = storage.set("k", &"x".repeat(64));
        assert!(matches!(result, Err(StorageError::QuotaExceeded { .. })));
        assert_eq!(storage.get::<String>("k").as_deref(), Some("small"));
    }

    #[test]
    fn remove_has_and_clear() {
        let storage = Persistence::new(MemoryBackend::new());
        storage.set("a", &1).unwrap();
        storage.set("b", &2).unwrap();
        assert!(storage.has("a"));

        storage.remove("a").unwrap();
        assert!(!storage.has("a"));

        storage.clear().unwrap();
        assert!(!storage.has("b"));
    }

    #[test]
    fn clones_share_backend() {
        let storage = Persistence::new(MemoryBackend::new());
        let other = storage.clone();
        storage.set("shared", &true).unwrap();
        assert_eq!(other.get::<bool>("shared"), Some(true));
    }
}
