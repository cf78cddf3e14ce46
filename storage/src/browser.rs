//! Browser `localStorage` backend (`browser` feature).
//!
//! The `Storage` handle is looked up on every call instead of being held, so
//! the backend itself stays `Send + Sync` on single-threaded wasm targets.

use crate::backend::KeyValueBackend;
use crate::error::{Result, StorageError};

/// Backend over `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    /// Create a backend for the current window's origin.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        // QuotaExceededError carries no sizes, so it surfaces as Unavailable.
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("setItem({key}) failed: {e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn clear(&self) -> Result<()> {
        Self::storage()?
            .clear()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}
