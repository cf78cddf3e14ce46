//! Key-value backend trait.

use crate::error::Result;

/// Durable, synchronous, origin-scoped string key-value store.
///
/// This trait abstracts over the physical store (browser `localStorage`,
/// a JSON file, an in-memory map). Implementations deal in raw strings; JSON
/// encoding is the job of [`Persistence`](crate::Persistence).
///
/// # Implementation Notes
///
/// - Operations are synchronous, mirroring `localStorage`.
/// - A failed write must leave previously stored data intact.
/// - `clear` wipes the whole namespace, not just this application's keys.
pub trait KeyValueBackend: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The store is unavailable
    /// - The write would exceed the quota
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Remove every key in the namespace.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn clear(&self) -> Result<()>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for std::sync::Arc<B> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
