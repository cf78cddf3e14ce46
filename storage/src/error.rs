//! Error types for key-value persistence.

use thiserror::Error;

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failure modes of a key-value backend.
///
/// None of these are fatal to callers: the session and favorites stores log
/// them and keep working from memory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Storage is disabled or not reachable (private browsing, no window, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing would exceed the backend's quota.
    #[error("Storage quota exceeded writing {key:?} ({needed} bytes needed, {limit} allowed)")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Total bytes the namespace would occupy after the write
        needed: usize,
        /// Configured limit
        limit: usize,
    },

    /// Value could not be encoded to JSON.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// A previous holder of the backend lock panicked.
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl From<std::io::Error> for StorageError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
