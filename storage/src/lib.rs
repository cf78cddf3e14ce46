//! # CardVault Storage
//!
//! Durable, origin-scoped key-value persistence for client-side state.
//!
//! The session and favorites stores never touch a storage engine directly.
//! They receive a [`Persistence`] adapter wrapping an injected
//! [`KeyValueBackend`] capability, so production code can run against a file
//! or the browser's `localStorage` while tests use [`MemoryBackend`].
//!
//! ## Failure isolation
//!
//! - Writes return a [`Result`] and never panic. A failed write leaves the
//!   backend untouched.
//! - Reads treat missing, unreadable and foreign (non-JSON) content the same
//!   way: as "not set".
//!
//! ## Example
//!
//! ```
//! use cardvault_storage::{MemoryBackend, Persistence, keys};
//!
//! let storage = Persistence::new(MemoryBackend::new());
//! storage.set(keys::FAVORITES, &vec!["base1-4"]).unwrap();
//!
//! let favorites: Option<Vec<String>> = storage.get(keys::FAVORITES);
//! assert_eq!(favorites, Some(vec!["base1-4".to_string()]));
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod backend;
pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod persistence;

#[cfg(feature = "browser")]
pub mod browser;

pub use backend::KeyValueBackend;
pub use error::{Result, StorageError};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use persistence::Persistence;

#[cfg(feature = "browser")]
pub use browser::LocalStorageBackend;
