//! JSON-file key-value backend.
//!
//! One file per origin holds a flat JSON object of string keys to string
//! values. Every write rewrites the whole file through a temporary sibling
//! that is fsynced and then renamed over the original, so a crash mid-write
//! leaves either the old or the new contents on disk.

use crate::backend::KeyValueBackend;
use crate::error::{Result, StorageError};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const APP_DIR: &str = "cardvault";

/// Durable backend persisting one origin's namespace to `<root>/<origin>.json`.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileBackend {
    /// Open the namespace for `origin` under `root`.
    ///
    /// The directory is created lazily on first write. Characters outside
    /// `[A-Za-z0-9._-]` in `origin` are replaced with `_`.
    #[must_use]
    pub fn open(root: impl Into<PathBuf>, origin: &str) -> Self {
        let file_name = format!("{}.json", sanitize_origin(origin));
        Self {
            path: root.into().join(file_name),
            lock: Mutex::new(()),
        }
    }

    /// Open the namespace for `origin` in the platform data directory
    /// (e.g. `~/.local/share/cardvault` on Linux).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the platform has no data directory.
    pub fn default_location(origin: &str) -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            StorageError::Unavailable("no platform data directory".to_string())
        })?;
        Ok(Self::open(data_dir.join(APP_DIR), origin))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(items) => Ok(items),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "Storage file is corrupt, treating namespace as empty"
                );
                Ok(BTreeMap::new())
            },
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(items)?;
        let tmp_path = self.path.with_extension("json.tmp");

        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut items = self.read_all()?;
        f(&mut items);
        self.write_all(&items)
    }
}

fn sanitize_origin(origin: &str) -> String {
    let cleaned: String = origin
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned
    }
}

impl KeyValueBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.modify(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
