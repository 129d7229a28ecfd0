//! Persisted user preferences.
//!
//! [`Preferences`] is a small string key/value store with the semantics of
//! browser local storage: single-key, last-writer-wins, and allowed to be
//! unavailable. Callers decide whether a failure matters; the viewer
//! swallows them.
//!
//! [`FilePreferences`] keeps every key in one JSON object on disk:
//!
//! ```text
//! {"lang": "en"}
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Prefs";

/// Key/value preference store.
pub trait Preferences: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory preference store.
///
/// [`MemoryPreferences::unavailable`] builds a store whose every call fails,
/// mirroring a browser with storage disabled.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryPreferences {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects every read and write.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            values: RwLock::default(),
            unavailable: true,
        }
    }

    /// Seed a value.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.write().unwrap().insert(key.into(), value.into());
        self
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::new(StorageErrorKind::Unavailable).with_backend(BACKEND));
        }
        Ok(())
    }
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.values
            .write()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// JSON file preference store.
///
/// The file is read on every `get` and rewritten on every `set`, so several
/// viewer processes sharing the file observe each other's last write.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Create a store backed by the JSON file at `path`.
    ///
    /// The file and its parent directories are created on first write.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::io(e, Some(self.path.clone())).with_backend(BACKEND));
            }
        };

        serde_json::from_str(&text).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt)
                .with_path(&self.path)
                .with_backend(BACKEND)
                .with_source(e)
        })
    }
}

impl Preferences for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut values = self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding unreadable preferences file");
            BTreeMap::new()
        });
        values.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| {
                    StorageError::io(e, Some(parent.to_path_buf())).with_backend(BACKEND)
                })?;
        }

        let json = serde_json::to_string_pretty(&values).map_err(|e| {
            StorageError::new(StorageErrorKind::Other)
                .with_backend(BACKEND)
                .with_source(e)
        })?;
        fs::write(&self.path, json)
            .map_err(|e| StorageError::io(e, Some(self.path.clone())).with_backend(BACKEND))
    }
}
