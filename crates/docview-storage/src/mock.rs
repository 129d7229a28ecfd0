//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores resources in memory and records every read so tests can assert
/// which resources were requested. Use the builder methods to configure the
/// mock with test data.
///
/// # Example
///
/// ```ignore
/// use docview_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("content/v1.0/ko/setup/x.md", "# X");
///
/// let text = storage.read("content/v1.0/ko/setup/x.md").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<HashMap<String, String>>,
    failures: RwLock<HashMap<String, StorageErrorKind>>,
    reads: RwLock<Vec<String>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource with the given content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Make reads of `path` fail with the given error kind.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, path: impl Into<String>, kind: StorageErrorKind) -> Self {
        self.failures.write().unwrap().insert(path.into(), kind);
        self
    }

    /// Add or replace a resource after construction.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert(&self, path: impl Into<String>, content: impl Into<String>) {
        self.files.write().unwrap().insert(path.into(), content.into());
    }

    /// Paths passed to [`Storage::read`], in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn reads(&self) -> Vec<String> {
        self.reads.read().unwrap().clone()
    }

    /// Number of reads of a specific path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn read_count(&self, path: &str) -> usize {
        self.reads.read().unwrap().iter().filter(|p| *p == path).count()
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.reads.write().unwrap().push(path.to_owned());

        if let Some(kind) = self.failures.read().unwrap().get(path) {
            return Err(StorageError::new(*kind)
                .with_path(path)
                .with_backend(BACKEND));
        }

        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        !self.failures.read().unwrap().contains_key(path)
            && self.files.read().unwrap().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_storage_read() {
        let storage = MockStorage::new().with_file("manifest.json", "{}");

        assert_eq!(storage.read("manifest.json").unwrap(), "{}");
        assert!(storage.exists("manifest.json"));
    }

    #[test]
    fn test_mock_storage_missing() {
        let storage = MockStorage::new();

        let err = storage.read("manifest.json").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Mock"));
    }

    #[test]
    fn test_mock_storage_injected_failure() {
        let storage = MockStorage::new()
            .with_file("search_index.json", "[]")
            .with_failure("search_index.json", StorageErrorKind::Unavailable);

        let err = storage.read("search_index.json").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::Unavailable);
        assert!(!storage.exists("search_index.json"));
    }

    #[test]
    fn test_mock_storage_records_reads() {
        let storage = MockStorage::new().with_file("a.md", "a");

        let _ = storage.read("a.md");
        let _ = storage.read("b.md");
        let _ = storage.read("a.md");

        assert_eq!(storage.reads(), vec!["a.md", "b.md", "a.md"]);
        assert_eq!(storage.read_count("a.md"), 2);
        assert_eq!(storage.read_count("c.md"), 0);
    }

    #[test]
    fn test_mock_storage_insert_replaces() {
        let storage = MockStorage::new().with_file("a.md", "old");
        storage.insert("a.md", "new");

        assert_eq!(storage.read("a.md").unwrap(), "new");
    }
}
