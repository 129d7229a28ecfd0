//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading a static bundle from the local
//! filesystem.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Resolves resource paths against a bundle directory. Paths that would
/// leave the bundle are rejected before touching the filesystem.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use docview_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("public"));
/// let text = storage.read("content/v1.0/ko/setup/install.md")?;
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Root directory of the bundle.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of the bundle.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that a path stays inside the bundle directory.
    ///
    /// Rejects absolute paths and parent directory components (`..`) to
    /// prevent path traversal (e.g., `../../../etc/passwd`).
    fn validate_path(path: &str) -> Result<&Path, StorageError> {
        let candidate = Path::new(path);
        let escapes = candidate
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if path.is_empty() || escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(candidate)
                .with_backend(BACKEND));
        }
        Ok(candidate)
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        let relative = Self::validate_path(path)?;
        let full_path = self.root.join(relative);
        tracing::debug!(path = %full_path.display(), "Reading resource");
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        Self::validate_path(path).is_ok_and(|relative| self.root.join(relative).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    #[test]
    fn test_read_nested_resource() {
        let temp_dir = tempfile::tempdir().unwrap();
        let doc_dir = temp_dir.path().join("content/v1.0/ko/setup");
        fs::create_dir_all(&doc_dir).unwrap();
        fs::write(doc_dir.join("install.md"), "# Install").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(
            storage.read("content/v1.0/ko/setup/install.md").unwrap(),
            "# Install"
        );
        assert!(storage.exists("content/v1.0/ko/setup/install.md"));
    }

    #[test]
    fn test_read_missing_resource() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.read("manifest.json").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Fs"));
        assert_eq!(err.path(), Some(Path::new("manifest.json")));
        assert!(!storage.exists("manifest.json"));
    }

    #[test]
    fn test_read_rejects_parent_components() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(temp_dir.path().join("bundle"));

        let err = storage.read("../secret.txt").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::InvalidPath);
        assert!(!storage.exists("../secret.txt"));
    }

    #[test]
    fn test_read_rejects_absolute_path() {
        let storage = FsStorage::new(PathBuf::from("/srv/bundle"));

        let err = storage.read("/etc/passwd").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_read_rejects_empty_path() {
        let storage = FsStorage::new(PathBuf::from("/srv/bundle"));

        assert_eq!(
            storage.read("").unwrap_err().kind(),
            StorageErrorKind::InvalidPath
        );
    }

    #[test]
    fn test_exists_is_false_for_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("content")).unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(!storage.exists("content"));
    }
}
