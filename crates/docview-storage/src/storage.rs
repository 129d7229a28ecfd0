//! Bundle resource access.
//!
//! Every path handed to [`Storage`] is relative to the bundle root:
//! `manifest.json`, `search_index.json` or a document such as
//! `content/v1.0/ko/setup/install.md`. Backends map it to whatever they
//! actually read from.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

type BoxedSource = Box<dyn StdError + Send + Sync>;

/// Why a resource could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    NotFound,
    PermissionDenied,
    /// Path escapes the bundle or is otherwise unusable.
    InvalidPath,
    /// Backend switched off, offline or out of quota.
    Unavailable,
    /// Stored bytes could not be decoded.
    Corrupt,
    Timeout,
    Other,
}

impl StorageErrorKind {
    fn label(self) -> &'static str {
        match self {
            Self::NotFound => "Not found",
            Self::PermissionDenied => "Permission denied",
            Self::InvalidPath => "Invalid path",
            Self::Unavailable => "Unavailable",
            Self::Corrupt => "Corrupt data",
            Self::Timeout => "Timeout",
            Self::Other => "Error",
        }
    }
}

impl From<io::ErrorKind> for StorageErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::TimedOut => Self::Timeout,
            io::ErrorKind::InvalidData => Self::Corrupt,
            _ => Self::Other,
        }
    }
}

/// Failure to read or write a bundle resource or preference.
///
/// Carries the kind plus optional context: the resource path, a short
/// backend tag (`Fs`, `Mock`, `Prefs`) and the underlying error.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<BoxedSource>,
}

impl StorageError {
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Wrap an I/O failure, classifying it by its [`io::ErrorKind`].
    #[must_use]
    pub fn io(err: io::Error, path: Option<PathBuf>) -> Self {
        Self {
            path,
            ..Self::new(err.kind().into()).with_source(err)
        }
    }

    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_backend(self, backend: &'static str) -> Self {
        Self {
            backend: Some(backend),
            ..self
        }
    }

    #[must_use]
    pub fn with_source(self, source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..self
        }
    }

    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// The resource does not exist in the bundle.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    /// The backend could not be reached; retrying later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            StorageErrorKind::Unavailable | StorageErrorKind::Timeout
        )
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }
        f.write_str(self.kind.label())?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        match &self.path {
            Some(path) => write!(f, " (path: {})", path.display()),
            None => Ok(()),
        }
    }
}

impl StdError for StorageError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

/// Read access to the static bundle.
///
/// Stands in for `fetch`: a read yields the whole resource text or the
/// reason it is unavailable.
pub trait Storage: Send + Sync {
    /// Read `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the resource is missing or unreadable.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Whether `path` exists. Errors count as absent.
    fn exists(&self, path: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_bare_error_has_no_context() {
        let err = StorageError::new(StorageErrorKind::Unavailable);

        assert!(err.path().is_none());
        assert!(err.backend().is_none());
        assert_eq!(err.to_string(), "Unavailable");
    }

    #[test]
    fn test_io_kinds_are_classified() {
        let cases = [
            (io::ErrorKind::NotFound, StorageErrorKind::NotFound),
            (io::ErrorKind::PermissionDenied, StorageErrorKind::PermissionDenied),
            (io::ErrorKind::TimedOut, StorageErrorKind::Timeout),
            (io::ErrorKind::InvalidData, StorageErrorKind::Corrupt),
            (io::ErrorKind::Interrupted, StorageErrorKind::Other),
        ];
        for (io_kind, expected) in cases {
            let err = StorageError::io(io::Error::new(io_kind, "boom"), None);
            assert_eq!(err.kind(), expected, "io kind {io_kind:?}");
        }
    }

    #[test]
    fn test_io_keeps_path_and_source() {
        let err = StorageError::io(
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
            Some(PathBuf::from("content/v1.0/ko/a.md")),
        );

        assert!(err.is_missing());
        assert_eq!(err.path(), Some(Path::new("content/v1.0/ko/a.md")));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_transient_kinds() {
        assert!(StorageError::new(StorageErrorKind::Unavailable).is_transient());
        assert!(StorageError::new(StorageErrorKind::Timeout).is_transient());
        assert!(!StorageError::not_found("manifest.json").is_transient());
    }

    #[test]
    fn test_display_with_full_context() {
        let err = StorageError::new(StorageErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("manifest.json")
            .with_source(io::Error::new(io::ErrorKind::NotFound, "file not found"));

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (path: manifest.json)"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
