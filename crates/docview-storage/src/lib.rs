//! Storage abstraction for the docview documentation viewer.
//!
//! The viewer is a static bundle: every document, the sidebar manifest and the
//! search index are plain resources addressed by a bundle-relative path. This
//! crate provides:
//!
//! - [`Storage`] trait with `read()` and `exists()` for those resources
//! - [`FsStorage`] reading a bundle from the local filesystem
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//! - [`Preferences`] key/value store standing in for browser local storage,
//!   with [`MemoryPreferences`] and [`FilePreferences`] backends
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docview_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("public"));
//! let manifest = storage.read("manifest.json")?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod preferences;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use preferences::{FilePreferences, MemoryPreferences, Preferences};
pub use storage::{Storage, StorageError, StorageErrorKind};
