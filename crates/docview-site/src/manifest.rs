//! Sidebar manifest model.
//!
//! The manifest is a JSON document listing sidebar categories:
//!
//! ```json
//! {
//!   "categories": [
//!     {
//!       "order": 1,
//!       "title": { "ko": "설정", "en": "Setup" },
//!       "items": [
//!         { "slug": "setup/install", "title": { "ko": "설치", "en": "Install" } }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use docview_storage::{Storage, StorageError};
use serde::{Deserialize, Serialize};

/// Error loading the manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    Storage(#[from] StorageError),
    #[error("Invalid manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Text keyed by language code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    /// Text for `lang`, falling back to English, then to the first
    /// available language in code order, then to `""`.
    #[must_use]
    pub fn get(&self, lang: &str) -> &str {
        self.0
            .get(lang)
            .or_else(|| self.0.get("en"))
            .or_else(|| self.0.values().next())
            .map_or("", String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One sidebar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestItem {
    pub slug: String,
    pub title: LocalizedText,
}

/// A group of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Sort key. Ties keep manifest order.
    pub order: i64,
    pub title: LocalizedText,
    #[serde(default)]
    pub items: Vec<ManifestItem>,
}

/// Parsed sidebar manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse the manifest at `path`.
    pub fn load(storage: &dyn Storage, path: &str) -> Result<Self, ManifestError> {
        let manifest = Self::from_json(&storage.read(path)?)?;
        tracing::debug!(
            categories = manifest.categories.len(),
            items = manifest.items().count(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// All items across categories, in manifest order.
    pub fn items(&self) -> impl Iterator<Item = &ManifestItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    /// Deepest slug in the manifest, counted in `/`-separated segments.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.items()
            .map(|item| item.slug.split('/').count())
            .max()
            .unwrap_or(0)
    }
}
