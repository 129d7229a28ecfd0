//! Site facade.
//!
//! [`Site`] owns the bundle storage and everything loaded from it once at
//! startup: the manifest and the search index. Documents and landing pages
//! are read on demand.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use docview_site::{Site, SiteOptions};
//! use docview_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("public")));
//! let site = Site::load(storage, SiteOptions::default());
//!
//! let document = site.load_document("setup/install", "ko")?;
//! ```

use std::sync::Arc;

use docview_config::{Config, RoutingMode};
use docview_diagnostics::{CaptureOptions, ErrorCategory, ErrorHandler, ErrorSeverity};
use docview_storage::Storage;

use crate::content::{ContentError, ContentLoader, ContentSettings};
use crate::landing::LandingPages;
use crate::manifest::Manifest;
use crate::search::{DEFAULT_MAX_RESULTS, SearchIndex, SearchResults};
use crate::sidebar::Sidebar;
use crate::slug::SlugPolicy;

/// Bundle layout and behavior settings.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    pub manifest_path: String,
    pub search_index_path: String,
    pub landing_dir: String,
    pub max_results: usize,
    pub slug_policy: SlugPolicy,
    pub content: ContentSettings,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            manifest_path: "manifest.json".to_owned(),
            search_index_path: "search_index.json".to_owned(),
            landing_dir: "content/landing".to_owned(),
            max_results: DEFAULT_MAX_RESULTS,
            slug_policy: SlugPolicy::default(),
            content: ContentSettings::default(),
        }
    }
}

impl SiteOptions {
    /// Options for a loaded configuration served in `mode`.
    ///
    /// Fails only if the configured slug pattern does not compile.
    pub fn from_config(config: &Config, mode: RoutingMode) -> Result<Self, regex::Error> {
        Ok(Self {
            manifest_path: config.site.manifest.clone(),
            search_index_path: config.site.search_index.clone(),
            landing_dir: config.site.landing_dir.clone(),
            max_results: config.search.max_results,
            slug_policy: SlugPolicy::new(
                &config.security.slug_pattern,
                config.security.max_slug_depth,
            )?,
            content: ContentSettings {
                content_root: config.site.content_root.clone(),
                doc_version: config.site.doc_version.clone(),
                footer: config.site.footer.clone(),
                asset_base: config.site.asset_base(mode),
            },
        })
    }
}

/// Rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub slug: String,
    pub lang: String,
    pub html: String,
}

/// Documentation bundle with its preloaded indexes.
pub struct Site {
    storage: Arc<dyn Storage>,
    manifest: Manifest,
    search: SearchIndex,
    landing: LandingPages,
    content: ContentLoader,
}

impl Site {
    /// Load the manifest and search index from `storage`.
    ///
    /// A manifest or index that cannot be loaded is captured as an error and
    /// replaced by an empty one, so the viewer still starts.
    pub fn load(storage: Arc<dyn Storage>, options: SiteOptions) -> Self {
        let errors = ErrorHandler::new();

        let manifest = Manifest::load(storage.as_ref(), &options.manifest_path).unwrap_or_else(|e| {
            errors.capture(
                &e,
                CaptureOptions::new(ErrorCategory::Ui).with_severity(ErrorSeverity::High),
            );
            Manifest::default()
        });

        let search = SearchIndex::load(
            storage.as_ref(),
            &options.search_index_path,
            options.max_results,
        )
        .unwrap_or_else(|e| {
            errors.capture(
                &e,
                CaptureOptions::new(ErrorCategory::Search).with_severity(ErrorSeverity::Medium),
            );
            SearchIndex::new(Vec::new(), options.max_results)
        });

        Self::new(storage, manifest, search, options)
    }

    /// Assemble a site from already loaded parts.
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        manifest: Manifest,
        search: SearchIndex,
        options: SiteOptions,
    ) -> Self {
        let depth = manifest.max_depth();
        if depth > options.slug_policy.max_depth() {
            tracing::warn!(
                manifest_depth = depth,
                max_depth = options.slug_policy.max_depth(),
                "Manifest contains slugs deeper than the slug depth limit"
            );
        }

        Self {
            storage,
            manifest,
            search,
            landing: LandingPages::new(options.landing_dir),
            content: ContentLoader::new(options.slug_policy, options.content),
        }
    }

    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    #[must_use]
    pub fn search_index(&self) -> &SearchIndex {
        &self.search
    }

    #[must_use]
    pub fn content(&self) -> &ContentLoader {
        &self.content
    }

    #[must_use]
    pub fn landing(&self) -> &LandingPages {
        &self.landing
    }

    /// Build the sidebar for `lang`.
    pub fn sidebar(&self, lang: &str, href_for: impl Fn(&str) -> String) -> Sidebar {
        Sidebar::build(lang, &self.manifest, href_for)
    }

    /// Query the search index.
    #[must_use]
    pub fn search(&self, text: &str) -> SearchResults {
        self.search.query(text)
    }

    /// Validate, fetch and render a document in one step.
    pub fn load_document(&self, slug: &str, lang: &str) -> Result<Document, ContentError> {
        let request = self.content.request(slug, lang)?;
        let markdown = self.content.fetch(self.storage(), &request)?;
        Ok(Document {
            html: self.content.render(&markdown),
            slug: request.slug,
            lang: request.lang,
        })
    }

    /// Rendered landing page for `lang`.
    #[must_use]
    pub fn landing_html(&self, lang: &str) -> String {
        self.landing.render(self.storage(), lang)
    }
}
