//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use docview_navigation::{LanguageSet, Route, RouteCodec};
use docview_site::{Sidebar, Site};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Loaded bundle.
    pub(crate) site: Arc<Site>,
    /// Supported languages.
    pub(crate) languages: LanguageSet,
    /// Link encoding for sidebar hrefs.
    pub(crate) codec: Box<dyn RouteCodec>,
    /// Bundle root, for the SPA fallback.
    pub(crate) bundle_dir: PathBuf,
}

impl AppState {
    /// Sidebar for `lang` with links in the served routing mode.
    pub(crate) fn sidebar(&self, lang: &str) -> Sidebar {
        let codec = self.codec.as_ref();
        self.site
            .sidebar(lang, |slug| codec.href(&Route::new(lang, slug)))
    }
}
