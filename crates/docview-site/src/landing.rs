//! Landing page content.
//!
//! Each language has a JSON file `{landing_dir}/{lang}.json`. Loaded content
//! is cached per language. A language without its own file falls back to
//! English.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use docview_renderer::escape_html;
use docview_storage::{Storage, StorageError};
use serde::Deserialize;

use crate::messages::Message;

const FALLBACK_LANG: &str = "en";

/// Error loading landing content.
#[derive(Debug, thiserror::Error)]
pub enum LandingError {
    #[error("Failed to read landing content: {0}")]
    Storage(#[from] StorageError),
    #[error("Invalid landing content JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
}

/// Call-to-action card.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Action {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Actions {
    pub manual: Action,
    pub download: Action,
    pub email: Action,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LandingFooter {
    pub copyright: String,
    pub website: String,
}

/// Localized landing page content.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LandingContent {
    pub hero: Hero,
    pub actions: Actions,
    pub footer: LandingFooter,
}

impl LandingContent {
    /// Render the landing page. Every field is HTML-escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let card = |kind: &str, action: &Action| {
            format!(
                r#"<a class="landing-card landing-{kind}" href="{}"><h2>{}</h2><p>{}</p></a>"#,
                escape_html(action.href.as_deref().unwrap_or("#")),
                escape_html(&action.title),
                escape_html(&action.description)
            )
        };
        format!(
            concat!(
                r#"<div class="landing">"#,
                r#"<header class="landing-hero"><h1>{}</h1><p>{}</p></header>"#,
                r#"<div class="landing-actions">{}{}{}</div>"#,
                r#"<footer class="landing-footer"><span>{}</span><span>{}</span></footer>"#,
                "</div>"
            ),
            escape_html(&self.hero.title),
            escape_html(&self.hero.subtitle),
            card("manual", &self.actions.manual),
            card("download", &self.actions.download),
            card("email", &self.actions.email),
            escape_html(&self.footer.copyright),
            escape_html(&self.footer.website),
        )
    }
}

/// Per-language landing content cache.
#[derive(Debug)]
pub struct LandingPages {
    dir: String,
    cache: RwLock<HashMap<String, Arc<LandingContent>>>,
}

impl LandingPages {
    /// Create a cache reading from `dir` (e.g. `content/landing`).
    #[must_use]
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::default(),
        }
    }

    /// Content for `lang`, falling back to English.
    ///
    /// Returns the error for `lang` when the fallback fails too.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn load(
        &self,
        storage: &dyn Storage,
        lang: &str,
    ) -> Result<Arc<LandingContent>, LandingError> {
        match self.load_exact(storage, lang) {
            Ok(content) => Ok(content),
            Err(err) if lang != FALLBACK_LANG => {
                tracing::warn!(
                    lang,
                    error = %err,
                    "Landing content missing, falling back to English"
                );
                self.load_exact(storage, FALLBACK_LANG).map_err(|_| err)
            }
            Err(err) => Err(err),
        }
    }

    /// Rendered landing page, or a localized inline error.
    pub fn render(&self, storage: &dyn Storage, lang: &str) -> String {
        match self.load(storage, lang) {
            Ok(content) => content.to_html(),
            Err(err) => {
                tracing::error!(lang, error = %err, "Failed to load landing content");
                format!(
                    r#"<p class="content-error">{}</p>"#,
                    Message::LandingLoadFailed.text(lang)
                )
            }
        }
    }

    fn load_exact(
        &self,
        storage: &dyn Storage,
        lang: &str,
    ) -> Result<Arc<LandingContent>, LandingError> {
        if let Some(content) = self.cache.read().unwrap().get(lang) {
            return Ok(Arc::clone(content));
        }

        let path = format!("{}/{lang}.json", self.dir.trim_end_matches('/'));
        let content: Arc<LandingContent> = Arc::new(serde_json::from_str(&storage.read(&path)?)?);
        self.cache
            .write()
            .unwrap()
            .insert(lang.to_owned(), Arc::clone(&content));
        Ok(content)
    }
}
