//! Persisted language preference.

use std::sync::Arc;

use docview_storage::Preferences;

use crate::language::LanguageSet;

/// Preference key holding the last-used language code.
pub const LANGUAGE_KEY: &str = "lang";

/// Last-used language, persisted through [`Preferences`].
///
/// Storage failures are swallowed: the session keeps an in-memory copy so a
/// choice made in this session survives even when the store is unavailable.
pub struct LanguagePreference {
    store: Arc<dyn Preferences>,
    session: Option<String>,
}

impl LanguagePreference {
    #[must_use]
    pub fn new(store: Arc<dyn Preferences>) -> Self {
        Self {
            store,
            session: None,
        }
    }

    /// Stored language if supported, otherwise the session value, otherwise
    /// the default.
    #[must_use]
    pub fn stored_or_default(&self, languages: &LanguageSet) -> String {
        match self.store.get(LANGUAGE_KEY) {
            Ok(Some(code)) if languages.is_supported(&code) => return code,
            Ok(Some(code)) => {
                tracing::warn!(language = %code, "Ignoring unsupported stored language");
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to read language preference"),
        }
        self.session
            .as_deref()
            .filter(|code| languages.is_supported(code))
            .unwrap_or(languages.default_language())
            .to_owned()
    }

    /// Remember `lang` for this session and try to persist it.
    pub fn persist(&mut self, lang: &str) {
        self.session = Some(lang.to_owned());
        if let Err(e) = self.store.set(LANGUAGE_KEY, lang) {
            tracing::warn!(error = %e, language = lang, "Failed to persist language preference");
        }
    }

    /// Language remembered in this session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }
}

impl std::fmt::Debug for LanguagePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguagePreference")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
