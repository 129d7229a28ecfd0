//! Supported language set.

use docview_config::LanguagesConfig;

/// Language codes the site ships content for, plus the default.
///
/// The default is always a member of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    supported: Vec<String>,
    default: String,
}

impl LanguageSet {
    /// Create a set. A default missing from `supported` is added to it.
    #[must_use]
    pub fn new(supported: Vec<String>, default: impl Into<String>) -> Self {
        let default = default.into();
        let mut supported = supported;
        if !supported.contains(&default) {
            supported.insert(0, default.clone());
        }
        Self { supported, default }
    }

    #[must_use]
    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default
    }

    #[must_use]
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.iter().any(|s| s == code)
    }

    /// `code` if supported, otherwise the default.
    ///
    /// Coercion is logged as a warning.
    #[must_use]
    pub fn coerce(&self, code: &str) -> String {
        if self.is_supported(code) {
            code.to_owned()
        } else {
            tracing::warn!(
                language = code,
                default = %self.default,
                "Unsupported language, using default"
            );
            self.default.clone()
        }
    }

    /// Whether a path segment has the shape of a language code (`fr`, `ja`).
    #[must_use]
    pub fn looks_like_code(segment: &str) -> bool {
        segment.len() == 2 && segment.bytes().all(|b| b.is_ascii_lowercase())
    }
}

impl Default for LanguageSet {
    fn default() -> Self {
        Self::from(&LanguagesConfig::default())
    }
}

impl From<&LanguagesConfig> for LanguageSet {
    fn from(config: &LanguagesConfig) -> Self {
        Self::new(config.supported.clone(), config.default.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let languages = LanguageSet::default();

        assert_eq!(languages.supported(), ["ko", "en"]);
        assert_eq!(languages.default_language(), "ko");
    }

    #[test]
    fn test_coerce() {
        let languages = LanguageSet::default();

        assert_eq!(languages.coerce("en"), "en");
        assert_eq!(languages.coerce("fr"), "ko");
        assert_eq!(languages.coerce(""), "ko");
        assert_eq!(languages.coerce("EN"), "ko");
    }

    #[test]
    fn test_default_added_to_supported() {
        let languages = LanguageSet::new(vec!["en".to_owned()], "ja");

        assert!(languages.is_supported("ja"));
        assert_eq!(languages.supported(), ["ja", "en"]);
    }

    #[test]
    fn test_looks_like_code() {
        assert!(LanguageSet::looks_like_code("fr"));
        assert!(!LanguageSet::looks_like_code("setup"));
        assert!(!LanguageSet::looks_like_code("FR"));
        assert!(!LanguageSet::looks_like_code("f"));
    }
}
