//! Asset reference rewriting.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Matches a relative or root-anchored `assets/` reference at the start of a URL.
static ASSET_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\.\./)*/?assets/").expect("valid asset URL regex"));

/// Matches `src="…assets/` inside raw HTML.
static ASSET_SRC_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="(?:\.\./)*/?assets/"#).expect("valid asset src regex"));

/// Rewrites asset references so they resolve against the active base path.
///
/// Documents reference images as `../assets/x.png`, `../../assets/x.png` or
/// `/assets/x.png`. All three forms point at the bundle's `assets/` directory,
/// which lives at `./` under hash routing and at `/{prefix}/` under path routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRewriter {
    base: String,
}

impl AssetRewriter {
    /// Create a rewriter for the given base path.
    ///
    /// A missing trailing slash is added.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    /// Base path assets resolve against.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Rewrite a single URL (e.g. a markdown image destination).
    ///
    /// URLs that do not point into `assets/` are returned unchanged.
    #[must_use]
    pub fn rewrite_url<'a>(&self, url: &'a str) -> Cow<'a, str> {
        ASSET_URL.replace(url, format!("{}assets/", self.base))
    }

    /// Rewrite every `src="…assets/` attribute inside a raw HTML fragment.
    #[must_use]
    pub fn rewrite_html<'a>(&self, html: &'a str) -> Cow<'a, str> {
        ASSET_SRC_ATTR.replace_all(html, format!(r#"src="{}assets/"#, self.base))
    }
}
