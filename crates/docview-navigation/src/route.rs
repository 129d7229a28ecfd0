//! Routes and routing-mode strategies.
//!
//! A [`Route`] is the `(language, slug)` pair the viewer is showing. A
//! [`RouteCodec`] translates between routes and locations for one routing
//! mode:
//!
//! | Mode | Document | Landing |
//! |------|----------|---------|
//! | hash | `#/setup/install` | no fragment |
//! | path | `/docs-platform/ko/setup/install` | `/docs-platform/ko` |
//!
//! Hash locations carry no language; the stored preference supplies it.

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

pub use docview_config::RoutingMode;

use crate::language::LanguageSet;
use crate::location::{LocationSnapshot, LocationUpdate};

/// Characters escaped in a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Externally visible location in viewer terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub language: String,
    /// Empty for the landing page.
    pub slug: String,
}

impl Route {
    #[must_use]
    pub fn new(language: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            slug: slug.into(),
        }
    }

    /// Landing page route.
    #[must_use]
    pub fn landing(language: impl Into<String>) -> Self {
        Self::new(language, "")
    }

    /// Whether this is the landing page. Only the exact empty slug counts.
    #[must_use]
    pub fn is_landing(&self) -> bool {
        self.slug.is_empty()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_landing() {
            write!(f, "{}:/", self.language)
        } else {
            write!(f, "{}:{}", self.language, self.slug)
        }
    }
}

/// Location encoding for one routing mode.
pub trait RouteCodec: Send + Sync + fmt::Debug {
    fn mode(&self) -> RoutingMode;

    /// Parse a location.
    ///
    /// `fallback_language` (stored preference or default) applies when the
    /// location carries no supported language. Never fails: a malformed
    /// location yields the default-language landing route.
    fn parse(
        &self,
        location: &LocationSnapshot,
        languages: &LanguageSet,
        fallback_language: &str,
    ) -> Route;

    /// Link target for a route.
    fn href(&self, route: &Route) -> String;

    /// Location rewrite that makes the address bar show `route`.
    fn serialize(&self, route: &Route) -> LocationUpdate {
        let href = self.href(route);
        match self.mode() {
            RoutingMode::Hash => LocationUpdate::SetHash(href),
            RoutingMode::Path => LocationUpdate::PushPath(href),
        }
    }

    /// Whether `location` already shows `route`.
    fn is_current(&self, location: &LocationSnapshot, route: &Route) -> bool;
}

/// Build the codec for a routing mode.
#[must_use]
pub fn codec_for(mode: RoutingMode, base_prefix: &str) -> Box<dyn RouteCodec> {
    match mode {
        RoutingMode::Hash => Box::new(HashRouting),
        RoutingMode::Path => Box::new(PathRouting::new(base_prefix)),
    }
}

/// Percent-decode and re-join slug segments. `None` if any segment is not UTF-8.
fn decode_segments<'a>(segments: impl Iterator<Item = &'a str>) -> Option<String> {
    let decoded: Result<Vec<_>, _> = segments
        .map(|s| percent_decode_str(s).decode_utf8())
        .collect();
    decoded.ok().map(|parts| parts.join("/"))
}

fn encode_slug(slug: &str) -> String {
    slug.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Fragment routing: `#/slug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashRouting;

impl HashRouting {
    fn fragment_slug(hash: &str) -> &str {
        let rest = hash.strip_prefix('#').unwrap_or(hash);
        rest.strip_prefix('/').unwrap_or(rest)
    }
}

impl RouteCodec for HashRouting {
    fn mode(&self) -> RoutingMode {
        RoutingMode::Hash
    }

    fn parse(
        &self,
        location: &LocationSnapshot,
        languages: &LanguageSet,
        fallback_language: &str,
    ) -> Route {
        let raw = Self::fragment_slug(&location.hash);
        match decode_segments(std::iter::once(raw)) {
            Some(slug) => Route::new(fallback_language, slug),
            None => {
                tracing::warn!(hash = %location.hash, "Malformed fragment, showing landing page");
                Route::landing(languages.default_language())
            }
        }
    }

    fn href(&self, route: &Route) -> String {
        if route.is_landing() {
            String::new()
        } else {
            format!("#/{}", encode_slug(&route.slug))
        }
    }

    fn is_current(&self, location: &LocationSnapshot, route: &Route) -> bool {
        let current = Self::fragment_slug(&location.hash);
        if route.is_landing() {
            current.is_empty()
        } else {
            current == encode_slug(&route.slug)
        }
    }
}

/// Path routing: `/{prefix}/{lang}/{slug}`.
#[derive(Debug, Clone)]
pub struct PathRouting {
    prefix: String,
}

impl PathRouting {
    /// Create a codec serving under `prefix` (surrounding slashes optional).
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Path below the prefix, without surrounding slashes.
    fn strip_prefix<'a>(&self, path: &'a str) -> &'a str {
        let path = path.trim_matches('/');
        if self.prefix.is_empty() {
            return path;
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some("") => "",
            Some(rest) if rest.starts_with('/') => &rest[1..],
            _ => path,
        }
    }
}

impl RouteCodec for PathRouting {
    fn mode(&self) -> RoutingMode {
        RoutingMode::Path
    }

    fn parse(
        &self,
        location: &LocationSnapshot,
        languages: &LanguageSet,
        fallback_language: &str,
    ) -> Route {
        let rest = self.strip_prefix(&location.path);
        if rest.is_empty() {
            return Route::landing(fallback_language);
        }

        let mut segments = rest.split('/');
        let first = segments.next().unwrap_or_default();
        let Some(first) = decode_segments(std::iter::once(first)) else {
            tracing::warn!(path = %location.path, "Malformed path, showing landing page");
            return Route::landing(languages.default_language());
        };

        // Language and slug parse independently: an unsupported language
        // segment keeps the slug that follows it.
        let language = if languages.is_supported(&first) {
            first
        } else if LanguageSet::looks_like_code(&first) {
            tracing::warn!(language = %first, "Unsupported language in path");
            fallback_language.to_owned()
        } else {
            return Route::landing(fallback_language);
        };

        match decode_segments(segments) {
            Some(slug) => Route::new(language, slug),
            None => {
                tracing::warn!(path = %location.path, "Malformed path, showing landing page");
                Route::landing(languages.default_language())
            }
        }
    }

    fn href(&self, route: &Route) -> String {
        let mut href = String::from("/");
        if !self.prefix.is_empty() {
            href.push_str(&self.prefix);
            href.push('/');
        }
        href.push_str(&utf8_percent_encode(&route.language, SEGMENT).to_string());
        if !route.is_landing() {
            href.push('/');
            href.push_str(&encode_slug(&route.slug));
        }
        href
    }

    fn is_current(&self, location: &LocationSnapshot, route: &Route) -> bool {
        location.hash.is_empty()
            && location.path.trim_end_matches('/') == self.href(route).trim_end_matches('/')
    }
}
