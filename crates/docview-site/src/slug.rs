//! Document slug validation.
//!
//! Every slug is validated before a resource path is built from it. A slug
//! that passes can only name a file below the content root.

use regex::Regex;

/// Default character allow-list.
pub const DEFAULT_SLUG_PATTERN: &str = "^[A-Za-z0-9_/-]+$";

/// Default maximum number of `/`-separated segments.
pub const DEFAULT_MAX_SLUG_DEPTH: usize = 3;

/// Reason a slug was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,
    #[error("slug {0:?} contains characters outside the allowed set")]
    InvalidCharacters(String),
    #[error("slug {0:?} has an empty path segment")]
    EmptySegment(String),
    #[error("slug {slug:?} has {depth} segments, at most {max} allowed")]
    TooDeep {
        slug: String,
        depth: usize,
        max: usize,
    },
}

/// Slug allow-list and depth limit.
#[derive(Debug, Clone)]
pub struct SlugPolicy {
    pattern: Regex,
    max_depth: usize,
}

impl SlugPolicy {
    /// Create a policy from a character pattern and a depth limit.
    pub fn new(pattern: &str, max_depth: usize) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            max_depth,
        })
    }

    /// Maximum number of segments.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validate a slug.
    ///
    /// Rejects, in order: empty or whitespace-only slugs, characters outside
    /// the pattern, empty segments (`"/"`, `"a//b"`, `"a/"`) and slugs deeper
    /// than the limit. Dots are outside the default pattern, which rules out
    /// `..` traversal.
    pub fn validate<'a>(&self, slug: &'a str) -> Result<&'a str, SlugError> {
        if slug.trim().is_empty() {
            return Err(SlugError::Empty);
        }
        if !self.pattern.is_match(slug) {
            return Err(SlugError::InvalidCharacters(slug.to_owned()));
        }
        if slug.split('/').any(str::is_empty) {
            return Err(SlugError::EmptySegment(slug.to_owned()));
        }
        let depth = slug.split('/').count();
        if depth > self.max_depth {
            return Err(SlugError::TooDeep {
                slug: slug.to_owned(),
                depth,
                max: self.max_depth,
            });
        }
        Ok(slug)
    }
}

impl Default for SlugPolicy {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_SLUG_PATTERN).expect("default slug pattern is valid"),
            max_depth: DEFAULT_MAX_SLUG_DEPTH,
        }
    }
}
