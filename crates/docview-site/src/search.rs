//! In-memory search over the preloaded index.

use docview_renderer::{escape_html, highlight};
use docview_storage::{Storage, StorageError};
use serde::{Deserialize, Serialize};

use crate::messages::Message;

/// Default number of results shown.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Error loading the search index.
#[derive(Debug, thiserror::Error)]
pub enum SearchIndexError {
    #[error("Failed to read search index: {0}")]
    Storage(#[from] StorageError),
    #[error("Invalid search index JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One searchable document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

/// Outcome of a query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchResults {
    /// Blank query: the results box is not shown.
    #[default]
    Hidden,
    /// Non-blank query without matches: an explicit "no results" line.
    NoResults { query: String },
    /// Matches in index order.
    Matches {
        query: String,
        entries: Vec<SearchEntry>,
    },
}

impl SearchResults {
    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Matches { entries, .. } => entries.len(),
            Self::Hidden | Self::NoResults { .. } => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the results box is displayed.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Matched entries, empty unless there were matches.
    #[must_use]
    pub fn entries(&self) -> &[SearchEntry] {
        match self {
            Self::Matches { entries, .. } => entries,
            Self::Hidden | Self::NoResults { .. } => &[],
        }
    }

    /// Render the results box content.
    #[must_use]
    pub fn to_html(&self, lang: &str) -> String {
        match self {
            Self::Hidden => String::new(),
            Self::NoResults { .. } => format!(
                r#"<div class="search-empty">{}</div>"#,
                Message::NoSearchResults.text(lang)
            ),
            Self::Matches { query, entries } => entries
                .iter()
                .map(|entry| {
                    format!(
                        r#"<div class="search-result" data-slug="{}"><div class="search-title">{}</div><div class="search-desc">{}</div></div>"#,
                        escape_html(&entry.slug),
                        highlight(&entry.title, query),
                        highlight(&entry.desc, query)
                    )
                })
                .collect(),
        }
    }
}

/// Flat list of searchable documents, loaded once.
#[derive(Clone, Debug, Default)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    max_results: usize,
}

impl SearchIndex {
    #[must_use]
    pub fn new(entries: Vec<SearchEntry>, max_results: usize) -> Self {
        Self {
            entries,
            max_results,
        }
    }

    /// Parse the index from a JSON array.
    pub fn from_json(json: &str, max_results: usize) -> Result<Self, SearchIndexError> {
        Ok(Self::new(serde_json::from_str(json)?, max_results))
    }

    /// Read and parse the index at `path`.
    pub fn load(
        storage: &dyn Storage,
        path: &str,
        max_results: usize,
    ) -> Result<Self, SearchIndexError> {
        let index = Self::from_json(&storage.read(path)?, max_results)?;
        tracing::debug!(entries = index.len(), "Loaded search index");
        Ok(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find entries whose title or description contains `text`,
    /// case-insensitively.
    #[must_use]
    pub fn query(&self, text: &str) -> SearchResults {
        let query = text.trim();
        if query.is_empty() {
            return SearchResults::Hidden;
        }

        let needle = query.to_lowercase();
        let entries: Vec<SearchEntry> = self
            .entries
            .iter()
            .filter(|entry| {
                entry.title.to_lowercase().contains(&needle)
                    || entry.desc.to_lowercase().contains(&needle)
            })
            .take(self.max_results)
            .cloned()
            .collect();

        tracing::debug!(query, results = entries.len(), "Search");
        if entries.is_empty() {
            SearchResults::NoResults {
                query: query.to_owned(),
            }
        } else {
            SearchResults::Matches {
                query: query.to_owned(),
                entries,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use docview_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    const INDEX: &str = r#"[
        {"slug": "setup/install", "title": "Installation Guide", "desc": "How to install"},
        {"slug": "setup/config", "title": "Configuration", "desc": "After you INSTALL it"},
        {"slug": "extension/jump", "title": "Jump", "desc": "Jump extension"},
        {"slug": "a", "title": "install a"},
        {"slug": "b", "title": "install b"},
        {"slug": "c", "title": "install c"},
        {"slug": "d", "title": "install d"}
    ]"#;

    fn index() -> SearchIndex {
        SearchIndex::from_json(INDEX, DEFAULT_MAX_RESULTS).unwrap()
    }

    #[test]
    fn test_query_finds_title_match() {
        let results = index().query("install");

        assert!(
            results
                .entries()
                .iter()
                .any(|e| e.title == "Installation Guide")
        );
    }

    #[test]
    fn test_query_caps_and_keeps_index_order() {
        let results = index().query("INSTALL");

        let slugs: Vec<&str> = results.entries().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["setup/install", "setup/config", "a", "b", "c"]);
    }

    #[test]
    fn test_query_matches_description() {
        let results = index().query("extension");

        assert_eq!(results.len(), 1);
        assert_eq!(results.entries()[0].slug, "extension/jump");
    }

    #[test]
    fn test_blank_query_is_hidden() {
        assert_eq!(index().query(""), SearchResults::Hidden);
        assert_eq!(index().query("   "), SearchResults::Hidden);
        assert!(!index().query("").is_visible());
    }

    #[test]
    fn test_no_match_is_explicit() {
        let results = index().query("zzzznomatch");

        assert_eq!(
            results,
            SearchResults::NoResults {
                query: "zzzznomatch".to_owned()
            }
        );
        assert!(results.is_visible());
        assert!(results.is_empty());
        assert_eq!(
            results.to_html("ko"),
            r#"<div class="search-empty">검색 결과 없음</div>"#
        );
    }

    #[test]
    fn test_results_html_highlights() {
        let html = index().query("jump").to_html("en");

        assert_eq!(
            html,
            concat!(
                r#"<div class="search-result" data-slug="extension/jump">"#,
                r#"<div class="search-title"><mark class="search-hit">Jump</mark></div>"#,
                r#"<div class="search-desc"><mark class="search-hit">Jump</mark> extension</div></div>"#
            )
        );
    }

    #[test]
    fn test_hidden_html_is_empty() {
        assert_eq!(SearchResults::Hidden.to_html("en"), "");
    }

    #[test]
    fn test_load_from_storage() {
        let storage = MockStorage::new().with_file("search_index.json", INDEX);

        let index = SearchIndex::load(&storage, "search_index.json", 2).unwrap();

        assert_eq!(index.len(), 7);
        assert_eq!(index.query("install").len(), 2);
    }

    #[test]
    fn test_load_invalid_json() {
        let storage = MockStorage::new().with_file("search_index.json", "{}");

        assert!(matches!(
            SearchIndex::load(&storage, "search_index.json", 5),
            Err(SearchIndexError::Parse(_))
        ));
    }
}
