//! Search API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use docview_site::SearchEntry;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Query string for GET /api/search.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Response for GET /api/search.
#[derive(Debug, Serialize)]
pub(crate) struct SearchResponse {
    query: String,
    /// Top matches in index order; empty for a blank query.
    results: Vec<SearchEntry>,
}

/// Handle GET /api/search.
pub(crate) async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let results = state.site.search(&query.q);
    tracing::debug!(query = %query.q, results = results.len(), "Search request");
    Json(SearchResponse {
        results: results.entries().to_vec(),
        query: query.q,
    })
}
