//! Navigation API endpoint.
//!
//! Returns the sidebar tree for one language.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use docview_site::Sidebar;
use serde::Deserialize;

use crate::state::AppState;

/// Query string for GET /api/navigation.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NavigationQuery {
    /// Language code; unsupported or missing means the default.
    lang: Option<String>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NavigationQuery>,
) -> Json<Sidebar> {
    let lang = state
        .languages
        .coerce(query.lang.as_deref().unwrap_or(state.languages.default_language()));
    Json(state.sidebar(&lang))
}
