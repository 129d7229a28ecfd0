//! Pages API endpoint.
//!
//! Validates the slug, reads the document from the bundle and returns the
//! rendered HTML.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/pages/{lang}/{*slug}.
#[derive(Debug, Serialize)]
pub(crate) struct PageResponse {
    lang: String,
    slug: String,
    /// Rendered document including the footer.
    html: String,
}

/// Handle GET /api/pages/{lang}/{*slug}.
pub(crate) async fn get_page(
    State(state): State<Arc<AppState>>,
    Path((lang, slug)): Path<(String, String)>,
) -> Result<Json<PageResponse>, ServerError> {
    let lang = state.languages.coerce(&lang);
    let document = state.site.load_document(&slug, &lang)?;
    Ok(Json(PageResponse {
        lang: document.lang,
        slug: document.slug,
        html: document.html,
    }))
}
