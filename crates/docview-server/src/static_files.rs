//! Static file serving.
//!
//! Serves the bundle directory with an SPA fallback: extensionless paths
//! that match no file get `index.html`, so path-routed URLs such as
//! `/docs-platform/ko/setup/install` load the viewer.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::handler::Handler;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Service serving files from the bundle directory.
pub(crate) fn bundle_service(state: &Arc<AppState>) -> Router {
    let fallback = spa_fallback.with_state(Arc::clone(state));
    Router::new().fallback_service(ServeDir::new(&state.bundle_dir).fallback(fallback))
}

/// Serve `index.html` for client-side routes.
async fn spa_fallback(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let is_spa_route = !path.starts_with("api/") && !path.contains('.');
    if !is_spa_route {
        return StatusCode::NOT_FOUND.into_response();
    }

    let index_path = state.bundle_dir.join("index.html");
    match tokio::fs::read_to_string(&index_path).await {
        Ok(content) => Html(content).into_response(),
        Err(e) => {
            tracing::debug!(path = %index_path.display(), error = %e, "No index.html in bundle");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
