//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// The bundle is served at the root and, when `base_prefix` is set, also
/// under `/{base_prefix}` as it would be on the production host.
pub(crate) fn create_router(state: Arc<AppState>, base_prefix: &str) -> Router {
    let api_routes = Router::new()
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/api/pages/{lang}/{*slug}", get(handlers::pages::get_page))
        .route("/api/search", get(handlers::search::search));

    let mut router = Router::new().merge(api_routes);

    let prefix = base_prefix.trim_matches('/');
    if !prefix.is_empty() {
        router = router.nest_service(&format!("/{prefix}"), static_files::bundle_service(&state));
    }
    router = router.fallback_service(static_files::bundle_service(&state));

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::header_layer(security::NOSNIFF))
                .layer(security::header_layer(security::DENY_FRAMING)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use docview_navigation::{HashRouting, LanguageSet, PathRouting, RouteCodec};
    use docview_site::{Site, SiteOptions};
    use docview_storage::{MockStorage, Storage, StorageErrorKind};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    const MANIFEST: &str = r#"{"categories": [{"order": 1, "title": {"ko": "설정", "en": "Setup"}, "items": [{"slug": "setup/x", "title": {"ko": "엑스", "en": "X"}}]}]}"#;
    const INDEX: &str = r#"[{"slug": "setup/x", "title": "Installation Guide", "desc": "x"}]"#;

    fn router_with(codec: Box<dyn RouteCodec>, bundle: &TempDir) -> Router {
        let storage = MockStorage::new()
            .with_file("manifest.json", MANIFEST)
            .with_file("search_index.json", INDEX)
            .with_file("content/v1.0/ko/setup/x.md", "# 엑스")
            .with_failure("content/v1.0/ko/setup/broken.md", StorageErrorKind::Unavailable);
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let state = Arc::new(AppState {
            site: Arc::new(Site::load(storage, SiteOptions::default())),
            languages: LanguageSet::default(),
            codec,
            bundle_dir: bundle.path().to_path_buf(),
        });
        create_router(state, "docs-platform")
    }

    fn bundle() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html>viewer</html>").unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/app.js"), "console.log(1)").unwrap();
        dir
    }

    async fn get_response(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = get_response(router, uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn test_navigation_uses_language_and_codec() {
        let bundle = bundle();
        let router = router_with(Box::new(PathRouting::new("docs-platform")), &bundle);

        let (status, json) = get_json(router, "/api/navigation?lang=en").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["lang"], "en");
        assert_eq!(json["categories"][0]["title"], "Setup");
        assert_eq!(
            json["categories"][0]["items"][0]["href"],
            "/docs-platform/en/setup/x"
        );
    }

    #[tokio::test]
    async fn test_navigation_unsupported_language_uses_default() {
        let bundle = bundle();
        let router = router_with(Box::new(HashRouting), &bundle);

        let (_, json) = get_json(router, "/api/navigation?lang=fr").await;

        assert_eq!(json["lang"], "ko");
        assert_eq!(json["categories"][0]["items"][0]["href"], "#/setup/x");
    }

    #[tokio::test]
    async fn test_page_renders_document() {
        let bundle = bundle();
        let router = router_with(Box::new(HashRouting), &bundle);

        let (status, json) = get_json(router, "/api/pages/ko/setup/x").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["slug"], "setup/x");
        assert!(json["html"].as_str().unwrap().starts_with("<h1>엑스</h1>"));
    }

    #[tokio::test]
    async fn test_page_error_statuses() {
        let bundle = bundle();

        let (status, json) = get_json(
            router_with(Box::new(HashRouting), &bundle),
            "/api/pages/ko/a/b/c/d",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid slug");

        let (status, json) = get_json(
            router_with(Box::new(HashRouting), &bundle),
            "/api/pages/ko/setup/missing",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["path"], "v1.0/ko/setup/missing.md");

        let (status, _) = get_json(
            router_with(Box::new(HashRouting), &bundle),
            "/api/pages/ko/setup/broken",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_search() {
        let bundle = bundle();

        let (_, json) = get_json(
            router_with(Box::new(HashRouting), &bundle),
            "/api/search?q=install",
        )
        .await;
        assert_eq!(json["results"][0]["slug"], "setup/x");

        let (_, json) = get_json(router_with(Box::new(HashRouting), &bundle), "/api/search").await;
        assert_eq!(json["results"], Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn test_static_files_and_spa_fallback() {
        let bundle = bundle();

        let (status, body) =
            get_response(router_with(Box::new(HashRouting), &bundle), "/assets/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1)");

        let (status, body) = get_response(
            router_with(Box::new(HashRouting), &bundle),
            "/docs-platform/ko/setup/x",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>viewer</html>");

        let (status, body) = get_response(
            router_with(Box::new(HashRouting), &bundle),
            "/docs-platform/assets/app.js",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1)");

        let (status, _) =
            get_response(router_with(Box::new(HashRouting), &bundle), "/missing.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_security_headers() {
        let bundle = bundle();
        let response = router_with(Box::new(HashRouting), &bundle)
            .oneshot(Request::get("/api/search?q=x").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }
}
