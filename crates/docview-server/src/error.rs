//! Error types for the preview server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docview_site::{ContentError, SlugError};
use docview_storage::{StorageError};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Slug failed validation.
    #[error("Invalid slug: {0}")]
    InvalidSlug(#[from] SlugError),

    /// No document at the given resource.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Storage failure other than a missing document.
    #[error("Storage error: {0}")]
    Storage(#[source] StorageError),

    /// Unusable server configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ContentError> for ServerError {
    fn from(error: ContentError) -> Self {
        match error {
            ContentError::InvalidSlug(e) => Self::InvalidSlug(e),
            ContentError::Load {
                display_path,
                source,
            } if source.is_missing() => Self::PageNotFound(display_path),
            ContentError::Load { source, .. } => Self::Storage(source),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::InvalidSlug(e) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid slug", "detail": e.to_string()}),
            ),
            Self::PageNotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Page not found", "path": path}),
            ),
            Self::Storage(e) => {
                tracing::error!(error = %e, "Storage failure while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": e.to_string()}),
                )
            }
            Self::Config(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": message}),
            ),
            Self::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": e.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use docview_storage::StorageErrorKind;

    use super::*;

    #[test]
    fn test_content_error_mapping() {
        let not_found = ContentError::Load {
            display_path: "v1.0/ko/a.md".to_owned(),
            source: StorageError::not_found("content/v1.0/ko/a.md"),
        };
        let unavailable = ContentError::Load {
            display_path: "v1.0/ko/a.md".to_owned(),
            source: StorageError::new(StorageErrorKind::Unavailable),
        };

        assert!(matches!(
            ServerError::from(not_found),
            ServerError::PageNotFound(path) if path == "v1.0/ko/a.md"
        ));
        assert!(matches!(
            ServerError::from(unavailable),
            ServerError::Storage(_)
        ));
        assert!(matches!(
            ServerError::from(ContentError::InvalidSlug(SlugError::Empty)),
            ServerError::InvalidSlug(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServerError::InvalidSlug(SlugError::Empty)
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::PageNotFound("x".to_owned())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::Storage(StorageError::new(StorageErrorKind::Other))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
