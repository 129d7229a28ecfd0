//! Document loading.
//!
//! Loading is split into three steps so that the caller controls when the
//! result is applied:
//!
//! 1. [`ContentLoader::request`] validates the slug and builds the resource path.
//! 2. [`ContentLoader::fetch`] reads the markdown through [`Storage`].
//! 3. [`ContentLoader::render`] produces the document pane HTML.
//!
//! No resource path is ever built from a slug that failed validation.

use docview_diagnostics::{CaptureOptions, ErrorCategory, ErrorSeverity};
use docview_renderer::{MarkdownRenderer, escape_html};
use docview_storage::{Storage, StorageError};

use crate::messages::Message;
use crate::slug::{SlugError, SlugPolicy};

/// Error loading a document.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Invalid slug: {0}")]
    InvalidSlug(#[from] SlugError),
    #[error("No document found at {display_path}: {source}")]
    Load {
        /// `{version}/{lang}/{slug}.md`, shown to the user.
        display_path: String,
        #[source]
        source: StorageError,
    },
}

impl ContentError {
    /// How the failure should be captured.
    ///
    /// Invalid slugs are medium-severity content errors. Load failures are
    /// high severity and shown to the user; unavailable or timed-out storage
    /// counts as a network error.
    #[must_use]
    pub fn capture_options(&self) -> CaptureOptions {
        match self {
            Self::InvalidSlug(_) => {
                CaptureOptions::new(ErrorCategory::Content).with_severity(ErrorSeverity::Medium)
            }
            Self::Load { source, .. } => {
                let category = if source.is_transient() {
                    ErrorCategory::Network
                } else {
                    ErrorCategory::Content
                };
                CaptureOptions::new(category)
                    .with_severity(ErrorSeverity::High)
                    .shown_to_user()
            }
        }
    }
}

/// Validated document request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub slug: String,
    pub lang: String,
    /// Bundle-relative path, e.g. `content/v1.0/ko/setup/x.md`.
    pub resource_path: String,
    /// Version-scoped path shown in error messages, e.g. `v1.0/ko/setup/x.md`.
    pub display_path: String,
}

/// Content location and page decoration settings.
#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub content_root: String,
    pub doc_version: String,
    /// Footer text appended to every document.
    pub footer: String,
    /// Base path assets resolve against (`./` or `/{prefix}/`).
    pub asset_base: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            content_root: "content".to_owned(),
            doc_version: "v1.0".to_owned(),
            footer: "© 2025 RBWare Co., Ltd. All rights reserved.".to_owned(),
            asset_base: "./".to_owned(),
        }
    }
}

/// Validates, fetches and renders documents.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    policy: SlugPolicy,
    settings: ContentSettings,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    #[must_use]
    pub fn new(policy: SlugPolicy, settings: ContentSettings) -> Self {
        let renderer = MarkdownRenderer::new().with_asset_base(settings.asset_base.clone());
        Self {
            policy,
            settings,
            renderer,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &SlugPolicy {
        &self.policy
    }

    /// Validate `slug` and build the resource path for `lang`.
    pub fn request(&self, slug: &str, lang: &str) -> Result<ContentRequest, ContentError> {
        let slug = self.policy.validate(slug)?;
        let ContentSettings {
            content_root,
            doc_version,
            ..
        } = &self.settings;
        let display_path = format!("{doc_version}/{lang}/{slug}.md");
        Ok(ContentRequest {
            slug: slug.to_owned(),
            lang: lang.to_owned(),
            resource_path: format!("{content_root}/{display_path}"),
            display_path,
        })
    }

    /// Read the markdown for a validated request.
    pub fn fetch(
        &self,
        storage: &dyn Storage,
        request: &ContentRequest,
    ) -> Result<String, ContentError> {
        tracing::info!(slug = %request.slug, lang = %request.lang, "Loading doc");
        storage
            .read(&request.resource_path)
            .map_err(|source| ContentError::Load {
                display_path: request.display_path.clone(),
                source,
            })
    }

    /// Render fetched markdown to the document pane HTML, footer included.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let mut html = self.renderer.render(markdown);
        html.push_str(&format!(
            r#"<footer class="doc-footer">{}</footer>"#,
            escape_html(&self.settings.footer)
        ));
        html
    }

    /// Inline message shown in place of the document.
    #[must_use]
    pub fn error_html(error: &ContentError, lang: &str) -> String {
        match error {
            ContentError::InvalidSlug(_) => format!(
                r#"<p class="content-error">{}<br /><code>{}</code></p>"#,
                Message::InvalidSlug.text(lang),
                Message::InvalidSlugDetail.text(lang)
            ),
            ContentError::Load { display_path, .. } => format!(
                r#"<p class="content-error">{}<br /><code>{}</code></p>"#,
                Message::ContentLoadFailed.text(lang),
                escape_html(display_path)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use docview_storage::{MockStorage, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn loader() -> ContentLoader {
        ContentLoader::new(SlugPolicy::default(), ContentSettings::default())
    }

    #[test]
    fn test_request_builds_paths() {
        let request = loader().request("setup/x", "ko").unwrap();

        assert_eq!(
            request,
            ContentRequest {
                slug: "setup/x".to_owned(),
                lang: "ko".to_owned(),
                resource_path: "content/v1.0/ko/setup/x.md".to_owned(),
                display_path: "v1.0/ko/setup/x.md".to_owned(),
            }
        );
    }

    #[test]
    fn test_request_rejects_deep_slug() {
        let err = loader().request("a/b/c/d", "ko").unwrap_err();

        assert!(matches!(
            err,
            ContentError::InvalidSlug(SlugError::TooDeep { depth: 4, .. })
        ));
    }

    #[test]
    fn test_request_rejects_traversal() {
        assert!(matches!(
            loader().request("../../secret", "ko"),
            Err(ContentError::InvalidSlug(_))
        ));
    }

    #[test]
    fn test_fetch_reads_resource() {
        let storage = MockStorage::new().with_file("content/v1.0/en/setup/x.md", "# X");
        let loader = loader();
        let request = loader.request("setup/x", "en").unwrap();

        assert_eq!(loader.fetch(&storage, &request).unwrap(), "# X");
        assert_eq!(storage.reads(), vec!["content/v1.0/en/setup/x.md"]);
    }

    #[test]
    fn test_fetch_missing() {
        let storage = MockStorage::new();
        let loader = loader();
        let request = loader.request("setup/x", "ko").unwrap();

        let err = loader.fetch(&storage, &request).unwrap_err();

        assert!(matches!(
            &err,
            ContentError::Load { display_path, .. } if display_path == "v1.0/ko/setup/x.md"
        ));
        let options = err.capture_options();
        assert_eq!(options.category, ErrorCategory::Content);
        assert_eq!(options.severity, ErrorSeverity::High);
        assert!(options.show_user);
    }

    #[test]
    fn test_fetch_unavailable_is_network_error() {
        let storage = MockStorage::new()
            .with_failure("content/v1.0/ko/setup/x.md", StorageErrorKind::Unavailable);
        let loader = loader();
        let request = loader.request("setup/x", "ko").unwrap();

        let err = loader.fetch(&storage, &request).unwrap_err();

        assert_eq!(err.capture_options().category, ErrorCategory::Network);
    }

    #[test]
    fn test_invalid_slug_capture_options() {
        let err = loader().request("", "ko").unwrap_err();
        let options = err.capture_options();

        assert_eq!(options.category, ErrorCategory::Content);
        assert_eq!(options.severity, ErrorSeverity::Medium);
        assert!(!options.show_user);
    }

    #[test]
    fn test_render_appends_footer_and_rewrites_assets() {
        let loader = ContentLoader::new(
            SlugPolicy::default(),
            ContentSettings {
                footer: "© Docs".to_owned(),
                asset_base: "/docs-platform/".to_owned(),
                ..ContentSettings::default()
            },
        );

        let html = loader.render("![a](../assets/a.png)");

        assert!(html.contains(r#"src="/docs-platform/assets/a.png""#));
        assert!(html.ends_with(r#"<footer class="doc-footer">© Docs</footer>"#));
    }

    #[test]
    fn test_error_html() {
        let invalid = loader().request("a.md", "en").unwrap_err();
        assert_eq!(
            ContentLoader::error_html(&invalid, "en"),
            r#"<p class="content-error">Invalid document path.<br /><code>Invalid slug format</code></p>"#
        );

        let missing = ContentError::Load {
            display_path: "v1.0/ko/setup/x.md".to_owned(),
            source: StorageError::not_found("content/v1.0/ko/setup/x.md"),
        };
        assert_eq!(
            ContentLoader::error_html(&missing, "ko"),
            r#"<p class="content-error">문서를 불러오는 중 오류가 발생했습니다.<br /><code>v1.0/ko/setup/x.md</code></p>"#
        );
    }
}
