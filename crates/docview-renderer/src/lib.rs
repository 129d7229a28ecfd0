//! Markdown rendering for the docview viewer.
//!
//! [`MarkdownRenderer`] turns a markdown document into an HTML fragment ready
//! to be placed in the document pane. Asset references are rewritten to the
//! active base path by [`AssetRewriter`] and images are emitted with
//! `loading="lazy"`.
//!
//! # Example
//!
//! ```
//! use docview_renderer::MarkdownRenderer;
//!
//! let html = MarkdownRenderer::new()
//!     .with_asset_base("/docs-platform/")
//!     .render("![logo](../assets/logo.png)");
//!
//! assert!(html.contains(r#"src="/docs-platform/assets/logo.png""#));
//! ```

mod assets;
mod renderer;
mod util;

pub use assets::AssetRewriter;
pub use renderer::MarkdownRenderer;
pub use util::{escape_html, highlight};
