//! Markdown to HTML conversion.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::assets::AssetRewriter;
use crate::util::escape_html;

/// Markdown renderer producing the document pane's HTML fragment.
///
/// GFM extensions (tables, strikethrough, task lists) are enabled by default.
/// Images are emitted with `loading="lazy"` and, when an asset base is set,
/// their sources are rewritten through [`AssetRewriter`]. The same rewriting
/// applies to `src="…"` attributes in raw HTML blocks.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    assets: Option<AssetRewriter>,
    gfm: bool,
}

/// Alt text capture for an image whose end tag has not been seen yet.
#[derive(Default)]
struct ImageState {
    depth: usize,
    src: String,
    title: String,
    alt: String,
}

impl ImageState {
    fn start(&mut self, src: String, title: String) {
        if self.depth == 0 {
            self.src = src;
            self.title = title;
            self.alt.clear();
        }
        self.depth += 1;
    }

    /// Close one image level. Returns the finished `<img>` tag at the outermost level.
    fn end(&mut self) -> Option<String> {
        self.depth = self.depth.saturating_sub(1);
        if self.depth > 0 {
            return None;
        }
        let title_attr = if self.title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(&self.title))
        };
        Some(format!(
            r#"<img src="{}" alt="{}"{title_attr} loading="lazy">"#,
            escape_html(&self.src),
            escape_html(&self.alt)
        ))
    }

    fn is_active(&self) -> bool {
        self.depth > 0
    }
}

impl MarkdownRenderer {
    /// Create a renderer with GFM enabled and no asset rewriting.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: None,
            gfm: true,
        }
    }

    /// Rewrite asset references against `base` (e.g. `./` or `/docs-platform/`).
    #[must_use]
    pub fn with_asset_base(mut self, base: impl Into<String>) -> Self {
        self.assets = Some(AssetRewriter::new(base));
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown text to an HTML fragment.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let mut image = ImageState::default();
        let mut events: Vec<Event<'_>> = Vec::new();

        for event in parser {
            match event {
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    let src = self.rewrite_url(&dest_url);
                    image.start(src, title.into_string());
                }
                Event::End(TagEnd::Image) => {
                    if let Some(tag) = image.end() {
                        events.push(Event::InlineHtml(CowStr::from(tag)));
                    }
                }
                Event::Text(text) | Event::Code(text) if image.is_active() => {
                    image.alt.push_str(&text);
                }
                _ if image.is_active() => {}
                Event::Html(raw) => events.push(Event::Html(self.rewrite_raw(raw))),
                Event::InlineHtml(raw) => events.push(Event::InlineHtml(self.rewrite_raw(raw))),
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }

    fn rewrite_url(&self, url: &str) -> String {
        match &self.assets {
            Some(assets) => assets.rewrite_url(url).into_owned(),
            None => url.to_owned(),
        }
    }

    fn rewrite_raw<'a>(&self, raw: CowStr<'a>) -> CowStr<'a> {
        match &self.assets {
            Some(assets) => CowStr::from(assets.rewrite_html(&raw).into_owned()),
            None => raw,
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
