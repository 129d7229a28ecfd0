//! Page layout state.

use std::fmt;

use docview_diagnostics::Toast;
use docview_site::{SearchResults, Sidebar};

/// Which half of the page is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// Hero and action cards; no sidebar.
    #[default]
    Landing,
    /// Sidebar plus document pane.
    Document,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Landing => f.write_str("landing"),
            Self::Document => f.write_str("document"),
        }
    }
}

/// Everything the viewer currently shows.
#[derive(Debug, Clone, Default)]
pub struct PageShell {
    pub(crate) layout: Layout,
    pub(crate) sidebar: Option<Sidebar>,
    pub(crate) content: String,
    pub(crate) scroll_top: u32,
    pub(crate) toast: Option<Toast>,
    pub(crate) search: SearchResults,
}

impl PageShell {
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Sidebar, present once a document has been shown.
    ///
    /// Kept while the landing page is visible so returning to the same
    /// language does not rebuild it.
    #[must_use]
    pub fn sidebar(&self) -> Option<&Sidebar> {
        self.sidebar.as_ref()
    }

    /// Visible sidebar: `None` on the landing page.
    #[must_use]
    pub fn visible_sidebar(&self) -> Option<&Sidebar> {
        match self.layout {
            Layout::Landing => None,
            Layout::Document => self.sidebar.as_ref(),
        }
    }

    /// HTML of the visible pane: document, landing page, or inline error.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    #[must_use]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    #[must_use]
    pub fn search(&self) -> &SearchResults {
        &self.search
    }

    /// Record the user scrolling the document pane.
    pub fn set_scroll(&mut self, scroll_top: u32) {
        self.scroll_top = scroll_top;
    }

    /// Show `toast`, replacing any visible one.
    pub fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    pub(crate) fn show_landing(&mut self, html: String) {
        self.layout = Layout::Landing;
        self.content = html;
        self.scroll_top = 0;
    }

    /// Replace the visible pane's content, keeping the layout.
    pub(crate) fn show_inline(&mut self, html: String) {
        self.content = html;
        self.scroll_top = 0;
    }

    pub(crate) fn show_document(&mut self, html: String) {
        self.layout = Layout::Document;
        self.content = html;
        self.scroll_top = 0;
    }
}

#[cfg(test)]
mod tests {
    use docview_diagnostics::ErrorCategory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_is_empty_landing() {
        let shell = PageShell::default();

        assert_eq!(shell.layout(), Layout::Landing);
        assert!(shell.sidebar().is_none());
        assert!(!shell.search().is_visible());
        assert_eq!(shell.content(), "");
    }

    #[test]
    fn test_newer_toast_replaces_older() {
        let mut shell = PageShell::default();

        shell.show_toast(Toast::new(ErrorCategory::Network));
        shell.show_toast(Toast::new(ErrorCategory::Content));

        assert_eq!(shell.toast().map(Toast::category), Some(ErrorCategory::Content));

        shell.dismiss_toast();
        assert!(shell.toast().is_none());
    }

    #[test]
    fn test_show_document_resets_scroll() {
        let mut shell = PageShell::default();
        shell.set_scroll(420);

        shell.show_document("<h1>A</h1>".to_owned());

        assert_eq!(shell.layout(), Layout::Document);
        assert_eq!(shell.scroll_top(), 0);
    }

    #[test]
    fn test_show_inline_keeps_layout() {
        let mut shell = PageShell::default();
        shell.set_scroll(10);

        shell.show_inline("<p>oops</p>".to_owned());

        assert_eq!(shell.layout(), Layout::Landing);
        assert_eq!(shell.content(), "<p>oops</p>");
        assert_eq!(shell.scroll_top(), 0);
    }

    #[test]
    fn test_landing_hides_sidebar() {
        let mut shell = PageShell {
            sidebar: Some(Sidebar::default()),
            ..PageShell::default()
        };
        shell.show_document(String::new());
        assert!(shell.visible_sidebar().is_some());

        shell.show_landing(String::new());

        assert!(shell.visible_sidebar().is_none());
        assert!(shell.sidebar().is_some());
    }
}
