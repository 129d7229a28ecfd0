//! HTML text helpers.

use regex::RegexBuilder;

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape `text` and wrap every case-insensitive occurrence of `query` in
/// `<mark class="search-hit">`.
///
/// Matching runs on the unescaped text so that a query such as `a&b` still
/// finds its occurrence; each piece is escaped on output. An empty or
/// whitespace-only query only escapes.
///
/// # Examples
///
/// ```
/// use docview_renderer::highlight;
///
/// assert_eq!(
///     highlight("Installation Guide", "install"),
///     r#"<mark class="search-hit">Install</mark>ation Guide"#
/// );
/// ```
#[must_use]
pub fn highlight(text: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return escape_html(text);
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return escape_html(text);
    };

    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;
    for hit in pattern.find_iter(text) {
        out.push_str(&escape_html(&text[last..hit.start()]));
        out.push_str(r#"<mark class="search-hit">"#);
        out.push_str(&escape_html(hit.as_str()));
        out.push_str("</mark>");
        last = hit.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}
