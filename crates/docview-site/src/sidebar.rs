//! Sidebar navigation tree.
//!
//! A [`Sidebar`] is built for one language from the [`Manifest`]. Categories
//! are sorted by `order` with ties kept in manifest order, and every category
//! starts expanded. At most one item is active at a time.

use serde::Serialize;

use docview_renderer::escape_html;

use crate::manifest::Manifest;

/// Sidebar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub slug: String,
    pub title: String,
    /// Link target in the active routing mode.
    pub href: String,
    pub active: bool,
}

/// Collapsible group of links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarCategory {
    pub title: String,
    pub expanded: bool,
    pub items: Vec<SidebarItem>,
}

/// Rendered navigation tree for one language.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    lang: String,
    categories: Vec<SidebarCategory>,
}

impl Sidebar {
    /// Build the sidebar for `lang`.
    ///
    /// `href_for` turns a slug into a link target for the active routing mode.
    pub fn build(lang: &str, manifest: &Manifest, href_for: impl Fn(&str) -> String) -> Self {
        let mut sorted: Vec<_> = manifest.categories.iter().collect();
        sorted.sort_by_key(|c| c.order);

        let categories = sorted
            .into_iter()
            .map(|category| SidebarCategory {
                title: category.title.get(lang).to_owned(),
                expanded: true,
                items: category
                    .items
                    .iter()
                    .map(|item| SidebarItem {
                        slug: item.slug.clone(),
                        title: item.title.get(lang).to_owned(),
                        href: href_for(&item.slug),
                        active: false,
                    })
                    .collect(),
            })
            .collect();

        tracing::info!(lang, "Sidebar built");
        Self {
            lang: lang.to_owned(),
            categories,
        }
    }

    /// Language the sidebar was built for.
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    #[must_use]
    pub fn categories(&self) -> &[SidebarCategory] {
        &self.categories
    }

    /// Total number of links.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Mark the first item with `slug` active and clear every other mark.
    ///
    /// Returns `false` when no item has that slug; all marks are cleared.
    pub fn select(&mut self, slug: &str) -> bool {
        let mut found = false;
        for item in self.categories.iter_mut().flat_map(|c| c.items.iter_mut()) {
            item.active = !found && item.slug == slug;
            found |= item.active;
        }
        found
    }

    /// Clear the active mark.
    pub fn clear_selection(&mut self) {
        for item in self.categories.iter_mut().flat_map(|c| c.items.iter_mut()) {
            item.active = false;
        }
    }

    /// Slug of the active item.
    #[must_use]
    pub fn active_slug(&self) -> Option<&str> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|item| item.active)
            .map(|item| item.slug.as_str())
    }

    /// Collapse an expanded category or expand a collapsed one.
    ///
    /// Returns the new expanded state, or `None` for an unknown index.
    pub fn toggle(&mut self, category_index: usize) -> Option<bool> {
        let category = self.categories.get_mut(category_index)?;
        category.expanded = !category.expanded;
        Some(category.expanded)
    }

    /// Render the tree as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::from(r#"<nav class="sidebar">"#);
        for category in &self.categories {
            let state = if category.expanded { "expanded" } else { "collapsed" };
            out.push_str(&format!(
                r#"<div class="category-block {state}"><button class="category-header">{}</button><div class="category-items">"#,
                escape_html(&category.title)
            ));
            for item in &category.items {
                let class = if item.active {
                    "sidebar-link sidebar-active"
                } else {
                    "sidebar-link"
                };
                out.push_str(&format!(
                    r#"<a class="{class}" href="{}" data-slug="{}">{}</a>"#,
                    escape_html(&item.href),
                    escape_html(&item.slug),
                    escape_html(&item.title)
                ));
            }
            out.push_str("</div></div>");
        }
        out.push_str("</nav>");
        out
    }
}
