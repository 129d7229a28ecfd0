//! Documentation bundle collaborators for the docview viewer.
//!
//! Everything the navigation controller delegates to lives here:
//!
//! - [`Manifest`] and [`Sidebar`]: the category tree and its rendered form
//! - [`SlugPolicy`]: slug validation ahead of any resource path
//! - [`ContentLoader`]: document request, fetch and render
//! - [`SearchIndex`]: substring search over the preloaded index
//! - [`LandingPages`]: per-language landing content
//! - [`Site`]: facade owning the bundle [`Storage`](docview_storage::Storage)

mod content;
mod landing;
mod manifest;
mod messages;
mod search;
mod sidebar;
mod site;
mod slug;

pub use content::{ContentError, ContentLoader, ContentRequest, ContentSettings};
pub use landing::{
    Action, Actions, Hero, LandingContent, LandingError, LandingFooter, LandingPages,
};
pub use manifest::{Category, LocalizedText, Manifest, ManifestError, ManifestItem};
pub use messages::Message;
pub use search::{DEFAULT_MAX_RESULTS, SearchEntry, SearchIndex, SearchIndexError, SearchResults};
pub use sidebar::{Sidebar, SidebarCategory, SidebarItem};
pub use site::{Document, Site, SiteOptions};
pub use slug::{DEFAULT_MAX_SLUG_DEPTH, DEFAULT_SLUG_PATTERN, SlugError, SlugPolicy};
