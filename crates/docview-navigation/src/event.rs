//! Inbound messages for the navigation controller.

use crate::location::LocationSnapshot;

/// Everything that can move the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Back/forward or fragment change reported by the host.
    LocationChanged(LocationSnapshot),
    /// Sidebar click or search result selection.
    UserSelectedSlug(String),
    /// Language switch.
    LanguageChanged(String),
}
