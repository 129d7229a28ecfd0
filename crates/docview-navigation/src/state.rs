//! Navigation state owned by the controller.

use crate::route::Route;

/// Current `(language, slug)` plus the load generation.
///
/// `language` is always supported and `slug` is either empty or validated.
/// `generation` increases on every navigation; a content load carries the
/// generation it was started under and is dropped once a newer one exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub language: String,
    pub slug: String,
    pub generation: u64,
}

impl NavigationState {
    /// State as a route.
    #[must_use]
    pub fn route(&self) -> Route {
        Route::new(self.language.clone(), self.slug.clone())
    }

    #[must_use]
    pub fn is_landing(&self) -> bool {
        self.slug.is_empty()
    }

    /// Whether the state shows `route`.
    #[must_use]
    pub fn shows(&self, route: &Route) -> bool {
        self.language == route.language && self.slug == route.slug
    }

    /// Move to `route` and start a new generation.
    pub(crate) fn advance(&mut self, route: Route) -> u64 {
        self.language = route.language;
        self.slug = route.slug;
        self.generation += 1;
        self.generation
    }

    /// Start a new generation without moving, so loads already issued
    /// become stale.
    pub(crate) fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_bumps_generation() {
        let mut state = NavigationState::default();

        assert_eq!(state.advance(Route::new("ko", "a")), 1);
        assert_eq!(state.advance(Route::new("ko", "a")), 2);
        assert!(state.shows(&Route::new("ko", "a")));
        assert!(!state.is_landing());
    }

    #[test]
    fn test_invalidate_keeps_route() {
        let mut state = NavigationState::default();
        state.advance(Route::new("ko", "a"));

        assert_eq!(state.invalidate(), 2);
        assert_eq!(state.route(), Route::new("ko", "a"));
    }

    #[test]
    fn test_landing_route() {
        let mut state = NavigationState::default();
        state.advance(Route::landing("en"));

        assert!(state.is_landing());
        assert_eq!(state.route(), Route::landing("en"));
    }
}
