//! Navigation controller.
//!
//! [`NavigationController`] is the single authority translating between the
//! location (hash or path, see [`RouteCodec`]) and the `(language, slug)`
//! [`NavigationState`], and the only place that switches the page between
//! the landing and document layouts.
//!
//! Content loads are split in two so the controller never blocks:
//!
//! ```ignore
//! let pending = controller.navigate("ko", "setup/install", true);
//! // ... later, possibly after newer navigations ...
//! if let Some(pending) = pending {
//!     let fetched = pending.fetch(&site);
//!     controller.complete(pending, fetched); // dropped if stale
//! }
//! ```
//!
//! [`NavigationController::run`] does both steps at once.

use std::fmt;
use std::sync::Arc;

use docview_diagnostics::{
    Analytics, AnalyticsEvent, CaptureOptions, ErrorCategory, ErrorHandler, ErrorSeverity,
    TracingAnalytics,
};
use docview_site::{ContentError, ContentLoader, ContentRequest, SearchResults, Site};
use docview_storage::Preferences;

use crate::event::NavigationEvent;
use crate::language::LanguageSet;
use crate::location::{Location, LocationUpdate};
use crate::preference::LanguagePreference;
use crate::route::{Route, RouteCodec, RoutingMode};
use crate::shell::{Layout, PageShell};
use crate::state::NavigationState;

/// Callback invoked with the parsed route of every location change.
pub type LocationChangeListener = Box<dyn FnMut(&Route) + Send>;

/// Document load started by a navigation.
///
/// Carries the generation it was issued under. Completing it after a newer
/// navigation has no visible effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    generation: u64,
    request: ContentRequest,
}

impl PendingLoad {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn request(&self) -> &ContentRequest {
        &self.request
    }

    /// Read the document markdown from the site's storage.
    pub fn fetch(&self, site: &Site) -> Result<String, ContentError> {
        site.content().fetch(site.storage(), &self.request)
    }
}

/// Result of [`NavigationController::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document pane now shows the load result.
    Applied,
    /// A newer navigation superseded the load; nothing changed.
    Stale,
}

/// Routing and page-transition state machine.
pub struct NavigationController<L: Location> {
    site: Arc<Site>,
    codec: Box<dyn RouteCodec>,
    location: L,
    languages: LanguageSet,
    preference: LanguagePreference,
    analytics: Arc<dyn Analytics>,
    errors: ErrorHandler,
    state: NavigationState,
    shell: PageShell,
    listener: Option<LocationChangeListener>,
}

impl<L: Location> NavigationController<L> {
    /// Create a controller. Nothing is shown until [`boot`](Self::boot).
    pub fn new(
        site: Arc<Site>,
        codec: Box<dyn RouteCodec>,
        location: L,
        preferences: Arc<dyn Preferences>,
        languages: LanguageSet,
    ) -> Self {
        Self {
            site,
            codec,
            location,
            languages,
            preference: LanguagePreference::new(preferences),
            analytics: Arc::new(TracingAnalytics),
            errors: ErrorHandler::new(),
            state: NavigationState::default(),
            shell: PageShell::default(),
            listener: None,
        }
    }

    /// Send analytics events to `analytics` instead of the log.
    #[must_use]
    pub fn with_analytics(mut self, analytics: Arc<dyn Analytics>) -> Self {
        self.analytics = analytics;
        self
    }

    /// Show the page for the initial location.
    ///
    /// The location is left untouched: it already names the target.
    pub fn boot(&mut self) -> Option<PendingLoad> {
        let route = self.parse_current_route();
        tracing::info!(
            mode = %self.codec.mode(),
            route = %route,
            "Starting viewer"
        );
        self.analytics.track(AnalyticsEvent::PageView {
            path: self.location.snapshot().href(),
        });
        self.navigate(&route.language, &route.slug, false)
    }

    /// Route named by the current location. Never fails.
    pub fn parse_current_route(&self) -> Route {
        let fallback = self.preference.stored_or_default(&self.languages);
        self.codec
            .parse(&self.location.snapshot(), &self.languages, &fallback)
    }

    /// Move to `(language, slug)`.
    ///
    /// An unsupported language becomes the default. An invalid slug shows an
    /// inline error in the current layout and leaves the route and location
    /// as they were; loads already in flight are superseded. With
    /// `emit_history_entry` unset (the host already moved the location) the
    /// location is not written.
    ///
    /// Returns the document load to run, `None` for the landing page or a
    /// rejected slug.
    pub fn navigate(
        &mut self,
        language: &str,
        slug: &str,
        emit_history_entry: bool,
    ) -> Option<PendingLoad> {
        let language = self.languages.coerce(language);

        let request = if slug.is_empty() {
            None
        } else {
            match self.site.content().request(slug, &language) {
                Ok(request) => Some(request),
                Err(e) => {
                    self.report(&e, e.capture_options());
                    let generation = self.state.invalidate();
                    tracing::debug!(slug, generation, "Rejected slug");
                    self.shell.show_inline(ContentLoader::error_html(&e, &language));
                    return None;
                }
            }
        };

        let route = Route::new(language, slug);
        self.preference.persist(&route.language);
        if emit_history_entry {
            self.write_location(&route);
        }

        let previous = self.state.route();
        if self.state.generation > 0 && previous.slug != route.slug {
            self.analytics.track(AnalyticsEvent::Navigation {
                from: page_path(&previous.slug),
                to: page_path(&route.slug),
            });
        }

        let generation = self.state.advance(route.clone());
        tracing::debug!(route = %route, generation, "Navigate");

        let Some(request) = request else {
            let html = self.site.landing_html(&route.language);
            self.shell.show_landing(html);
            return None;
        };

        self.ensure_sidebar(&route.language);
        if let Some(sidebar) = self.shell.sidebar.as_mut()
            && !sidebar.select(&route.slug)
        {
            tracing::debug!(slug = %route.slug, "Slug not listed in sidebar");
        }
        self.shell.layout = Layout::Document;

        Some(PendingLoad {
            generation,
            request,
        })
    }

    /// Apply a finished load if it is still the latest one.
    pub fn complete(
        &mut self,
        pending: PendingLoad,
        fetched: Result<String, ContentError>,
    ) -> LoadOutcome {
        if pending.generation != self.state.generation {
            tracing::debug!(
                slug = %pending.request.slug,
                generation = pending.generation,
                current = self.state.generation,
                "Dropping stale content load"
            );
            return LoadOutcome::Stale;
        }

        let html = match fetched {
            Ok(markdown) => self.site.content().render(&markdown),
            Err(e) => {
                self.report(&e, e.capture_options());
                ContentLoader::error_html(&e, &pending.request.lang)
            }
        };
        self.shell.show_document(html);
        LoadOutcome::Applied
    }

    /// Fetch and complete `pending` synchronously.
    pub fn run(&mut self, pending: Option<PendingLoad>) -> Option<LoadOutcome> {
        let pending = pending?;
        let fetched = pending.fetch(&self.site);
        Some(self.complete(pending, fetched))
    }

    /// Handle one inbound event.
    pub fn dispatch(&mut self, event: NavigationEvent) -> Option<PendingLoad> {
        match event {
            NavigationEvent::LocationChanged(snapshot) => {
                let fallback = self.preference.stored_or_default(&self.languages);
                let route = self.codec.parse(&snapshot, &self.languages, &fallback);
                if let Some(listener) = self.listener.as_mut() {
                    listener(&route);
                }
                if self.state.shows(&route) {
                    tracing::debug!(route = %route, "Location already shown");
                    return None;
                }
                self.navigate(&route.language, &route.slug, false)
            }
            NavigationEvent::UserSelectedSlug(slug) => {
                let language = self.state.language.clone();
                self.navigate(&language, &slug, true)
            }
            NavigationEvent::LanguageChanged(language) => {
                let language = self.languages.coerce(&language);
                if language == self.state.language {
                    return None;
                }
                self.analytics.track(AnalyticsEvent::LanguageChange {
                    from: self.state.language.clone(),
                    to: language.clone(),
                });
                let slug = self.state.slug.clone();
                self.navigate(&language, &slug, true)
            }
        }
    }

    /// Replace the location-change listener.
    pub fn register_location_change_listener(
        &mut self,
        listener: impl FnMut(&Route) + Send + 'static,
    ) {
        if self.listener.replace(Box::new(listener)).is_some() {
            tracing::debug!("Replaced location change listener");
        }
    }

    /// Run a search and show its results.
    pub fn search(&mut self, text: &str) -> &SearchResults {
        let results = self.site.search(text);
        let query = text.trim();
        if !query.is_empty() {
            self.analytics.track(AnalyticsEvent::Search {
                query: query.to_owned(),
                results: results.len(),
            });
        }
        self.shell.search = results;
        &self.shell.search
    }

    /// Navigate to a search result and hide the results.
    pub fn select_search_result(&mut self, slug: &str) -> Option<PendingLoad> {
        self.shell.search = SearchResults::Hidden;
        self.dispatch(NavigationEvent::UserSelectedSlug(slug.to_owned()))
    }

    /// Collapse or expand a sidebar category. Returns the new expanded flag.
    pub fn toggle_category(&mut self, index: usize) -> Option<bool> {
        self.shell.sidebar.as_mut()?.toggle(index)
    }

    /// Report an error that escaped every other handler.
    pub fn capture_unexpected(&mut self, error: &dyn fmt::Display) {
        self.report(
            error,
            CaptureOptions::new(ErrorCategory::Unknown)
                .with_severity(ErrorSeverity::High)
                .shown_to_user(),
        );
    }

    /// Link target for `route` in the active routing mode.
    pub fn href(&self, route: &Route) -> String {
        self.codec.href(route)
    }

    pub fn routing_mode(&self) -> RoutingMode {
        self.codec.mode()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn shell(&self) -> &PageShell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut PageShell {
        &mut self.shell
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    fn write_location(&mut self, route: &Route) {
        if self.codec.is_current(&self.location.snapshot(), route) {
            return;
        }
        match self.codec.serialize(route) {
            LocationUpdate::PushPath(path) => self.location.push_path(&path),
            LocationUpdate::SetHash(hash) => self.location.set_hash(&hash),
        }
    }

    /// Build the sidebar unless one for `language` is already in place.
    fn ensure_sidebar(&mut self, language: &str) {
        if self
            .shell
            .sidebar
            .as_ref()
            .is_some_and(|sidebar| sidebar.lang() == language)
        {
            return;
        }
        let codec = self.codec.as_ref();
        let sidebar = self
            .site
            .sidebar(language, |slug| codec.href(&Route::new(language, slug)));
        self.shell.sidebar = Some(sidebar);
    }

    fn report(&mut self, error: &dyn fmt::Display, options: CaptureOptions) {
        if let Some(toast) = self.errors.capture(error, options) {
            self.shell.show_toast(toast);
        }
    }
}

impl<L: Location + fmt::Debug> fmt::Debug for NavigationController<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationController")
            .field("codec", &self.codec)
            .field("location", &self.location)
            .field("state", &self.state)
            .field("layout", &self.shell.layout)
            .finish_non_exhaustive()
    }
}

fn page_path(slug: &str) -> String {
    if slug.is_empty() {
        "/".to_owned()
    } else {
        slug.to_owned()
    }
}
