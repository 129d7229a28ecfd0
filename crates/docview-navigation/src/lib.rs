//! Routing and navigation state machine for the docview viewer.
//!
//! The [`NavigationController`] keeps the location and the
//! `(language, slug)` [`NavigationState`] consistent and drives the
//! [`PageShell`] between the landing and document layouts. Everything it
//! touches outside itself sits behind a seam:
//!
//! - [`Location`]: address bar and history ([`MemoryLocation`] in memory)
//! - [`RouteCodec`]: hash or path URLs ([`HashRouting`], [`PathRouting`])
//! - [`Preferences`](docview_storage::Preferences): persisted language
//! - [`Site`](docview_site::Site): manifest, documents, search, landing pages

mod controller;
mod event;
mod language;
mod location;
mod preference;
mod route;
mod shell;
mod state;

pub use controller::{LoadOutcome, LocationChangeListener, NavigationController, PendingLoad};
pub use event::NavigationEvent;
pub use language::LanguageSet;
pub use location::{Location, LocationSnapshot, LocationUpdate, MemoryLocation};
pub use preference::{LANGUAGE_KEY, LanguagePreference};
pub use route::{HashRouting, PathRouting, Route, RouteCodec, RoutingMode, codec_for};
pub use shell::{Layout, PageShell};
pub use state::NavigationState;
