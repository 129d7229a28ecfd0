//! Analytics event sinks.

use std::sync::{Arc, Mutex};

use serde::Serialize;

/// Usage event emitted by the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    /// Initial page load.
    PageView { path: String },
    /// Slug change. `"/"` stands for the landing page.
    Navigation { from: String, to: String },
    /// Non-empty search query and the number of matches.
    Search { query: String, results: usize },
    /// Language switch.
    LanguageChange { from: String, to: String },
}

/// Receiver for [`AnalyticsEvent`]s.
pub trait Analytics: Send + Sync {
    /// Record one event. Must not fail.
    fn track(&self, event: AnalyticsEvent);
}

impl<T: Analytics + ?Sized> Analytics for Arc<T> {
    fn track(&self, event: AnalyticsEvent) {
        (**self).track(event);
    }
}

/// Logs events at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        match &event {
            AnalyticsEvent::PageView { path } => {
                tracing::debug!(path = %path, "[Analytics] page_view");
            }
            AnalyticsEvent::Navigation { from, to } => {
                tracing::debug!("[Analytics] navigation: {from} -> {to}");
            }
            AnalyticsEvent::Search { query, results } => {
                tracing::debug!("[Analytics] search: {query:?} -> {results} results");
            }
            AnalyticsEvent::LanguageChange { from, to } => {
                tracing::debug!("[Analytics] language: {from} -> {to}");
            }
        }
    }
}

/// Records events in memory.
#[derive(Debug, Default)]
pub struct MemoryAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemoryAnalytics {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Drop all recorded events.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Analytics for MemoryAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_memory_analytics_records_in_order() {
        let analytics = MemoryAnalytics::new();

        analytics.track(AnalyticsEvent::PageView { path: "/".to_owned() });
        analytics.track(AnalyticsEvent::Search {
            query: "install".to_owned(),
            results: 2,
        });

        assert_eq!(
            analytics.events(),
            vec![
                AnalyticsEvent::PageView { path: "/".to_owned() },
                AnalyticsEvent::Search {
                    query: "install".to_owned(),
                    results: 2
                },
            ]
        );

        analytics.clear();
        assert!(analytics.events().is_empty());
    }

    #[test]
    fn test_shared_recorder_through_arc() {
        let recorder = Arc::new(MemoryAnalytics::new());
        let sink: Arc<dyn Analytics> = Arc::clone(&recorder) as Arc<dyn Analytics>;

        sink.track(AnalyticsEvent::LanguageChange {
            from: "ko".to_owned(),
            to: "en".to_owned(),
        });

        assert_eq!(recorder.events().len(), 1);
    }

    #[test]
    fn test_tracing_analytics_accepts_every_event() {
        let analytics = TracingAnalytics;

        analytics.track(AnalyticsEvent::Navigation {
            from: "/".to_owned(),
            to: "setup/x".to_owned(),
        });
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_string(&AnalyticsEvent::Navigation {
            from: "/".to_owned(),
            to: "setup/x".to_owned(),
        })
        .unwrap();

        assert_eq!(json, r#"{"event":"navigation","from":"/","to":"setup/x"}"#);
    }
}
