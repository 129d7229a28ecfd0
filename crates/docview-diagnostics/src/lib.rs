//! Diagnostics sinks for the docview viewer.
//!
//! Two collaborators live here:
//!
//! - [`ErrorHandler`]: logs captured failures by category and severity and
//!   decides whether the user should see a [`Toast`].
//! - [`Analytics`]: receives [`AnalyticsEvent`]s. [`TracingAnalytics`] logs
//!   them and [`MemoryAnalytics`] records them for inspection.
//!
//! Neither influences navigation control flow.

mod analytics;
mod error;

pub use analytics::{Analytics, AnalyticsEvent, MemoryAnalytics, TracingAnalytics};
pub use error::{CaptureOptions, ErrorCategory, ErrorHandler, ErrorSeverity, Toast};
