//! Error capture and user-facing notices.

use std::fmt;

use serde::Serialize;

/// Where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Resource could not be fetched.
    Network,
    /// Resource was fetched but is unusable, or the slug was rejected.
    Content,
    /// Routing or page transition failed.
    Navigation,
    /// Search index failure.
    Search,
    /// Page shell failure.
    Ui,
    /// Anything else, including failures caught by a top-level handler.
    Unknown,
}

impl ErrorCategory {
    /// Lowercase name used as the log prefix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Content => "content",
            Self::Navigation => "navigation",
            Self::Search => "search",
            Self::Ui => "ui",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How bad a failure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// High and critical failures are logged as errors and may reach the user.
    #[must_use]
    pub fn is_severe(self) -> bool {
        self >= Self::High
    }
}

/// Options for [`ErrorHandler::capture`].
///
/// Defaults to an unknown, medium-severity failure that is not shown to the
/// user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub show_user: bool,
}

impl CaptureOptions {
    /// Options for a failure in `category` with default severity.
    #[must_use]
    pub fn new(category: ErrorCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// Set the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Ask for a user-facing toast when the failure is severe enough.
    #[must_use]
    pub fn shown_to_user(mut self) -> Self {
        self.show_user = true;
        self
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            category: ErrorCategory::Unknown,
            severity: ErrorSeverity::Medium,
            show_user: false,
        }
    }
}

/// Transient, dismissible notice shown over the page.
///
/// The text is resolved at display time so that a language switch while the
/// toast is visible shows it in the new language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toast {
    category: ErrorCategory,
}

impl Toast {
    /// Create a toast for a failure category.
    #[must_use]
    pub fn new(category: ErrorCategory) -> Self {
        Self { category }
    }

    /// Category the toast reports.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Localized message. Unknown languages get the English text.
    #[must_use]
    pub fn message(&self, lang: &str) -> &'static str {
        let (ko, en) = match self.category {
            ErrorCategory::Network => {
                ("네트워크 오류가 발생했습니다.", "Network error occurred.")
            }
            ErrorCategory::Content => (
                "콘텐츠를 불러오는 중 오류가 발생했습니다.",
                "Failed to load content.",
            ),
            ErrorCategory::Navigation => (
                "페이지 이동 중 오류가 발생했습니다.",
                "Navigation error occurred.",
            ),
            ErrorCategory::Search | ErrorCategory::Ui | ErrorCategory::Unknown => {
                ("오류가 발생했습니다.", "An error occurred.")
            }
        };
        if lang == "ko" { ko } else { en }
    }
}

/// Captures failures reported by the viewer's collaborators.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    /// Create a handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Log `error` and decide whether the user should be notified.
    ///
    /// Returns a [`Toast`] only when `show_user` is set and the severity is
    /// high or critical.
    pub fn capture(&self, error: &dyn fmt::Display, options: CaptureOptions) -> Option<Toast> {
        let CaptureOptions {
            category,
            severity,
            show_user,
        } = options;

        if severity.is_severe() {
            tracing::error!(%category, ?severity, "[{category}] {error}");
        } else {
            tracing::warn!(%category, ?severity, "[{category}] {error}");
        }

        (show_user && severity.is_severe()).then(|| Toast::new(category))
    }
}
