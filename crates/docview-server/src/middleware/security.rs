//! Security headers set on every response.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Forbid MIME sniffing of bundle files.
pub(crate) const NOSNIFF: (&str, &str) = ("x-content-type-options", "nosniff");

/// Forbid embedding the viewer in frames.
pub(crate) const DENY_FRAMING: (&str, &str) = ("x-frame-options", "DENY");

/// Layer that sets `header`, replacing any value a handler produced.
pub(crate) fn header_layer(
    (name, value): (&'static str, &'static str),
) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}
