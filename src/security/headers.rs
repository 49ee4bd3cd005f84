//! Security response headers.
//!
//! # Responsibilities
//! - Define the headers sent with every JSON envelope
//! - Apply them to a response writer before the status is written
//!
//! # Design Decisions
//! - Content sniffing disabled (`nosniff`) so the body is only read as JSON
//! - Responses are never cached; envelopes often carry per-user data

use axum::http::header::{HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};

use crate::http::writer::ResponseWriter;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const NOSNIFF: &str = "nosniff";
pub const NO_STORE: &str = "no-cache, no-store, must-revalidate";

/// The headers set on every envelope, in the order they are applied.
pub fn default_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE)),
        (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static(NOSNIFF)),
        (CACHE_CONTROL, HeaderValue::from_static(NO_STORE)),
    ]
}

/// Set the default headers on `writer`.
pub fn apply_default_headers<W: ResponseWriter + ?Sized>(writer: &mut W) {
    for (name, value) in default_headers() {
        writer.set_header(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::writer::BufferedResponse;

    #[test]
    fn test_apply_default_headers() {
        let mut response = BufferedResponse::new();
        apply_default_headers(&mut response);

        let headers = response.headers();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert_eq!(
            headers.get(CACHE_CONTROL).unwrap(),
            "no-cache, no-store, must-revalidate"
        );
    }
}
