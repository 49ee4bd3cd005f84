//! Outbound response writer.
//!
//! # Responsibilities
//! - Abstract the three operations the dispatcher needs: set a header, write
//!   the status, write the body
//! - Provide a buffered implementation that turns into an axum `Response`
//!
//! # Design Decisions
//! - Mirrors streaming HTTP writer semantics: the first status wins, headers
//!   set after the status are dropped, and a body write without a status
//!   implies 200
//! - Body writes return `io::Result` so streaming writers can report failures

use std::io;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Sink for a single HTTP response.
pub trait ResponseWriter {
    /// Set a header, replacing any previous value.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Write the status line.
    fn write_status(&mut self, status: StatusCode);

    /// Append bytes to the response body.
    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;
}

/// In-memory response, converted into an axum `Response` once complete.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// The written status, or 200 if none was written yet.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn status_written(&self) -> bool {
        self.status.is_some()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl ResponseWriter for BufferedResponse {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        if self.status.is_some() {
            tracing::debug!(header = %name, "Header set after status was written, ignoring");
            return;
        }
        self.headers.insert(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        match self.status {
            Some(current) => {
                tracing::debug!(
                    current = current.as_u16(),
                    attempted = status.as_u16(),
                    "Status already written, ignoring"
                );
            }
            None => self.status = Some(status),
        }
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(body);
        Ok(())
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}
