//! Response dispatcher.
//!
//! # Responsibilities
//! - Validate the status code and resolve the client-facing message
//! - Build the JSON envelope, classifying the response as success or error
//! - Set the default security headers, write status and body
//! - Emit exactly one structured log record correlating the response with
//!   the request that produced it
//!
//! # Design Decisions
//! - Never fails and never panics: every problem is reported through the log
//!   sink and the client always gets some response
//! - No retries: a failed body write is logged and abandoned
//! - The log sink is injected; all events of one dispatch, including registry
//!   warnings, go to that sink
//!
//! # Log Record
//! `status_code`, `status`, `response_message`, `method`, `path`,
//! `user_agent`, `remote_ip`, plus `error_type` and `error_details` for error
//! responses. The client-facing message is logged as `response_message`
//! because `message` holds the event text ("HTTP response sent", ...). The severity comes from the status profile, or from the code's
//! class when the code is not registered.

use std::sync::Arc;

use axum::{
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::Dispatch;

use crate::http::request::RequestSnapshot;
use crate::http::response::{ErrorDetail, ErrorDetails, ResponseEnvelope, ResponseStatus};
use crate::http::writer::{BufferedResponse, ResponseWriter};
use crate::observability::logging;
use crate::registry::{self, Severity, StatusRegistry};
use crate::security::headers::apply_default_headers;

/// Error type used when the status code has no registered tag.
pub const UNKNOWN_ERROR: &str = "unknown_error";

/// Emit a response event with the shared set of fields.
macro_rules! response_event {
    ($level:ident, $log:ident, $($rest:tt)+) => {
        tracing::$level!(
            status_code = $log.status_code,
            status = $log.status,
            response_message = %$log.message,
            method = %$log.snapshot.method,
            path = %$log.snapshot.path,
            user_agent = %$log.snapshot.user_agent,
            remote_ip = %$log.snapshot.remote_ip,
            error_type = $log.error_type,
            error_details = $log.error_details.as_deref(),
            $($rest)+
        )
    };
}

/// Fields shared by every log record of one dispatch call.
struct ResponseLog<'a> {
    snapshot: &'a RequestSnapshot,
    status_code: u16,
    status: &'static str,
    message: &'a str,
    error_type: Option<&'a str>,
    /// Details rendered as a JSON object.
    error_details: Option<String>,
}

/// Builds standard JSON responses and logs them.
///
/// Cheap to clone; share one instance across all handlers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<StatusRegistry>,
    logger: Dispatch,
}

impl Dispatcher {
    /// Create a dispatcher that logs to `logger`.
    pub fn new(registry: Arc<StatusRegistry>, logger: Dispatch) -> Self {
        Self { registry, logger }
    }

    /// Create a dispatcher that logs to stdout at info level.
    pub fn with_default_logger(registry: Arc<StatusRegistry>) -> Self {
        Self::new(registry, logging::default_dispatch())
    }

    /// Write a complete JSON response to `writer` and log it.
    ///
    /// `request` may be `None`, in which case the log record carries
    /// `UNKNOWN` request fields and a warning is emitted. An empty `message`
    /// is replaced by the status code's default. `details` is only used for
    /// error responses (status code 400 and above).
    pub fn dispatch<W, B, T>(
        &self,
        writer: &mut W,
        request: Option<&Request<B>>,
        status_code: u16,
        message: &str,
        data: Option<T>,
        details: Option<ErrorDetails>,
    ) where
        W: ResponseWriter + ?Sized,
        T: Serialize,
    {
        tracing::dispatcher::with_default(&self.logger, || {
            self.dispatch_inner(writer, request, status_code, message, data, details)
        });
    }

    /// Dispatch into a buffer and return it as an axum `Response`.
    pub fn respond<B, T: Serialize>(
        &self,
        request: Option<&Request<B>>,
        status_code: u16,
        message: &str,
        data: Option<T>,
        details: Option<ErrorDetails>,
    ) -> Response {
        let mut buffered = BufferedResponse::new();
        self.dispatch(&mut buffered, request, status_code, message, data, details);
        buffered.into_response()
    }

    /// Success response carrying `data`.
    pub fn success<B, T: Serialize>(
        &self,
        request: Option<&Request<B>>,
        status_code: u16,
        message: &str,
        data: T,
    ) -> Response {
        self.respond(request, status_code, message, Some(data), None)
    }

    /// Error response without a payload.
    pub fn error<B>(
        &self,
        request: Option<&Request<B>>,
        status_code: u16,
        message: &str,
        details: Option<ErrorDetails>,
    ) -> Response {
        self.respond(request, status_code, message, None::<()>, details)
    }

    fn dispatch_inner<W, B, T>(
        &self,
        writer: &mut W,
        request: Option<&Request<B>>,
        status_code: u16,
        message: &str,
        data: Option<T>,
        details: Option<ErrorDetails>,
    ) where
        W: ResponseWriter + ?Sized,
        T: Serialize,
    {
        let status_code = registry::validate(status_code);

        let snapshot = match request {
            Some(request) => RequestSnapshot::extract(request),
            None => {
                tracing::warn!("JSON response called without a request context");
                RequestSnapshot::unknown()
            }
        };

        let message = self.registry.resolve_message(status_code, message);
        let status = ResponseStatus::classify(status_code);

        let error = status.is_error().then(|| ErrorDetail {
            error_type: self.error_type(status_code),
            details,
        });

        apply_default_headers(writer);
        writer.write_status(status_code);

        let envelope = ResponseEnvelope {
            status,
            status_code: status_code.as_u16(),
            message,
            data,
            error,
        };

        let log = ResponseLog {
            snapshot: &snapshot,
            status_code: envelope.status_code,
            status: status.as_str(),
            message: &envelope.message,
            error_type: envelope.error.as_ref().map(|e| e.error_type.as_str()),
            error_details: envelope
                .error
                .as_ref()
                .and_then(|e| e.details.as_ref())
                .and_then(|details| serde_json::to_string(details).ok()),
        };

        let body = match serde_json::to_vec(&envelope) {
            Ok(body) => body,
            Err(e) => {
                response_event!(error, log, encoding_error = %e, "Failed to encode JSON response");
                return;
            }
        };

        if let Err(e) = writer.write_body(&body) {
            response_event!(error, log, write_error = %e, "Failed to write JSON response");
            return;
        }

        let text = summary(status_code);
        match self.registry.severity(status_code) {
            Severity::Info => response_event!(info, log, "{}", text),
            Severity::Warn => response_event!(warn, log, "{}", text),
            Severity::Error => response_event!(error, log, "{}", text),
        }
    }

    fn error_type(&self, status_code: StatusCode) -> String {
        self.registry
            .lookup(status_code)
            .map(|profile| profile.error_type.as_str())
            .filter(|error_type| !error_type.is_empty())
            .unwrap_or(UNKNOWN_ERROR)
            .to_string()
    }
}

fn summary(status_code: StatusCode) -> &'static str {
    if status_code.is_server_error() {
        "HTTP server error response sent"
    } else if status_code.is_client_error() {
        "HTTP client error response sent"
    } else {
        "HTTP response sent"
    }
}
