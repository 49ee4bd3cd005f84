//! Built-in status profiles.

use axum::http::StatusCode;

use super::{Severity, StatusProfile};

/// The default table loaded by `StatusRegistry::default()`.
pub(super) fn builtin() -> Vec<(StatusCode, StatusProfile)> {
    vec![
        // Success responses
        (StatusCode::OK, StatusProfile::success("Request was successful")),
        (StatusCode::CREATED, StatusProfile::success("Resource created successfully")),
        (StatusCode::ACCEPTED, StatusProfile::success("Request accepted")),
        (StatusCode::NO_CONTENT, StatusProfile::success("Request completed successfully")),
        // Client error responses
        (
            StatusCode::BAD_REQUEST,
            StatusProfile::error("The request contains invalid data", "validation_error", Severity::Warn),
        ),
        (
            StatusCode::UNAUTHORIZED,
            StatusProfile::error(
                "Authentication is required to access this resource",
                "authentication_error",
                Severity::Warn,
            ),
        ),
        (
            StatusCode::FORBIDDEN,
            StatusProfile::error(
                "You do not have permission to access this resource",
                "authorization_error",
                Severity::Warn,
            ),
        ),
        (
            StatusCode::NOT_FOUND,
            StatusProfile::error("The requested resource was not found", "not_found", Severity::Info),
        ),
        (
            StatusCode::METHOD_NOT_ALLOWED,
            StatusProfile::error(
                "The requested method is not allowed for this resource",
                "method_not_allowed",
                Severity::Warn,
            ),
        ),
        (
            StatusCode::CONFLICT,
            StatusProfile::error(
                "The request could not be completed due to a conflict with the current state of the resource",
                "conflict",
                Severity::Warn,
            ),
        ),
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            StatusProfile::error(
                "The request was well-formed but could not be processed due to semantic errors",
                "unprocessable_entity",
                Severity::Warn,
            ),
        ),
        (
            StatusCode::TOO_MANY_REQUESTS,
            StatusProfile::error(
                "Too many requests have been made in a given amount of time",
                "rate_limit_exceeded",
                Severity::Warn,
            ),
        ),
        // Server error responses
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusProfile::error(
                "An unexpected error occurred on the server",
                "internal_server_error",
                Severity::Error,
            ),
        ),
        (
            StatusCode::NOT_IMPLEMENTED,
            StatusProfile::error(
                "The requested functionality is not implemented",
                "not_implemented",
                Severity::Error,
            ),
        ),
        (
            StatusCode::BAD_GATEWAY,
            StatusProfile::error(
                "The server received an invalid response from an upstream server",
                "bad_gateway",
                Severity::Error,
            ),
        ),
        (
            StatusCode::SERVICE_UNAVAILABLE,
            StatusProfile::error(
                "The server is currently unable to handle the request due to temporary overload or maintenance",
                "service_unavailable",
                Severity::Error,
            ),
        ),
        (
            StatusCode::GATEWAY_TIMEOUT,
            StatusProfile::error(
                "The server did not receive a timely response from an upstream server",
                "gateway_timeout",
                Severity::Error,
            ),
        ),
        (
            StatusCode::HTTP_VERSION_NOT_SUPPORTED,
            StatusProfile::error(
                "The server does not support the HTTP protocol version used in the request",
                "http_version_not_supported",
                Severity::Error,
            ),
        ),
        (
            StatusCode::VARIANT_ALSO_NEGOTIATES,
            StatusProfile::error(
                "The server has an internal configuration error and cannot complete the request",
                "variant_also_negotiates",
                Severity::Error,
            ),
        ),
    ]
}
