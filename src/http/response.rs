//! JSON response envelope.
//!
//! Every response body has the same shape:
//!
//! ```json
//! {"status":"error","status_code":400,"message":"...","error":{"type":"validation_error","details":{"field":"email"}}}
//! ```
//!
//! `data` and `error` are omitted entirely when absent, so success and error
//! payloads stay visually distinct. The dispatcher does not stop a caller from
//! sending both.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Field name to message mapping attached to an error.
pub type ErrorDetails = BTreeMap<String, String>;

/// Outcome class of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

impl ResponseStatus {
    /// `Error` for 4xx and 5xx, `Success` for everything else.
    pub fn classify(status: StatusCode) -> Self {
        if status.as_u16() >= 400 {
            ResponseStatus::Error
        } else {
            ResponseStatus::Success
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Success => "success",
            ResponseStatus::Error => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResponseStatus::Error)
    }
}

/// Error block of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Category tag, e.g. `validation_error`. Never empty.
    #[serde(rename = "type")]
    pub error_type: String,

    #[serde(skip_serializing_if = "details_absent")]
    pub details: Option<ErrorDetails>,
}

fn details_absent(details: &Option<ErrorDetails>) -> bool {
    details.as_ref().map_or(true, BTreeMap::is_empty)
}

/// Top-level JSON object returned for every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub status: ResponseStatus,
    pub status_code: u16,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}
