//! Status code registry.
//!
//! # Responsibilities
//! - Map each known HTTP status code to its profile (default message,
//!   error-type tag, log severity)
//! - Resolve the message sent to the client when the caller gives none
//! - Correct out-of-range status codes
//!
//! # Design Decisions
//! - The registry is an explicit value, built at startup and shared via `Arc`
//! - Mutation requires `&mut self`, so it can only happen before the registry
//!   is frozen and handed to the dispatcher
//! - Unknown codes are not an error: message and severity fall back to the
//!   code's class

mod profiles;

use std::collections::HashMap;
use std::fmt;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::StatusOverride;

/// Log severity attached to a status profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Severity used for codes that have no registered profile.
    pub fn for_unregistered(status: StatusCode) -> Self {
        if status.is_server_error() {
            Severity::Error
        } else if status.is_client_error() {
            Severity::Warn
        } else {
            Severity::Info
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// Per-status-code bundle of default message, error-type tag and severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusProfile {
    /// Message used when the caller does not provide one.
    pub default_message: String,
    /// Error category tag. Empty for non-error codes.
    pub error_type: String,
    /// Level of the log record emitted for this code.
    pub severity: Severity,
}

impl StatusProfile {
    /// Profile for a non-error code.
    pub fn success(default_message: impl Into<String>) -> Self {
        Self {
            default_message: default_message.into(),
            error_type: String::new(),
            severity: Severity::Info,
        }
    }

    /// Profile for a 4xx/5xx code.
    pub fn error(
        default_message: impl Into<String>,
        error_type: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            default_message: default_message.into(),
            error_type: error_type.into(),
            severity,
        }
    }
}

/// Read-mostly lookup table from status code to [`StatusProfile`].
#[derive(Debug, Clone)]
pub struct StatusRegistry {
    profiles: HashMap<StatusCode, StatusProfile>,
}

impl StatusRegistry {
    /// Create a registry with no entries.
    pub fn empty() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Built-in table extended with overrides loaded from configuration.
    pub fn with_overrides(overrides: &[StatusOverride]) -> Self {
        let mut registry = Self::default();
        for entry in overrides {
            match StatusCode::from_u16(entry.code) {
                Ok(code) => {
                    registry.register(code, entry.to_profile());
                }
                Err(_) => {
                    tracing::warn!(status_code = entry.code, "Skipping status override with invalid code");
                }
            }
        }
        registry
    }

    /// Register a profile, returning the one it replaced.
    ///
    /// Overwriting an existing entry is allowed but logged at warn level.
    pub fn register(&mut self, code: StatusCode, profile: StatusProfile) -> Option<StatusProfile> {
        let previous = self.profiles.insert(code, profile);
        if previous.is_some() {
            tracing::warn!(
                status_code = code.as_u16(),
                "Status code already registered, updating configuration"
            );
        }
        previous
    }

    /// Look up the profile for a status code.
    pub fn lookup(&self, code: StatusCode) -> Option<&StatusProfile> {
        self.profiles.get(&code)
    }

    pub fn contains(&self, code: StatusCode) -> bool {
        self.profiles.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Iterate over all registered profiles in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (StatusCode, &StatusProfile)> {
        self.profiles.iter().map(|(code, profile)| (*code, profile))
    }

    /// Pick the message sent to the client.
    ///
    /// A non-empty `provided` message always wins. Otherwise the registered
    /// default is used, and for unknown codes a generic message for the
    /// code's class.
    pub fn resolve_message(&self, code: StatusCode, provided: &str) -> String {
        if !provided.is_empty() {
            return provided.to_string();
        }

        if let Some(profile) = self.lookup(code) {
            return profile.default_message.clone();
        }

        class_fallback_message(code.as_u16()).to_string()
    }

    /// Severity for the response log record of `code`.
    pub fn severity(&self, code: StatusCode) -> Severity {
        self.lookup(code)
            .map(|profile| profile.severity)
            .unwrap_or_else(|| Severity::for_unregistered(code))
    }
}

impl Default for StatusRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for (code, profile) in profiles::builtin() {
            registry.profiles.insert(code, profile);
        }
        registry
    }
}

/// Coerce a raw status code into the valid HTTP range.
///
/// Codes outside `100..=599` are replaced with 500 and a warning is logged.
/// This is a silent correction: callers always get a usable status, since a
/// response helper must never be the reason a handler fails.
pub fn validate(code: u16) -> StatusCode {
    if !(100..=599).contains(&code) {
        tracing::warn!(provided_code = code, "Invalid HTTP status code provided, using 500");
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn class_fallback_message(code: u16) -> &'static str {
    match code {
        200..=299 => "Request completed successfully",
        300..=399 => "Request requires further action",
        400..=499 => "Client error occurred",
        500..=599 => "Server error occurred",
        _ => "Response completed",
    }
}
