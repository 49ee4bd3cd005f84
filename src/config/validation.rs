//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (status codes, bind address, filter directives)
//! - Detect duplicate status overrides
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid log level directive '{0}'")]
    InvalidLogLevel(String),

    #[error("status code {0} is outside 100..=599")]
    StatusOutOfRange(u16),

    #[error("status code {0} has an empty default message")]
    EmptyDefaultMessage(u16),

    #[error("error status code {0} has no error_type")]
    MissingErrorType(u16),

    #[error("status code {0} is declared more than once")]
    DuplicateStatus(u16),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for status in &config.statuses {
        if !(100..=599).contains(&status.code) {
            errors.push(ValidationError::StatusOutOfRange(status.code));
            continue;
        }
        if !seen.insert(status.code) {
            errors.push(ValidationError::DuplicateStatus(status.code));
        }
        if status.message.trim().is_empty() {
            errors.push(ValidationError::EmptyDefaultMessage(status.code));
        }
        if status.code >= 400 && status.error_type.trim().is_empty() {
            errors.push(ValidationError::MissingErrorType(status.code));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
