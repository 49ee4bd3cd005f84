//! Structured logging.
//!
//! # Responsibilities
//! - Build the log sink from configuration
//! - Provide a working default sink when nothing is configured
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - Log level configurable via config and the `RUST_LOG` environment variable,
//!   the environment taking precedence

use thiserror::Error;
use tracing::Dispatch;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Error raised while building the log sink.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
}

/// Build a log sink from configuration.
pub fn build_dispatch(config: &ObservabilityConfig) -> Result<Dispatch, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let dispatch = match config.log_format {
        LogFormat::Pretty => Dispatch::new(registry.with(fmt::layer())),
        LogFormat::Json => Dispatch::new(registry.with(fmt::layer().json())),
    };

    Ok(dispatch)
}

/// Stdout sink at info level, used when the caller does not configure one.
pub fn default_dispatch() -> Dispatch {
    Dispatch::new(fmt().with_max_level(tracing::Level::INFO).finish())
}
