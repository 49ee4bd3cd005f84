//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → status overrides folded into the StatusRegistry at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no live reload, because the
//!   status registry must not change under concurrent traffic
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, ServiceConfig, StatusOverride};
pub use validation::{validate_config, ValidationError};
