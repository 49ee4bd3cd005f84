//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher and server produce:
//!     → tracing events (one record per response, plus warnings)
//!
//! Consumers:
//!     → logging.rs builds the sink (stdout, pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - The sink is a `tracing::Dispatch` value handed to the dispatcher, not a
//!   global looked up inside the core

pub mod logging;
