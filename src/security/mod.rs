//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → client_ip.rs (pick the client address from proxy headers)
//!     → [snapshot logged with the response]
//!
//! Outgoing response:
//!     → headers.rs (nosniff, no-store, JSON content type)
//! ```
//!
//! # Design Decisions
//! - Proxy headers are parsed leniently: malformed input degrades to the next
//!   source instead of failing the request
//! - Safe response headers are set on every response, success or error

pub mod client_ip;
pub mod headers;

pub use client_ip::resolve_client_ip;
