//! Request metadata captured for response logging.
//!
//! # Responsibilities
//! - Snapshot method, path, user agent and client IP from an inbound request
//! - Provide a sentinel snapshot when no request is available
//!
//! # Design Decisions
//! - The snapshot owns its strings so the live request can be dropped or
//!   consumed independently
//! - Extraction is pure: no logging, no failure modes

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{header::USER_AGENT, Request},
};
use serde::Serialize;

use crate::security::resolve_client_ip;

/// Placeholder value used when dispatch runs without a request.
pub const UNKNOWN: &str = "UNKNOWN";

/// Request metadata logged alongside each response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSnapshot {
    pub method: String,
    /// URI path, without the query string.
    pub path: String,
    /// `User-Agent` header, empty if absent.
    pub user_agent: String,
    /// Resolved client address.
    pub remote_ip: String,
}

impl RequestSnapshot {
    /// Capture metadata from an inbound request.
    ///
    /// The connection address is taken from axum's `ConnectInfo<SocketAddr>`
    /// extension, falling back to a bare `SocketAddr` extension.
    pub fn extract<B>(request: &Request<B>) -> Self {
        let user_agent = request
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let remote_ip = resolve_client_ip(request.headers(), &remote_addr(request));

        Self {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            user_agent,
            remote_ip,
        }
    }

    /// Snapshot with every field set to `UNKNOWN`.
    pub fn unknown() -> Self {
        Self {
            method: UNKNOWN.to_string(),
            path: UNKNOWN.to_string(),
            user_agent: UNKNOWN.to_string(),
            remote_ip: UNKNOWN.to_string(),
        }
    }
}

fn remote_addr<B>(request: &Request<B>) -> String {
    let extensions = request.extensions();
    if let Some(ConnectInfo(addr)) = extensions.get::<ConnectInfo<SocketAddr>>() {
        return addr.to_string();
    }
    if let Some(addr) = extensions.get::<SocketAddr>() {
        return addr.to_string();
    }
    String::new()
}
