//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the demo handlers
//! - Wire up middleware (tracing)
//! - Bind server to listener with connection info, so client addresses
//!   reach the dispatcher
//! - Answer every route with a JSON envelope, including unknown paths and
//!   unsupported methods

use std::net::SocketAddr;

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, FromRequest, Request, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::http::dispatcher::Dispatcher;
use crate::http::request::RequestSnapshot;
use crate::http::response::ErrorDetails;

/// Maximum accepted body for `/validate`.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

/// HTTP server for the envelope service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig, dispatcher: Dispatcher) -> Self {
        let router = Self::build_router(AppState { dispatcher });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
            .route("/echo", get(echo_handler))
            .route(
                "/validate",
                post(validate_handler).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
            )
            .method_not_allowed_fallback(method_not_allowed_handler)
            .fallback(not_found_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            configured = %self.config.listener.bind_address,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn root_handler(State(state): State<AppState>, request: Request) -> Response {
    let data = json!({"message": "JSON envelope service", "status": "running"});
    state.dispatcher.success(Some(&request), 200, "", data)
}

async fn health_handler(State(state): State<AppState>, request: Request) -> Response {
    state
        .dispatcher
        .success(Some(&request), 200, "Service is healthy", json!({"status": "ok"}))
}

async fn echo_handler(State(state): State<AppState>, request: Request) -> Response {
    let snapshot = RequestSnapshot::extract(&request);
    state.dispatcher.success(Some(&request), 200, "", snapshot)
}

/// Accepts `{"email": "..."}` and reports field problems as a 422 envelope.
async fn validate_handler(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let mut buffered = Request::new(body);
    *buffered.extensions_mut() = parts.extensions.clone();
    let bytes = Bytes::from_request(buffered, &state).await;
    let request = Request::from_parts(parts, Body::empty());

    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            let message = format!("Request body exceeds {MAX_BODY_BYTES} bytes");
            return state.dispatcher.error(
                Some(&request),
                StatusCode::PAYLOAD_TOO_LARGE.as_u16(),
                &message,
                None,
            );
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Failed to read request body");
            Bytes::new()
        }
    };

    let payload: Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(_) => {
            return state
                .dispatcher
                .error(Some(&request), 400, "Request body must be a JSON object", None);
        }
    };

    let details = validate_payload(&payload);
    if details.is_empty() {
        state
            .dispatcher
            .success(Some(&request), 200, "Payload is valid", payload)
    } else {
        state.dispatcher.error(
            Some(&request),
            StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
            "",
            Some(details),
        )
    }
}

fn validate_payload(payload: &Value) -> ErrorDetails {
    let mut details = ErrorDetails::new();
    match payload.get("email").and_then(Value::as_str) {
        None => {
            details.insert("email".into(), "is required".into());
        }
        Some(email) if !email.contains('@') => {
            details.insert("email".into(), "must be a valid email address".into());
        }
        Some(_) => {}
    }
    details
}

async fn method_not_allowed_handler(State(state): State<AppState>, request: Request) -> Response {
    state.dispatcher.error(Some(&request), 405, "", None)
}

async fn not_found_handler(State(state): State<AppState>, request: Request) -> Response {
    state.dispatcher.error(Some(&request), 404, "", None)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
