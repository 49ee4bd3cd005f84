//! Standard JSON response envelopes for HTTP services.
//!
//! Every response leaves through [`Dispatcher::dispatch`], which validates the
//! status code, resolves the message from the [`StatusRegistry`], writes a
//! consistent JSON body with safe default headers, and logs one structured
//! record tying the response to its request.

pub mod config;
pub mod http;
pub mod observability;
pub mod registry;
pub mod security;

pub use config::ServiceConfig;
pub use http::{
    BufferedResponse, Dispatcher, ErrorDetail, ErrorDetails, HttpServer, RequestSnapshot,
    ResponseEnvelope, ResponseStatus, ResponseWriter,
};
pub use registry::{Severity, StatusProfile, StatusRegistry};
