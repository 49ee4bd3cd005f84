//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! axum Request
//!     → request.rs (snapshot: method, path, user agent, client IP)
//!     → dispatcher.rs (validate status, resolve message, build envelope)
//!     → writer.rs (headers, status, JSON body)
//!     → Send to client, one log record emitted
//! ```

pub mod dispatcher;
pub mod request;
pub mod response;
pub mod server;
pub mod writer;

pub use dispatcher::Dispatcher;
pub use request::RequestSnapshot;
pub use response::{ErrorDetail, ErrorDetails, ResponseEnvelope, ResponseStatus};
pub use server::HttpServer;
pub use writer::{BufferedResponse, ResponseWriter};
