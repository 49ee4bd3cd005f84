//! JSON envelope demo service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request           ┌──────────────────────────────────────────────┐
//!     ─────────────────────────┼─▶ axum router ──▶ handler                    │
//!                              │                     │                        │
//!                              │                     ▼                        │
//!                              │   ┌─────────────────────────────────────┐    │
//!                              │   │            Dispatcher               │    │
//!                              │   │  request snapshot ◀── client_ip     │    │
//!                              │   │  status registry (validate/message) │    │
//!                              │   │  envelope ─▶ headers, status, body  │    │
//!                              │   └───────────────┬─────────────────────┘    │
//!     Client Response          │                   │                          │
//!     ◀────────────────────────┼───────────────────┤                          │
//!                              │                   └──▶ log sink (tracing)    │
//!                              └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use json_envelope::config::{load_config, ServiceConfig};
use json_envelope::observability::logging;
use json_envelope::{Dispatcher, HttpServer, StatusRegistry};

#[derive(Parser)]
#[command(name = "json-envelope")]
#[command(about = "Demo HTTP service answering every request with a JSON envelope", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    // One sink for both the server lifecycle logs and the dispatcher.
    let logger = logging::build_dispatch(&config.observability)?;
    tracing::dispatcher::set_global_default(logger.clone())?;

    tracing::info!("json-envelope v{} starting", env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(StatusRegistry::with_overrides(&config.statuses));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        registered_statuses = registry.len(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let dispatcher = Dispatcher::new(registry, logger);
    let server = HttpServer::new(config, dispatcher);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
