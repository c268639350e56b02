//! HTTP inspection and echo service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (axum router + middleware)
//!                          │
//!            ┌─────────────┴──────────────┐
//!            ▼                            ▼
//!      inspection                    behavior
//!  /headers /ip /user_agent     /status /cache /etag
//!  /response_headers /anything  /cookies[/{name}]
//!            │                            │
//!            └─────────────┬──────────────┘
//!                          ▼
//!     Client Response ◀── http::response (JSON, empty, echo, errors)
//!
//!     Cross-cutting: config · observability · lifecycle
//! ```
//!
//! Every request is handled in isolation. The only process-wide data is the
//! constant table of recognized status codes.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use http_inspector::config::{load_config, validate_config, ConfigError, ServiceConfig};
use http_inspector::lifecycle::{signals, Shutdown};
use http_inspector::observability::{logging, metrics};
use http_inspector::HttpServer;

#[derive(Parser)]
#[command(name = "http-inspector")]
#[command(about = "HTTP request inspection and echo service", long_about = None)]
struct Args {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(args: &Args) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::forward_ctrl_c(&shutdown);

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
