//! Gateway service.
//!
//! Attributes each request path to the downstream service that owns it and
//! reports the decision. No bytes are forwarded to the services themselves.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request     ┌──────────────────────────────────────────────────┐
//!     ───────────────────┼─▶ http server ──▶ routing ──▶ handler response ──┼──▶ JSON decision
//!                        │        │             (classify)        │          │
//!                        │        ▼                               ▼          │
//!                        │   request id                    observability     │
//!                        │                        (counter, histogram, gauge)│
//!                        │                                                   │
//!                        │   config · lifecycle (signals, graceful shutdown) │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use gateway::config::load_config;
use gateway::observability::logging::init_logging;
use gateway::{HttpServer, Shutdown, Telemetry};

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "HTTP gateway that reports which service owns a path", long_about = None)]
struct Args {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(config.observability.log_level);

    tracing::info!(
        port = config.listener.port,
        log_level = %config.observability.log_level,
        users_service_url = %config.upstreams.users_service_url,
        products_service_url = %config.upstreams.products_service_url,
        "Starting Gateway service"
    );

    let telemetry = Telemetry::new()?;

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        gateway::lifecycle::signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(config, telemetry);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
