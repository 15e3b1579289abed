//! Ban check aggregation service.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────────┐
//!                        │                  BAN CHECK SERVICE                    │
//!                        │                                                       │
//!   GET /check?uid=..    │  ┌──────────┐    ┌────────────┐   ┌──────────────┐   │
//!   ─────────────────────┼─▶│   http   │───▶│ aggregate  │──▶│ AccountCache │   │
//!                        │  │ handlers │    │ (join of 2)│   └──────┬───────┘   │
//!                        │  └────┬─────┘    └─────┬──────┘          │ miss      │
//!                        │       │ /info          │                 ▼           │
//!                        │       │          ┌─────▼─────────────────────────┐   │     account-info
//!                        │       └─────────▶│        UpstreamClient         │───┼───▶ service
//!                        │                  │ (deadline, status, decode)    │───┼───▶ ban-status
//!   JSON response        │                  └───────────────────────────────┘   │     service
//!   ◀────────────────────┼── pretty JSON / error envelope                       │
//!                        └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use ban_check_proxy::config::{load_config, ServiceConfig};
use ban_check_proxy::observability::{logging, metrics};
use ban_check_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "ban-check-proxy")]
#[command(about = "Account info and ban status aggregation service", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overriding both the config file and `PORT`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    let env_port = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok());
    if let Some(port) = cli.port.or(env_port) {
        config.override_port(port);
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("ban-check-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        info_timeout_ms = config.upstream.info_timeout_ms,
        ban_timeout_ms = config.upstream.ban_timeout_ms,
        cache_capacity = config.cache.capacity,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
