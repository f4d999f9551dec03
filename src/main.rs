//! Video relay backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────┐
//!                   │                 VIDEO RELAY                   │
//!                   │                                               │
//!   Player request  │  ┌────────┐   ┌─────────┐   ┌─────────────┐  │
//!   ────────────────┼─▶│  http  │──▶│  proxy  │──▶│  upstream   │──┼──▶ Origin
//!                   │  │ server │   │ orchestr│   │    pool     │  │    host
//!                   │  └────────┘   └────┬────┘   └─────────────┘  │
//!                   │                    │                          │
//!                   │         probe → range → stream                │
//!                   │                                               │
//!   Metadata/auth   │  ┌──────────────────────────┐                 │
//!   ────────────────┼─▶│ anilist passthrough       │────────────────┼──▶ GraphQL API
//!                   │  └──────────────────────────┘                 │
//!                   │                                               │
//!                   │  config · lifecycle · observability           │
//!                   └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use video_relay::config::loader::load_config;
use video_relay::config::RelayConfig;
use video_relay::http::HttpServer;
use video_relay::lifecycle::Shutdown;
use video_relay::observability::logging;
use video_relay::upstream::UpstreamPool;

#[derive(Debug, Parser)]
#[command(name = "video-relay", about = "Range-aware video relay backend")]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_upstream_connections = config.upstream.max_connections,
        max_chunk_bytes = config.relay.max_chunk_bytes,
        "Configuration loaded"
    );

    // The pool is built once here and injected; handlers never reach
    // for ambient client state.
    let pool = Arc::new(UpstreamPool::new(&config.upstream)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();

    let server = HttpServer::new(Arc::new(config), pool);

    // Ctrl+C flips the broadcast that drains the server.
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    server.run(listener, shutdown_rx).await?;
    ctrl_c.abort();

    tracing::info!("Shutdown complete");
    Ok(())
}
