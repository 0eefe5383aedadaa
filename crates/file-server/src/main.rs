//! file-server: Multi-tenant in-memory file store over HTTP
//!
//! Provides:
//! - Account registration and login (`/register`, `/login`)
//! - Per-account file storage addressed by `X-Session` (`/files`)
//! - A liveness probe (`/_status/healthz`)
//!
//! All state is held in memory and lost on exit.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use file_server::{AppState, Config};
use file_store::Store;

#[derive(Parser, Debug)]
#[command(name = "file-server")]
#[command(about = "Multi-tenant in-memory file store over HTTP")]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 5000, env = "FILE_SERVER_PORT")]
    port: u16,

    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0", env = "FILE_SERVER_BIND")]
    bind: String,

    /// Path to config directory (defaults apply when omitted)
    #[arg(long, env = "FILE_SERVER_CONFIG_PATH")]
    config_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Respects RUST_LOG, otherwise info (or debug with --verbose)
    let default_filter = if cli.verbose {
        "file_server=debug,file_store=debug,tower_http=debug"
    } else {
        "file_server=info,file_store=info,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &cli.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let store = Store::new();
    let seeded = config.register_seed_accounts(&store);
    if seeded > 0 {
        tracing::info!("Registered {} seed account(s)", seeded);
    }

    match config.max_upload_bytes {
        Some(limit) => tracing::info!("Upload limit: {} bytes", limit),
        None => tracing::info!("Upload limit: none"),
    }

    let state = Arc::new(AppState::new(store, config));
    let app = file_server::router(state);

    let ip: IpAddr = cli
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", cli.bind))?;
    let addr = SocketAddr::new(ip, cli.port);

    tracing::info!("Starting file-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("File server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
