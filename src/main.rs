//! Server binary for `spaced_review`.
//!
//! This binary is a thin wrapper that resolves configuration and serves the API.

use clap::Parser;
use spaced_review::api::{build_router, AppState};
use spaced_review::cli::Cli;
use spaced_review::config::ServerConfig;
use spaced_review::tasks::SqliteTaskStore;
use spaced_review::{logging, SystemClock};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let base_dir = std::env::current_dir()?;
    let config = ServerConfig::resolve(cli.config.as_deref(), &base_dir, cli.overrides())?;

    logging::init(&config.log_filter);
    logging::install_panic_hook();

    let store = SqliteTaskStore::new(&config.database)?;
    let state = AppState::new(store, SystemClock::new());
    let app = build_router(state, &config.base_path, config.web_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        database = %config.database.display(),
        base_path = %config.base_path,
        "listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
