// =============================================================================
// stockscope — Main Entry Point
// =============================================================================
//
// Serves intraday prices, technical indicators and naive trend fits for any
// ticker as JSON, and keeps every requested ticker fresh in the background.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod error;
mod indicators;
mod market_data;
mod prediction;
mod runtime_config;
mod scheduler;
mod types;
mod yahoo;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::runtime_config::{RuntimeConfig, DEFAULT_CONFIG_PATH, REFRESH_INTERVAL_SECS};
use crate::yahoo::YahooClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("stockscope starting up");

    let config_path =
        std::env::var("STOCKSCOPE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });
    config.apply_env_overrides();

    info!(
        bind_addr = %config.bind_addr,
        static_dir = %config.static_dir,
        provider = %config.yahoo.base_url,
        "configuration resolved"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let source = Arc::new(YahooClient::new(&config.yahoo)?);
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, source));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── 3. Background refresh ────────────────────────────────────────────
    let refresh = tokio::spawn(scheduler::run_refresh_loop(
        state.clone(),
        Duration::from_secs(REFRESH_INTERVAL_SECS),
        shutdown_rx.clone(),
    ));

    // ── 4. API server ────────────────────────────────────────────────────
    let app = api::rest::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server to {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    let mut server_shutdown = shutdown_rx;
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = server_shutdown.wait_for(|stop| *stop).await;
            })
            .await
    });

    // ── 5. Graceful shutdown ─────────────────────────────────────────────
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    warn!("Shutdown signal received — stopping gracefully");

    let _ = shutdown_tx.send(true);
    refresh.await.context("refresh task panicked")?;
    server
        .await
        .context("API server task panicked")?
        .context("API server failed")?;

    info!(cached_tickers = state.store.len(), "stockscope shut down complete");
    Ok(())
}
