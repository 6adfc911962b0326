// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
//   GET /                    dashboard (static dir, built-in page as fallback)
//   GET /api/stock/:ticker   prices + indicators + predictions for a ticker
//   GET /api/v1/health       liveness and cache size
//   GET /api/v1/tickers      cached tickers and their last update
//
// CORS is configured permissively; the dashboard may be served separately.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    handler::HandlerWithoutStateExt,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::response::StockResponse;
use crate::api::ticker::Ticker;
use crate::app_state::AppState;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full router with CORS middleware, static assets and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let assets = ServeDir::new(&state.config.static_dir)
        .fallback(builtin_dashboard.into_service());

    Router::new()
        .route("/api/stock/:ticker", get(stock))
        .route("/api/v1/health", get(health))
        .route("/api/v1/tickers", get(tickers))
        .fallback_service(assets)
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Stock data
// =============================================================================

async fn stock(
    Ticker(ticker): Ticker,
    State(state): State<Arc<AppState>>,
) -> Result<Json<StockResponse>, ApiError> {
    let entry = state
        .load_entry(&ticker)
        .await
        .map_err(|e| ApiError::from_fetch(&ticker, e))?;

    let response = StockResponse::build(&entry);
    debug!(
        ticker = %ticker,
        bars = response.prices.len(),
        predictions = !response.predictions.is_empty(),
        "stock response built"
    );
    Ok(Json(response))
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    cached_tickers: usize,
    uptime_secs: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        cached_tickers: state.store.len(),
        uptime_secs: state.uptime_secs(),
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Cached tickers
// =============================================================================

#[derive(Serialize)]
struct TickerSummary {
    ticker: String,
    bars: usize,
    last_updated: String,
}

async fn tickers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let summaries: Vec<TickerSummary> = state
        .store
        .tickers()
        .into_iter()
        .map(|ticker| TickerSummary {
            bars: state.store.get(&ticker).map_or(0, |s| s.len()),
            last_updated: state.store.last_updated(&ticker),
            ticker,
        })
        .collect();
    Json(summaries)
}

// =============================================================================
// Built-in dashboard (used when the static dir has no index.html)
// =============================================================================

const BUILTIN_DASHBOARD: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>stockscope</title></head>
<body>
<h1>stockscope</h1>
<form onsubmit="event.preventDefault(); location.href='/api/stock/' + encodeURIComponent(document.getElementById('t').value.trim());">
  <input id="t" placeholder="Ticker, e.g. AAPL" autofocus>
  <button type="submit">Fetch JSON</button>
</form>
<p>No dashboard assets found. Set <code>static_dir</code> to a directory containing <code>index.html</code>.</p>
</body>
</html>
"#;

async fn builtin_dashboard() -> Html<&'static str> {
    Html(BUILTIN_DASHBOARD)
}

// =============================================================================
// Tests
// =============================================================================
