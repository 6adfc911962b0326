// =============================================================================
// Refresh Scheduler — periodic re-fetch of every cached ticker
// =============================================================================
//
// One background task. Each tick walks the tickers currently in the store and
// re-fetches them one after another. A failed fetch keeps the stale entry and
// is retried on the next tick; there is no backoff. Readers therefore see data
// at most one interval old, plus the duration of a tick.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::app_state::AppState;

/// Outcome of one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub refreshed: usize,
    pub failed: usize,
}

/// Re-fetch every ticker in the store once.
pub async fn refresh_all(state: &AppState) -> RefreshSummary {
    let mut summary = RefreshSummary::default();

    for ticker in state.store.tickers() {
        match state.fetch_and_store(&ticker).await {
            Ok(bars) => {
                debug!(ticker = %ticker, bars, "ticker refreshed");
                summary.refreshed += 1;
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "refresh failed — keeping cached data");
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Run [`refresh_all`] every `period` until `shutdown` flips to `true` or its
/// sender is dropped.
pub async fn run_refresh_loop(
    state: Arc<AppState>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the store is empty at startup.
    ticker.tick().await;

    info!(interval_secs = period.as_secs(), "refresh loop started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if state.store.is_empty() {
                    continue;
                }
                let summary = refresh_all(&state).await;
                info!(
                    refreshed = summary.refreshed,
                    failed = summary.failed,
                    "refresh pass complete"
                );
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("refresh loop stopped");
}
