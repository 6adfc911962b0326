// =============================================================================
// Central Application State
// =============================================================================
//
// Shared by the request handlers and the refresh scheduler via
// `Arc<AppState>`. The store is the only mutable piece and manages its own
// locking; everything else is read-only after startup.
// =============================================================================

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::market_data::{ensure_min_bars, PriceSource, SeriesStore};
use crate::runtime_config::RuntimeConfig;
use crate::types::CacheEntry;

pub struct AppState {
    pub config: RuntimeConfig,
    pub store: Arc<SeriesStore>,
    pub source: Arc<dyn PriceSource>,
    /// Instant when the service was started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: RuntimeConfig, source: Arc<dyn PriceSource>) -> Self {
        Self {
            config,
            store: Arc::new(SeriesStore::new()),
            source,
            start_time: std::time::Instant::now(),
        }
    }

    /// Fetch `ticker` from the source and store it if usable. Returns the
    /// number of bars stored.
    ///
    /// On failure the existing entry, if any, is left untouched.
    pub async fn fetch_and_store(&self, ticker: &str) -> Result<usize, FetchError> {
        let series = ensure_min_bars(self.source.fetch(ticker).await?)?;
        let bars = series.len();
        self.store.put(ticker, series, Local::now());
        debug!(ticker, bars, "fetched series cached");
        Ok(bars)
    }

    /// Cached entry for `ticker`, fetching it first on a cache miss.
    pub async fn load_entry(&self, ticker: &str) -> Result<CacheEntry, FetchError> {
        if let Some(entry) = self.store.entry(ticker) {
            return Ok(entry);
        }

        info!(ticker, "cache miss — fetching");
        self.fetch_and_store(ticker).await?;
        self.store
            .entry(ticker)
            .ok_or_else(|| FetchError::NotFound(ticker.to_string()))
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
