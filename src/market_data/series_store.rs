use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Local};
use parking_lot::RwLock;
use tracing::debug;

use crate::types::{CacheEntry, PriceSeries};

/// Format used for `last_updated` in API responses.
const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// SeriesStore -- latest series per ticker, replaced wholesale
// ---------------------------------------------------------------------------

/// Thread-safe store of the most recently fetched series per ticker.
///
/// Series are held behind `Arc` so a reader takes a snapshot by cloning the
/// pointer. `put` swaps the pointer under a short write lock, so readers see
/// either the old series or the new one, never a mix. Locks are never held
/// while computing indicators or waiting on the network.
pub struct SeriesStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot of the series stored for `ticker`.
    pub fn get(&self, ticker: &str) -> Option<Arc<PriceSeries>> {
        self.entries.read().get(ticker).map(|e| e.series.clone())
    }

    /// Snapshot of the series together with its update time.
    pub fn entry(&self, ticker: &str) -> Option<CacheEntry> {
        self.entries.read().get(ticker).cloned()
    }

    /// Replace the entry for `ticker`. The series is wrapped before the lock
    /// is taken.
    pub fn put(&self, ticker: &str, series: PriceSeries, updated_at: DateTime<Local>) {
        let bars = series.len();
        let entry = CacheEntry {
            series: Arc::new(series),
            updated_at,
        };
        self.entries.write().insert(ticker.to_string(), entry);
        debug!(ticker, bars, "series stored");
    }

    /// All cached tickers, sorted.
    pub fn tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = self.entries.read().keys().cloned().collect();
        tickers.sort();
        tickers
    }

    /// `YYYY-MM-DD HH:MM:SS` of the last successful store, or `"Never"`.
    pub fn last_updated(&self, ticker: &str) -> String {
        self.entries
            .read()
            .get(ticker)
            .map(|e| format_last_updated(&e.updated_at))
            .unwrap_or_else(|| "Never".to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_last_updated(at: &DateTime<Local>) -> String {
    at.format(LAST_UPDATED_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::compute_indicators;
    use crate::types::test_support::series_from_closes;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 6, h, m, s).unwrap()
    }

    #[test]
    fn missing_ticker_is_absent() {
        let store = SeriesStore::new();
        assert!(store.get("AAPL").is_none());
        assert!(store.entry("AAPL").is_none());
        assert_eq!(store.last_updated("AAPL"), "Never");
        assert!(store.is_empty());
    }

    #[test]
    fn put_then_get_returns_series() {
        let store = SeriesStore::new();
        store.put("AAPL", series_from_closes("AAPL", &[1.0, 2.0]), at(9, 31, 5));

        let series = store.get("AAPL").unwrap();
        assert_eq!(series.closes(), vec![1.0, 2.0]);
        assert_eq!(store.last_updated("AAPL"), "2024-05-06 09:31:05");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn put_replaces_without_touching_held_snapshot() {
        let store = SeriesStore::new();
        store.put("MSFT", series_from_closes("MSFT", &[1.0, 2.0, 3.0]), at(10, 0, 0));
        let old = store.get("MSFT").unwrap();

        store.put("MSFT", series_from_closes("MSFT", &[5.0; 8]), at(10, 1, 0));

        assert_eq!(old.len(), 3);
        assert_eq!(store.get("MSFT").unwrap().len(), 8);
        assert_eq!(store.last_updated("MSFT"), "2024-05-06 10:01:00");
    }

    #[test]
    fn tickers_are_sorted() {
        let store = SeriesStore::new();
        for t in ["TSLA", "AAPL", "MSFT"] {
            store.put(t, series_from_closes(t, &[1.0]), at(9, 0, 0));
        }
        assert_eq!(store.tickers(), vec!["AAPL", "MSFT", "TSLA"]);
    }

    #[test]
    fn concurrent_put_never_tears_a_snapshot() {
        let store = Arc::new(SeriesStore::new());
        store.put("SPY", series_from_closes("SPY", &[1.0; 12]), at(9, 0, 0));

        let writer = {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..200usize {
                    let len = 12 + (i % 30);
                    let closes: Vec<f64> = (0..len).map(|x| x as f64 + 1.0).collect();
                    store.put("SPY", series_from_closes("SPY", &closes), at(9, 0, 0));
                }
            })
        };

        for _ in 0..200 {
            let snapshot = store.get("SPY").unwrap();
            let indicators = compute_indicators(&snapshot);
            assert_eq!(indicators.len(), snapshot.len());
            assert_eq!(indicators.rsi.len(), snapshot.len());
            assert_eq!(indicators.bb_lower.len(), snapshot.len());
        }

        writer.join().unwrap();
    }
}
