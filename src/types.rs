// =============================================================================
// Shared types used across the stockscope service
// =============================================================================

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;

/// One sampled interval of a price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBar {
    pub timestamp: DateTime<FixedOffset>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A bar as delivered by a data provider, before cleaning. Any field may be
/// missing.
#[derive(Debug, Clone, Default)]
pub struct RawBar {
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl RawBar {
    /// Convert into a [`PriceBar`] if every field is present and finite.
    fn into_bar(self) -> Option<PriceBar> {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        Some(PriceBar {
            timestamp: self.timestamp?,
            open: finite(self.open)?,
            high: finite(self.high)?,
            low: finite(self.low)?,
            close: finite(self.close)?,
            volume: finite(self.volume)?,
        })
    }
}

/// Ordered bars for a single ticker, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub ticker: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            ticker: ticker.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

/// Cached series for one ticker together with the local time it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub series: Arc<PriceSeries>,
    pub updated_at: DateTime<Local>,
}

/// Drop incomplete bars, order by timestamp and remove duplicate timestamps.
///
/// When two bars share a timestamp the later one in provider order wins; the
/// provider revises the in-progress minute in place.
pub fn clean_bars(raw: Vec<RawBar>) -> Vec<PriceBar> {
    let mut bars: Vec<PriceBar> = raw.into_iter().filter_map(RawBar::into_bar).collect();

    // Stable sort keeps provider order among equal timestamps.
    bars.sort_by_key(|b| b.timestamp);

    let mut cleaned: Vec<PriceBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match cleaned.last_mut() {
            Some(last) if last.timestamp == bar.timestamp => *last = bar,
            _ => cleaned.push(bar),
        }
    }
    cleaned
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 14, minute, 0)
            .unwrap()
    }

    fn raw(minute: u32, close: Option<f64>) -> RawBar {
        RawBar {
            timestamp: Some(ts(minute)),
            open: Some(10.0),
            high: Some(11.0),
            low: Some(9.0),
            close,
            volume: Some(500.0),
        }
    }

    #[test]
    fn clean_drops_bars_with_missing_fields() {
        let bars = clean_bars(vec![
            raw(0, Some(10.0)),
            raw(1, None),
            raw(2, Some(f64::NAN)),
            RawBar {
                timestamp: None,
                ..raw(3, Some(10.5))
            },
            raw(4, Some(10.2)),
        ]);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].timestamp, ts(0));
        assert_eq!(bars[1].timestamp, ts(4));
    }

    #[test]
    fn clean_sorts_and_dedups_keeping_latest() {
        let bars = clean_bars(vec![
            raw(5, Some(3.0)),
            raw(1, Some(1.0)),
            raw(5, Some(4.0)),
            raw(2, Some(2.0)),
        ]);
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 4.0]);
        assert!(bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn closes_follow_bar_order() {
        let series = test_support::series_from_closes("AAPL", &[1.0, 2.5, 3.0]);
        assert_eq!(series.closes(), vec![1.0, 2.5, 3.0]);
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
    }
}
