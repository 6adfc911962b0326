// =============================================================================
// Stock response payload
// =============================================================================
//
// Wire shape consumed by the dashboard:
//
//   { "prices": [ {Datetime, Open, High, Low, Close, Volume}, ... ],
//     "indicators": { RSI, MACD, MACD_Signal, MACD_Hist,
//                     BB_Upper, BB_Middle, BB_Lower },
//     "predictions": { "linear": {current, future}, ... },
//     "last_updated": "YYYY-MM-DD HH:MM:SS",
//     "news": [] }
//
// Undefined indicator values are written as 0. This is lossy (a computed 0
// looks the same) and is kept for compatibility with existing clients.
// =============================================================================

use serde::Serialize;

use crate::indicators::{compute_indicators, IndicatorSet};
use crate::market_data::series_store::format_last_updated;
use crate::prediction::{predict, Predictions};
use crate::types::{CacheEntry, PriceBar};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

#[derive(Debug, Clone, Serialize)]
pub struct PriceRow {
    #[serde(rename = "Datetime")]
    pub datetime: String,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: f64,
}

impl From<&PriceBar> for PriceRow {
    fn from(bar: &PriceBar) -> Self {
        Self {
            datetime: bar.timestamp.format(DATETIME_FORMAT).to_string(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorPayload {
    #[serde(rename = "RSI")]
    pub rsi: Vec<f64>,
    #[serde(rename = "MACD")]
    pub macd: Vec<f64>,
    #[serde(rename = "MACD_Signal")]
    pub macd_signal: Vec<f64>,
    #[serde(rename = "MACD_Hist")]
    pub macd_hist: Vec<f64>,
    #[serde(rename = "BB_Upper")]
    pub bb_upper: Vec<f64>,
    #[serde(rename = "BB_Middle")]
    pub bb_middle: Vec<f64>,
    #[serde(rename = "BB_Lower")]
    pub bb_lower: Vec<f64>,
}

/// `None` becomes `0.0` on the wire.
fn zero_filled(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(0.0)).collect()
}

impl From<&IndicatorSet> for IndicatorPayload {
    fn from(set: &IndicatorSet) -> Self {
        Self {
            rsi: zero_filled(&set.rsi),
            macd: zero_filled(&set.macd),
            macd_signal: zero_filled(&set.macd_signal),
            macd_hist: zero_filled(&set.macd_hist),
            bb_upper: zero_filled(&set.bb_upper),
            bb_middle: zero_filled(&set.bb_middle),
            bb_lower: zero_filled(&set.bb_lower),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StockResponse {
    pub prices: Vec<PriceRow>,
    pub indicators: IndicatorPayload,
    pub predictions: Predictions,
    pub last_updated: String,
    pub news: Vec<serde_json::Value>,
}

impl StockResponse {
    /// Compute indicators and predictions from the entry's snapshot.
    pub fn build(entry: &CacheEntry) -> Self {
        let series = &entry.series;
        let indicators = compute_indicators(series);
        let predictions = predict(&series.ticker, &series.closes());

        Self {
            prices: series.bars.iter().map(PriceRow::from).collect(),
            indicators: IndicatorPayload::from(&indicators),
            predictions,
            last_updated: format_last_updated(&entry.updated_at),
            news: Vec::new(),
        }
    }
}
