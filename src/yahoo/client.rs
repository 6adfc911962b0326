// =============================================================================
// Yahoo Finance chart client — intraday OHLCV over public REST
// =============================================================================
//
// GET {base}/v8/finance/chart/{ticker}?range=1d&interval=1m
//
// The chart endpoint needs no credentials but rejects requests without a
// browser-like User-Agent. Quote arrays are parallel to `timestamp[]` and may
// contain nulls for minutes without trades; those bars are dropped during
// cleaning.
// =============================================================================

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, instrument};

use crate::error::FetchError;
use crate::market_data::PriceSource;
use crate::runtime_config::YahooConfig;
use crate::types::{clean_bars, PriceSeries, RawBar};

/// Yahoo Finance chart API client.
#[derive(Clone)]
pub struct YahooClient {
    base_url: String,
    range: String,
    interval: String,
    client: reqwest::Client,
}

impl YahooClient {
    pub fn new(config: &YahooConfig) -> anyhow::Result<Self> {
        let mut default_headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .context("configured user agent is not a valid header value")?;
        default_headers.insert(USER_AGENT, agent);

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        debug!(base_url = %config.base_url, "YahooClient initialised");

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            range: config.range.clone(),
            interval: config.interval.clone(),
            client,
        })
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}",
            self.base_url, ticker, self.range, self.interval
        )
    }

    /// GET the chart for `ticker` and parse it into a cleaned series.
    #[instrument(skip(self), name = "yahoo::get_chart")]
    pub async fn get_chart(&self, ticker: &str) -> Result<PriceSeries, FetchError> {
        let resp = self.client.get(self.chart_url(ticker)).send().await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(ticker.to_string()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = resp.json().await?;
        let series = parse_chart(ticker, &body)?;

        debug!(ticker, bars = series.len(), "chart fetched");
        Ok(series)
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    async fn fetch(&self, ticker: &str) -> Result<PriceSeries, FetchError> {
        self.get_chart(ticker).await
    }
}

impl std::fmt::Debug for YahooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooClient")
            .field("base_url", &self.base_url)
            .field("range", &self.range)
            .field("interval", &self.interval)
            .finish()
    }
}

// -------------------------------------------------------------------------
// Response parsing
// -------------------------------------------------------------------------

/// Parse a chart response body.
///
/// Expected shape:
/// ```json
/// { "chart": { "result": [ {
///     "meta": { "gmtoffset": -18000, ... },
///     "timestamp": [1704205800, ...],
///     "indicators": { "quote": [ { "open": [...], "high": [...],
///                                  "low": [...], "close": [...],
///                                  "volume": [...] } ] }
/// } ], "error": null } }
/// ```
pub fn parse_chart(ticker: &str, body: &serde_json::Value) -> Result<PriceSeries, FetchError> {
    let chart = body
        .get("chart")
        .ok_or_else(|| FetchError::Malformed("missing field chart".into()))?;

    if let Some(err) = chart.get("error").filter(|e| !e.is_null()) {
        let description = err["description"].as_str().unwrap_or("unknown error");
        debug!(ticker, description, "provider reported an error");
        return Err(FetchError::NotFound(ticker.to_string()));
    }

    let result = chart["result"]
        .as_array()
        .and_then(|r| r.first())
        .ok_or_else(|| FetchError::NotFound(ticker.to_string()))?;

    let offset_secs = result["meta"]["gmtoffset"].as_i64().unwrap_or(0);
    let offset = i32::try_from(offset_secs)
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| FetchError::Malformed(format!("invalid gmtoffset {offset_secs}")))?;

    // Closed markets and brand-new listings come back without timestamps.
    let timestamps = match result.get("timestamp").and_then(|t| t.as_array()) {
        Some(ts) => ts,
        None => return Ok(PriceSeries::new(ticker, Vec::new())),
    };

    let quote = &result["indicators"]["quote"][0];
    let (open, high, low, close, volume) = (
        quote_column(quote, "open")?,
        quote_column(quote, "high")?,
        quote_column(quote, "low")?,
        quote_column(quote, "close")?,
        quote_column(quote, "volume")?,
    );

    let raw: Vec<RawBar> = timestamps
        .iter()
        .enumerate()
        .map(|(i, ts)| RawBar {
            timestamp: ts
                .as_i64()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|utc| utc.with_timezone(&offset)),
            open: open.get(i).and_then(|v| v.as_f64()),
            high: high.get(i).and_then(|v| v.as_f64()),
            low: low.get(i).and_then(|v| v.as_f64()),
            close: close.get(i).and_then(|v| v.as_f64()),
            volume: volume.get(i).and_then(|v| v.as_f64()),
        })
        .collect();

    let received = raw.len();
    let bars = clean_bars(raw);
    if bars.len() < received {
        debug!(ticker, dropped = received - bars.len(), "incomplete bars dropped");
    }

    Ok(PriceSeries::new(ticker, bars))
}

fn quote_column<'a>(
    quote: &'a serde_json::Value,
    name: &str,
) -> Result<&'a Vec<serde_json::Value>, FetchError> {
    quote[name]
        .as_array()
        .ok_or_else(|| FetchError::Malformed(format!("missing quote column {name}")))
}
