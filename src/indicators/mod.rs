// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator series. Every output is index-aligned with
// the input closes and uses `None` for "undefined" (window not yet full, or a
// non-finite intermediate). Nothing here panics or returns an error for
// degenerate input.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rolling;
pub mod rsi;

use crate::types::PriceSeries;

pub const RSI_PERIOD: usize = 14;

/// Derived indicator columns for one price series.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_hist: Vec<Option<f64>>,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_middle: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
}

impl IndicatorSet {
    /// Number of positions; equal to the source series length.
    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }
}

/// Compute every indicator for `series`.
///
/// Callers should only treat the result as meaningful for series of at least
/// ten bars; shorter input is still handled and simply yields more `None`s.
pub fn compute_indicators(series: &PriceSeries) -> IndicatorSet {
    compute_from_closes(&series.closes())
}

pub fn compute_from_closes(closes: &[f64]) -> IndicatorSet {
    let rsi = rsi::calculate_rsi(closes, RSI_PERIOD);
    let macd = macd::calculate_macd_default(closes);
    let bb = bollinger::calculate_bollinger(
        closes,
        bollinger::DEFAULT_PERIOD,
        bollinger::DEFAULT_NUM_STD,
    );

    IndicatorSet {
        rsi,
        macd: macd.macd,
        macd_signal: macd.signal,
        macd_hist: macd.histogram,
        bb_upper: bb.upper,
        bb_middle: bb.middle,
        bb_lower: bb.lower,
    }
}
