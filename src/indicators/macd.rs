// =============================================================================
// MACD — Moving Average Convergence Divergence
// =============================================================================
//
//   MACD      = EMA(close, fast) - EMA(close, slow)
//   Signal    = EMA(MACD, signal)
//   Histogram = MACD - Signal
//
// Every EMA is seeded with its first input, so all three lines are defined
// from index 0. The dashboard plots them without a warm-up placeholder.
// =============================================================================

use super::ema::{calculate_ema, calculate_ema_opt};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// The three MACD lines, index-aligned with the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub fn calculate_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let ema_fast = calculate_ema(closes, fast);
    let ema_slow = calculate_ema(closes, slow);

    let macd: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| Some(f.as_ref()? - s.as_ref()?))
        .collect();

    let signal = calculate_ema_opt(&macd, signal);

    let histogram = macd
        .iter()
        .zip(&signal)
        .map(|(m, s)| Some(m.as_ref()? - s.as_ref()?))
        .collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}

pub fn calculate_macd_default(closes: &[f64]) -> MacdSeries {
    calculate_macd(closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_defined_from_first_bar() {
        let closes = [10.0, 10.5, 10.2];
        let out = calculate_macd_default(&closes);
        assert_eq!(out.macd[0], Some(0.0));
        assert_eq!(out.signal[0], Some(0.0));
        assert_eq!(out.histogram[0], Some(0.0));
        assert!(out.macd.iter().all(Option::is_some));
        assert!(out.histogram.iter().all(Option::is_some));
    }

    #[test]
    fn macd_matches_manual_recurrence() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0).collect();
        let out = calculate_macd_default(&closes);

        let (a12, a26, a9) = (2.0 / 13.0, 2.0 / 27.0, 2.0 / 10.0);
        let (mut e12, mut e26) = (closes[0], closes[0]);
        let mut sig = 0.0;
        for (i, &c) in closes.iter().enumerate() {
            if i > 0 {
                e12 = a12 * c + (1.0 - a12) * e12;
                e26 = a26 * c + (1.0 - a26) * e26;
            }
            let m = e12 - e26;
            sig = if i == 0 { m } else { a9 * m + (1.0 - a9) * sig };

            assert!((out.macd[i].unwrap() - m).abs() < 1e-9);
            assert!((out.signal[i].unwrap() - sig).abs() < 1e-9);
            assert!((out.histogram[i].unwrap() - (m - sig)).abs() < 1e-9);
        }
    }

    #[test]
    fn macd_positive_in_uptrend() {
        let closes: Vec<f64> = (1..=60).map(|x| x as f64).collect();
        let out = calculate_macd_default(&closes);
        assert!(out.macd[59].unwrap() > 0.0);
    }

    #[test]
    fn macd_empty_input() {
        let out = calculate_macd_default(&[]);
        assert!(out.macd.is_empty());
        assert!(out.signal.is_empty());
        assert!(out.histogram.is_empty());
    }
}
