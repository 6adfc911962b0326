// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ). σ is the sample standard deviation of the
// same window. All three bands are undefined until the window is full.

use super::rolling::{rolling_mean, rolling_std};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_NUM_STD: f64 = 2.0;

/// Index-aligned band series.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands over every trailing window of `closes`.
///
/// `upper[i] >= middle[i] >= lower[i]` whenever all three are defined, since
/// σ is never negative. A position is defined for all three bands or none.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerSeries {
    let middle = rolling_mean(closes, period);
    let std = rolling_std(closes, period);

    let mut upper = Vec::with_capacity(closes.len());
    let mut lower = Vec::with_capacity(closes.len());
    let mut aligned_middle = Vec::with_capacity(closes.len());

    for (m, s) in middle.into_iter().zip(std) {
        match (m, s) {
            (Some(m), Some(s)) => {
                upper.push(Some(m + num_std * s));
                aligned_middle.push(Some(m));
                lower.push(Some(m - num_std * s));
            }
            _ => {
                upper.push(None);
                aligned_middle.push(None);
                lower.push(None);
            }
        }
    }

    BollingerSeries {
        upper,
        middle: aligned_middle,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_warmup() {
        let closes: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert!(bb.middle[..19].iter().all(Option::is_none));
        assert!(bb.upper[..19].iter().all(Option::is_none));
        assert!(bb.lower[..19].iter().all(Option::is_none));
        assert!(bb.middle[19].is_some());
    }

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        let (u, m, l) = (bb.upper[19].unwrap(), bb.middle[19].unwrap(), bb.lower[19].unwrap());
        assert!((m - 10.5).abs() < 1e-12);
        // Sample std of 1..=20 is sqrt(35).
        assert!((u - (10.5 + 2.0 * 35.0_f64.sqrt())).abs() < 1e-9);
        assert!((l - (10.5 - 2.0 * 35.0_f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn bollinger_flat_bands_collapse() {
        let bb = calculate_bollinger(&[100.0; 30], 20, 2.0);
        for i in 19..30 {
            assert_eq!(bb.upper[i], Some(100.0));
            assert_eq!(bb.middle[i], Some(100.0));
            assert_eq!(bb.lower[i], Some(100.0));
        }
    }

    #[test]
    fn bollinger_band_ordering() {
        let closes: Vec<f64> = (0..80).map(|i| 50.0 + (i as f64 * 0.37).cos() * 4.0).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        for i in 0..closes.len() {
            if let (Some(u), Some(m), Some(l)) = (bb.upper[i], bb.middle[i], bb.lower[i]) {
                assert!(u >= m && m >= l, "band ordering violated at {i}");
            }
        }
    }

    #[test]
    fn bollinger_insufficient_data() {
        let bb = calculate_bollinger(&[1.0, 2.0, 3.0], 20, 2.0);
        assert_eq!(bb.middle.len(), 3);
        assert!(bb.middle.iter().all(Option::is_none));
    }
}
