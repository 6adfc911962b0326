// =============================================================================
// Rolling-window statistics
// =============================================================================
//
// Trailing-window mean and sample standard deviation, index-aligned with the
// input. Position `i` summarises `values[i + 1 - window ..= i]`; the first
// `window - 1` positions are `None` because the window is not yet full.
// =============================================================================

/// Trailing simple moving average.
///
/// # Edge cases
/// - `window == 0` => all `None`
/// - A window containing a non-finite value yields `None` at that position.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| Some(mean(w)))
}

/// Trailing sample standard deviation (`n - 1` denominator).
///
/// # Edge cases
/// - `window < 2` => all `None` (the sample variance is undefined)
/// - A window of identical values yields exactly `0.0`.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }
    rolling(values, window, |w| {
        let m = mean(w);
        let sum_sq: f64 = w.iter().map(|x| (x - m).powi(2)).sum();
        Some((sum_sq / (w.len() - 1) as f64).sqrt())
    })
}

fn rolling<F>(values: &[f64], window: usize, stat: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            stat(&values[i + 1 - window..=i]).filter(|v| v.is_finite())
        })
        .collect()
}

fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_warmup_is_undefined() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(out, vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn mean_window_zero() {
        assert_eq!(rolling_mean(&[1.0, 2.0], 0), vec![None, None]);
    }

    #[test]
    fn mean_shorter_than_window() {
        assert!(rolling_mean(&[1.0, 2.0], 5).iter().all(Option::is_none));
    }

    #[test]
    fn std_uses_sample_denominator() {
        // Sample std of [2, 4, 4, 4, 5, 5, 7, 9] is sqrt(32 / 7).
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = rolling_std(&values, 8);
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((out[7].unwrap() - expected).abs() < 1e-12);
        assert!(out[..7].iter().all(Option::is_none));
    }

    #[test]
    fn std_of_constant_window_is_zero() {
        let out = rolling_std(&[42.0; 6], 4);
        assert_eq!(out[3], Some(0.0));
        assert_eq!(out[5], Some(0.0));
    }

    #[test]
    fn std_window_one_is_undefined() {
        assert!(rolling_std(&[1.0, 2.0, 3.0], 1).iter().all(Option::is_none));
    }

    #[test]
    fn nan_poisons_only_windows_containing_it() {
        let out = rolling_mean(&[1.0, f64::NAN, 3.0, 5.0, 7.0], 2);
        assert_eq!(out, vec![None, None, None, Some(4.0), Some(6.0)]);
    }
}
