// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   alpha  = 2 / (span + 1)
//   EMA_0  = value_0
//   EMA_t  = alpha * value_t + (1 - alpha) * EMA_{t-1}
//
// Seeding with the first value (rather than an SMA of the first `span` values)
// means the series is defined from index 0 with no warm-up gap. MACD relies on
// this.
// =============================================================================

/// Smoothing factor for a given span.
pub fn alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Compute the EMA series for `values`, one output per input.
///
/// # Edge cases
/// - empty input => empty vec
/// - `span == 0` => alpha is 2, which is still a finite recurrence; callers
///   pass fixed spans so this is not guarded further.
/// - A non-finite value makes that position and every later one `None`
///   (the recurrence cannot recover from NaN).
pub fn calculate_ema(values: &[f64], span: usize) -> Vec<Option<f64>> {
    let alpha = alpha(span);
    let mut result = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for (i, &value) in values.iter().enumerate() {
        let next = if i == 0 {
            Some(value)
        } else {
            prev.map(|p| alpha * value + (1.0 - alpha) * p)
        };
        let next = next.filter(|v| v.is_finite());
        result.push(next);
        prev = next;
    }

    result
}

/// EMA over an optional series. Leading `None`s are skipped; the recurrence
/// is seeded at the first defined value.
pub fn calculate_ema_opt(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    let alpha = alpha(span);
    let mut result = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    let mut seeded = false;

    for value in values {
        let next = match (seeded, *value, prev) {
            (false, Some(v), _) => {
                seeded = true;
                Some(v)
            }
            (false, None, _) => None,
            (true, Some(v), Some(p)) => Some(alpha * v + (1.0 - alpha) * p),
            (true, _, _) => None,
        };
        let next = next.filter(|v| v.is_finite());
        result.push(next);
        prev = next;
    }

    result
}
