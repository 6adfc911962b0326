// =============================================================================
// Relative Strength Index (RSI) — simple rolling averages
// =============================================================================
//
// Step 1 — Bar-to-bar close differences. The first bar has no predecessor; its
//          difference contributes zero gain and zero loss, so the first full
//          window ends at index `period - 1`.
// Step 2 — gain = max(diff, 0), loss = max(-diff, 0).
// Step 3 — avg_gain / avg_loss are simple rolling means over `period`
//          (not Wilder's smoothing).
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
// =============================================================================

use super::rolling::rolling_mean;

/// Compute the RSI series for `closes`, index-aligned with the input.
///
/// # Edge cases
/// - `period == 0` => all `None`
/// - Positions before `period - 1` are `None`.
/// - If the average loss is zero the RSI is 100.0, including a flat window
///   with no gains either.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        let delta = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
        // NaN deltas fall through both comparisons and count as neither.
        gains.push(if delta > 0.0 { delta } else { 0.0 });
        losses.push(if delta < 0.0 { -delta } else { 0.0 });
    }

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    avg_gain
        .into_iter()
        .zip(avg_loss)
        .map(|(g, l)| rsi_from_averages(g?, l?))
        .collect()
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    let rsi = if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    rsi.is_finite().then_some(rsi)
}
