// =============================================================================
// Price source — the external fetch capability
// =============================================================================

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::PriceSeries;

/// Fewest bars a fetched series must have to be cached and served.
pub const MIN_BARS: usize = 10;

/// Anything that can produce a cleaned intraday series for a ticker.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, ticker: &str) -> Result<PriceSeries, FetchError>;
}

/// Reject series too short to be served.
pub fn ensure_min_bars(series: PriceSeries) -> Result<PriceSeries, FetchError> {
    if series.len() < MIN_BARS {
        return Err(FetchError::InsufficientData {
            got: series.len(),
            required: MIN_BARS,
        });
    }
    Ok(series)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_support::series_from_closes;

    #[test]
    fn short_series_is_rejected() {
        let err = ensure_min_bars(series_from_closes("X", &[1.0; 9])).unwrap_err();
        assert!(matches!(
            err,
            FetchError::InsufficientData { got: 9, required: 10 }
        ));
    }

    #[test]
    fn minimum_length_is_accepted() {
        assert!(ensure_min_bars(series_from_closes("X", &[1.0; 10])).is_ok());
    }
}
