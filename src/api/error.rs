// =============================================================================
// API error responses
// =============================================================================
//
// Only a missing series (or a malformed request) becomes a user-visible
// error. Indicator and prediction problems are resolved before the response
// layer and never reach it.
// =============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

use crate::error::FetchError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    #[error("Could not fetch data")]
    NoData,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTicker(_) => StatusCode::BAD_REQUEST,
            Self::NoData => StatusCode::NOT_FOUND,
        }
    }

    /// Map a fetch failure for `ticker` to the client-facing error.
    pub fn from_fetch(ticker: &str, err: FetchError) -> Self {
        warn!(ticker, error = %err, "no data available");
        Self::NoData
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::NoData.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidTicker("??".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn fetch_errors_collapse_to_no_data() {
        let err = ApiError::from_fetch(
            "ZZZ",
            FetchError::InsufficientData { got: 3, required: 10 },
        );
        assert!(matches!(err, ApiError::NoData));
        assert_eq!(err.to_string(), "Could not fetch data");
    }
}
