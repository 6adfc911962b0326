// =============================================================================
// Domain error types
// =============================================================================
//
// Startup and configuration paths use `anyhow`. The seams between the fetch
// collaborator, the predictor and the response layer use these typed errors
// so callers can decide how each failure is surfaced.
// =============================================================================

use thiserror::Error;

/// The price source could not produce a usable series.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("no data for ticker {0}")]
    NotFound(String),

    #[error("insufficient data: got {got} bars, need {required}")]
    InsufficientData { got: usize, required: usize },
}

/// A trend fit could not be produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictionError {
    #[error("cannot fit an empty series")]
    EmptySeries,

    #[error("series contains non-finite close prices")]
    NonFiniteInput,

    #[error("least-squares fit failed for degree {degree}")]
    SingularFit { degree: usize },
}
