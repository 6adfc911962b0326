// =============================================================================
// Ticker path extractor
// =============================================================================
//
// Normalises the `:ticker` path segment (trim, upper-case) and rejects
// anything that is not a plausible exchange symbol before it reaches the
// cache or the provider URL.
//
//   async fn handler(Ticker(ticker): Ticker, ...) { ... }
//
// Accepted: 1–16 characters from A–Z, 0–9 and `.`, `-`, `^`, `=`
// (e.g. `BRK-B`, `^GSPC`, `EURUSD=X`).
// =============================================================================

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use super::error::ApiError;

const MAX_TICKER_LEN: usize = 16;

/// A validated, upper-cased ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker(pub String);

/// Trim and upper-case `raw`, returning `None` if it is not a valid symbol.
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let ticker = raw.trim().to_uppercase();
    let valid = !ticker.is_empty()
        && ticker.len() <= MAX_TICKER_LEN
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
    valid.then_some(ticker)
}

#[async_trait]
impl<S> FromRequestParts<S> for Ticker
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidTicker(e.body_text()))?;

        normalize_ticker(&raw)
            .map(Ticker)
            .ok_or(ApiError::InvalidTicker(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_case_and_whitespace() {
        assert_eq!(normalize_ticker(" aapl "), Some("AAPL".to_string()));
    }

    #[test]
    fn accepts_symbol_punctuation() {
        for t in ["BRK-B", "^GSPC", "EURUSD=X", "RDS.A"] {
            assert_eq!(normalize_ticker(t).as_deref(), Some(t));
        }
    }

    #[test]
    fn rejects_invalid_symbols() {
        assert_eq!(normalize_ticker(""), None);
        assert_eq!(normalize_ticker("   "), None);
        assert_eq!(normalize_ticker("AAPL/../x"), None);
        assert_eq!(normalize_ticker("A B"), None);
        assert_eq!(normalize_ticker("ABCDEFGHIJKLMNOPQ"), None);
    }
}
