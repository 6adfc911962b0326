// =============================================================================
// Polynomial least-squares fit
// =============================================================================
//
// Regresses y on the bar index x using the feature expansion
// [1, u, u², …, u^degree] with u = x / scale, solved by SVD least squares.
// Scaling the index keeps the design matrix well-conditioned for intraday
// series of a few hundred bars; fitted values are unaffected by it whenever
// the design has full column rank.
//
// For rank-deficient designs (fewer points than coefficients) the SVD yields
// the minimum-norm solution rather than failing.
// =============================================================================

use nalgebra::{DMatrix, DVector};

use crate::error::PredictionError;

/// Fitted polynomial in the scaled index.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    pub degree: usize,
    scale: f64,
    /// Coefficients in ascending power order.
    coefficients: Vec<f64>,
}

impl PolynomialFit {
    /// Evaluate the polynomial at bar index `x` (Horner's scheme).
    pub fn evaluate(&self, x: f64) -> f64 {
        let u = x / self.scale;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * u + c)
    }
}

/// Fit `values` (indexed 0..n) with a polynomial of the given degree.
pub fn fit_polynomial(values: &[f64], degree: usize) -> Result<PolynomialFit, PredictionError> {
    if values.is_empty() {
        return Err(PredictionError::EmptySeries);
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(PredictionError::NonFiniteInput);
    }

    let n = values.len();
    let cols = degree + 1;
    let scale = (n.saturating_sub(1)).max(1) as f64;

    let design = DMatrix::from_fn(n, cols, |r, c| (r as f64 / scale).powi(c as i32));
    let y = DVector::from_column_slice(values);

    let svd = design.svd(true, true);
    // Same relative cutoff numpy's lstsq uses for small singular values.
    let eps = f64::EPSILON * svd.singular_values.max() * n.max(cols) as f64;
    let solution = svd
        .solve(&y, eps)
        .map_err(|_| PredictionError::SingularFit { degree })?;

    let coefficients: Vec<f64> = solution.iter().copied().collect();
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(PredictionError::SingularFit { degree });
    }

    Ok(PolynomialFit {
        degree,
        scale,
        coefficients,
    })
}
