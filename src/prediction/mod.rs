// =============================================================================
// Trend Prediction
// =============================================================================
//
// Naive curve-fit extrapolation of the close series: linear, quadratic and
// cubic least-squares fits against bar index, each evaluated on the observed
// range and on the next PREDICTION_WINDOW indices. This is a visual trend
// aid, not a validated forecast.
// =============================================================================

pub mod polyfit;

use serde::Serialize;
use tracing::warn;

use crate::error::PredictionError;
use polyfit::fit_polynomial;

/// Number of extrapolated points per model.
pub const PREDICTION_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionModel {
    Linear,
    Quadratic,
    Cubic,
}

impl PredictionModel {
    pub const ALL: [PredictionModel; 3] = [Self::Linear, Self::Quadratic, Self::Cubic];

    pub fn degree(self) -> usize {
        match self {
            Self::Linear => 1,
            Self::Quadratic => 2,
            Self::Cubic => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::Cubic => "cubic",
        }
    }
}

impl std::fmt::Display for PredictionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One model's in-sample fit and out-of-sample extrapolation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPrediction {
    /// Model evaluated at indices 0..n.
    #[serde(rename = "current")]
    pub fitted: Vec<f64>,
    /// Model evaluated at indices n..n + PREDICTION_WINDOW.
    pub future: Vec<f64>,
}

/// Predictions keyed by model. Serialises to `{}` when unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Predictions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear: Option<ModelPrediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadratic: Option<ModelPrediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cubic: Option<ModelPrediction>,
}

impl Predictions {
    pub fn get(&self, model: PredictionModel) -> Option<&ModelPrediction> {
        match model {
            PredictionModel::Linear => self.linear.as_ref(),
            PredictionModel::Quadratic => self.quadratic.as_ref(),
            PredictionModel::Cubic => self.cubic.as_ref(),
        }
    }

    fn set(&mut self, model: PredictionModel, prediction: ModelPrediction) {
        let slot = match model {
            PredictionModel::Linear => &mut self.linear,
            PredictionModel::Quadratic => &mut self.quadratic,
            PredictionModel::Cubic => &mut self.cubic,
        };
        *slot = Some(prediction);
    }

    /// True when no model produced a result ("prediction unavailable").
    pub fn is_empty(&self) -> bool {
        self.linear.is_none() && self.quadratic.is_none() && self.cubic.is_none()
    }
}

/// Fit a single model to `closes`.
pub fn fit_model(closes: &[f64], model: PredictionModel) -> Result<ModelPrediction, PredictionError> {
    let fit = fit_polynomial(closes, model.degree())?;
    let n = closes.len();

    let fitted = (0..n).map(|i| fit.evaluate(i as f64)).collect();
    let future: Vec<f64> = (n..n + PREDICTION_WINDOW)
        .map(|i| fit.evaluate(i as f64))
        .collect();

    if future.iter().any(|v| !v.is_finite()) {
        return Err(PredictionError::SingularFit {
            degree: model.degree(),
        });
    }

    Ok(ModelPrediction { fitted, future })
}

/// Fit all three models. Fails as a whole if any model fails.
pub fn fit_trends(closes: &[f64]) -> Result<Predictions, PredictionError> {
    let mut predictions = Predictions::default();
    for model in PredictionModel::ALL {
        predictions.set(model, fit_model(closes, model)?);
    }
    Ok(predictions)
}

/// Like [`fit_trends`], but a failure is logged and yields empty predictions.
pub fn predict(ticker: &str, closes: &[f64]) -> Predictions {
    fit_trends(closes).unwrap_or_else(|e| {
        warn!(ticker, bars = closes.len(), error = %e, "trend fit failed — predictions unavailable");
        Predictions::default()
    })
}
