use nalgebra::{DMatrix, DVector};
use tracing::debug;

use super::error::PredictError;

/// Ordinary-least-squares linear model over embedding features.
///
/// Fitting centers both features and targets and solves the centered system
/// with an SVD pseudoinverse, which gives the minimum-norm solution when the
/// system is underdetermined. With ten training rows in a 384-dimensional
/// feature space the system is always underdetermined, so the fit
/// interpolates the training set exactly; predictions away from it are
/// extrapolations, not calibrated probabilities.
#[derive(Debug, Clone)]
pub struct LinearModel {
    weights: DVector<f64>,
    bias: f64,
}

impl LinearModel {
    /// Fits weights and bias from feature rows and their targets.
    pub fn fit(rows: &[Vec<f32>], targets: &[f64]) -> Result<Self, PredictError> {
        if rows.is_empty() {
            return Err(PredictError::InvalidTrainingData {
                reason: "no training rows".to_string(),
            });
        }
        if rows.len() != targets.len() {
            return Err(PredictError::InvalidTrainingData {
                reason: format!(
                    "{} feature rows but {} targets",
                    rows.len(),
                    targets.len()
                ),
            });
        }

        let dim = rows[0].len();
        if dim == 0 {
            return Err(PredictError::InvalidTrainingData {
                reason: "zero-dimensional feature rows".to_string(),
            });
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != dim) {
            return Err(PredictError::InvalidTrainingData {
                reason: format!(
                    "inconsistent feature dimensions: expected {}, found {}",
                    dim,
                    bad.len()
                ),
            });
        }

        let n = rows.len();
        let x = DMatrix::from_row_iterator(
            n,
            dim,
            rows.iter().flat_map(|r| r.iter().map(|&v| v as f64)),
        );
        let y = DVector::from_row_slice(targets);

        // Center features and targets so the bias falls out of the solve.
        let x_mean = x.row_mean();
        let y_mean = y.mean();

        let mut xc = x;
        for mut row in xc.row_iter_mut() {
            row -= &x_mean;
        }
        let yc = y.add_scalar(-y_mean);

        let svd = xc.svd(true, true);
        let max_singular = svd.singular_values.max();
        let tolerance = max_singular * (n.max(dim) as f64) * f64::EPSILON;

        let weights = svd
            .solve(&yc, tolerance)
            .map_err(|reason| PredictError::SolverFailed {
                reason: reason.to_string(),
            })?;

        let bias = y_mean - weights.dot(&x_mean.transpose());

        debug!(
            rows = n,
            dim,
            bias,
            max_singular,
            "Fitted linear success model"
        );

        Ok(Self { weights, bias })
    }

    /// Returns the raw (unclamped) affine output for one feature vector.
    pub fn predict(&self, features: &[f32]) -> Result<f64, PredictError> {
        if features.len() != self.weights.len() {
            return Err(PredictError::DimensionMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }

        let x = DVector::from_iterator(features.len(), features.iter().map(|&v| v as f64));
        Ok(self.weights.dot(&x) + self.bias)
    }

    /// Feature dimension the model was fitted with.
    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    /// Fitted weight vector.
    pub fn weights(&self) -> &DVector<f64> {
        &self.weights
    }

    /// Fitted bias term.
    pub fn bias(&self) -> f64 {
        self.bias
    }
}
