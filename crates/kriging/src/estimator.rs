//! Ordinary-kriging train/predict.
//!
//! Best Linear Unbiased Estimator for sparse spatial data. Training builds
//! the kriging system for n points:
//!
//! ```text
//! [γ(x₁,x₁) ... γ(x₁,xₙ) 1] [w₁]   [γ(x₁,x₀)]
//! [   ...     ...    ...   .] [. ] = [   ...   ]
//! [γ(xₙ,x₁) ... γ(xₙ,xₙ) 1] [wₙ]   [γ(xₙ,x₀)]
//! [  1       ...    1     0] [μ ]   [    1    ]
//! ```
//!
//! and inverts it once, so each prediction is a single matrix-vector
//! product. μ is the Lagrange multiplier enforcing Σwᵢ = 1.

use ndarray::Array2;

use heatfield_core::{EstimationError, Estimator, ModelParams, TrainingSet};

use crate::variogram::Variogram;

/// Distance below which a target is treated as coincident with a sample.
const COINCIDENT_EPS: f64 = 1e-12;

/// Pivot magnitude below which the kriging system counts as singular.
const SINGULAR_EPS: f64 = 1e-12;

/// Fitted kriging model: training points plus the inverted system matrix.
///
/// Opaque to the render pipeline; scoped to a single redraw.
#[derive(Debug, Clone)]
pub struct KrigingModel {
    xs: Vec<f64>,
    ys: Vec<f64>,
    values: Vec<f64>,
    variogram: Variogram,
    /// Inverse of the (n+1)×(n+1) kriging matrix.
    inverse: Array2<f64>,
}

impl KrigingModel {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn variogram(&self) -> &Variogram {
        &self.variogram
    }
}

/// The default [`Estimator`]: ordinary kriging over a variogram model.
#[derive(Debug, Clone, Copy, Default)]
pub struct KrigingEstimator;

impl Estimator for KrigingEstimator {
    type Model = KrigingModel;

    fn train(
        &self,
        training: &TrainingSet,
        params: &ModelParams,
    ) -> Result<KrigingModel, EstimationError> {
        let n = training.len();
        debug_assert_eq!(training.xs.len(), n);
        debug_assert_eq!(training.ys.len(), n);

        if n < 2 {
            return Err(EstimationError::TooFewPoints { got: n, need: 2 });
        }

        let variogram = Variogram::from_params(params, sample_variance(&training.values));

        let m = n + 1;
        let mut system = Array2::<f64>::zeros((m, m));
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = training.xs[i] - training.xs[j];
                let dy = training.ys[i] - training.ys[j];
                let g = variogram.evaluate((dx * dx + dy * dy).sqrt());
                system[[i, j]] = g;
                system[[j, i]] = g;
            }
            // Lagrange constraint row and column
            system[[i, n]] = 1.0;
            system[[n, i]] = 1.0;
        }

        let inverse = invert(system)?;

        Ok(KrigingModel {
            xs: training.xs.clone(),
            ys: training.ys.clone(),
            values: training.values.clone(),
            variogram,
            inverse,
        })
    }

    fn predict(&self, x: f64, y: f64, model: &KrigingModel) -> f64 {
        let n = model.values.len();
        let mut rhs = vec![0.0; n + 1];

        for i in 0..n {
            let dx = model.xs[i] - x;
            let dy = model.ys[i] - y;
            let d = (dx * dx + dy * dy).sqrt();
            if d < COINCIDENT_EPS {
                return model.values[i];
            }
            rhs[i] = model.variogram.evaluate(d);
        }
        rhs[n] = 1.0;

        // Weights are the first n entries of inverse · rhs; the last entry
        // is the Lagrange multiplier, unused for the point estimate.
        let mut estimate = 0.0;
        for i in 0..n {
            let mut w = 0.0;
            for (j, r) in rhs.iter().enumerate() {
                w += model.inverse[[i, j]] * r;
            }
            estimate += w * model.values[i];
        }
        estimate
    }
}

/// Population variance of the training values.
///
/// A constant field still needs a positive sill for a solvable system, so
/// zero variance falls back to 1.0; the Σwᵢ = 1 constraint then reproduces
/// the constant exactly.
fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    if var > 1e-12 { var } else { 1.0 }
}

/// Invert via Gauss-Jordan elimination with partial pivoting.
fn invert(mut a: Array2<f64>) -> Result<Array2<f64>, EstimationError> {
    let m = a.nrows();
    let mut inv = Array2::<f64>::eye(m);

    for col in 0..m {
        let mut max_val = a[[col, col]].abs();
        let mut max_row = col;
        for row in (col + 1)..m {
            let val = a[[row, col]].abs();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if max_val < SINGULAR_EPS {
            return Err(EstimationError::SingularSystem);
        }

        if max_row != col {
            for j in 0..m {
                let tmp = a[[col, j]];
                a[[col, j]] = a[[max_row, j]];
                a[[max_row, j]] = tmp;

                let tmp = inv[[col, j]];
                inv[[col, j]] = inv[[max_row, j]];
                inv[[max_row, j]] = tmp;
            }
        }

        let pivot = a[[col, col]];
        for j in 0..m {
            a[[col, j]] /= pivot;
            inv[[col, j]] /= pivot;
        }

        for row in 0..m {
            if row == col {
                continue;
            }
            let factor = a[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for j in 0..m {
                a[[row, j]] -= factor * a[[col, j]];
                inv[[row, j]] -= factor * inv[[col, j]];
            }
        }
    }

    Ok(inv)
}
