//! The estimator contract.
//!
//! The render pipeline reduces visible samples to a small weighted point
//! set, hands it to an [`Estimator`] for model fitting, and queries the
//! fitted model per covered pixel. The estimator's internal mathematics are
//! a black box to the pipeline; `heatfield-kriging` is the default
//! implementation.

use serde::{Deserialize, Serialize};

use crate::error::EstimationError;

/// Weighted grid points in screen space, as parallel arrays.
///
/// The arrays are always the same length — one entry per non-empty grid
/// cell of the aggregation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub values: Vec<f64>,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl TrainingSet {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            values: Vec::with_capacity(n),
            xs: Vec::with_capacity(n),
            ys: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, value: f64, x: f64, y: f64) {
        self.values.push(value);
        self.xs.push(x);
        self.ys.push(y);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean of the values; `None` when empty.
    pub fn mean_value(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }
}

/// Theoretical variogram model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariogramKind {
    #[default]
    Exponential,
    Spherical,
    Gaussian,
}

/// Fixed model parameters the pipeline supplies to `train`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Variogram model family.
    pub kind: VariogramKind,
    /// Nugget: semivariance as distance approaches zero.
    pub nugget: f64,
    /// Range: distance (in screen pixels) at which correlation levels off.
    pub range: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            kind: VariogramKind::Exponential,
            nugget: 0.0,
            range: 100.0,
        }
    }
}

/// Black-box geostatistical interpolator.
///
/// `train` fits a model to weighted screen-space points; `predict` queries
/// it at arbitrary pixel coordinates. A model is scoped to one redraw and
/// replaced wholesale by the next.
pub trait Estimator {
    /// Opaque fitted model.
    type Model;

    /// Fit a model. Fails with [`EstimationError`] on statistically
    /// degenerate input (too few points, singular covariance).
    fn train(
        &self,
        training: &TrainingSet,
        params: &ModelParams,
    ) -> Result<Self::Model, EstimationError>;

    /// Predict the scalar field at screen coordinates `(x, y)`.
    fn predict(&self, x: f64, y: f64, model: &Self::Model) -> f64;
}
