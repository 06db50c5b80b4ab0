//! # Heatfield Kriging
//!
//! The default geostatistical estimator for heatfield: ordinary kriging
//! over exponential, spherical or Gaussian variogram models.
//!
//! The render pipeline consumes this crate only through the
//! [`heatfield_core::Estimator`] trait — training on weighted grid points
//! and predicting at arbitrary screen coordinates.

pub mod estimator;
pub mod variogram;

pub use estimator::{KrigingEstimator, KrigingModel};
pub use variogram::Variogram;
