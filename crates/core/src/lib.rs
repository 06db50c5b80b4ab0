//! # Heatfield Core
//!
//! Core types for the heatfield interpolated-heatmap renderer.
//!
//! This crate provides:
//! - `Sample`, `LatLng`, `LatLngBounds`: geotagged readings and geography
//! - `MapTransform`: the host-map seam, with a concrete `MercatorView`
//! - `PixelBuffer`: the RGBA output raster
//! - `Estimator`: the geostatistical interpolation contract
//! - `Error` / `EstimationError`: the error surface

pub mod buffer;
pub mod error;
pub mod estimator;
pub mod geo;
pub mod sample;
pub mod view;

pub use buffer::PixelBuffer;
pub use error::{Error, EstimationError, Result};
pub use estimator::{Estimator, ModelParams, TrainingSet, VariogramKind};
pub use geo::{LatLng, LatLngBounds};
pub use sample::Sample;
pub use view::{MapTransform, MercatorView};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::error::{Error, EstimationError, Result};
    pub use crate::estimator::{Estimator, ModelParams, TrainingSet, VariogramKind};
    pub use crate::geo::{LatLng, LatLngBounds};
    pub use crate::sample::Sample;
    pub use crate::view::{MapTransform, MercatorView};
}
