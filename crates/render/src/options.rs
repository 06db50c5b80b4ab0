//! Heatmap rendering configuration

use heatfield_colormap::{GradientStop, DEFAULT_STOPS};
use heatfield_core::{Error, ModelParams, Result};
use serde::{Deserialize, Serialize};

/// Default number of zoom levels after which the weight decay stops
/// shrinking. A tunable, not a derived quantity.
pub const DECAY_CLAMP_LEVELS: f64 = 12.0;

/// Configuration for a [`HeatmapOverlay`](crate::HeatmapOverlay).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapOptions {
    /// Stamp radius in pixels: the fully-opaque core of each coverage
    /// circle. Also drives the viewport margin (`2 × radius`) and the
    /// aggregation cell size (`radius / 4`).
    pub radius: f64,
    /// Feather width in pixels around the stamp core.
    pub blur: f64,
    /// Reading mapped to the top of the color ramp.
    pub max: f64,
    /// Zoom level at which samples carry full weight; zooming out decays
    /// weight geometrically from here.
    pub max_zoom: f64,
    /// Zoom distance beyond which the decay factor stops shrinking.
    pub decay_clamp_levels: f64,
    /// Gradient stops for the color ramp.
    pub gradient: Vec<GradientStop>,
    /// Parameters handed to the estimator's `train`.
    pub model: ModelParams,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            radius: 32.0,
            blur: 32.0,
            max: 1.0,
            max_zoom: 18.0,
            decay_clamp_levels: DECAY_CLAMP_LEVELS,
            gradient: DEFAULT_STOPS.to_vec(),
            model: ModelParams::default(),
        }
    }
}

impl HeatmapOptions {
    /// Viewport margin in pixels: samples this far outside the visible
    /// rectangle still contribute to the render.
    pub fn margin(&self) -> f64 {
        2.0 * self.radius
    }

    /// Aggregation cell size in pixels.
    pub fn cell_size(&self) -> f64 {
        self.radius / 4.0
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::InvalidOption {
                name: "radius",
                value: self.radius.to_string(),
                reason: "must be a positive finite number".into(),
            });
        }
        if !(self.blur.is_finite() && self.blur >= 0.0) {
            return Err(Error::InvalidOption {
                name: "blur",
                value: self.blur.to_string(),
                reason: "must be a non-negative finite number".into(),
            });
        }
        if !(self.max.is_finite() && self.max > 0.0) {
            return Err(Error::InvalidOption {
                name: "max",
                value: self.max.to_string(),
                reason: "must be a positive finite number".into(),
            });
        }
        if self.decay_clamp_levels < 0.0 {
            return Err(Error::InvalidOption {
                name: "decay_clamp_levels",
                value: self.decay_clamp_levels.to_string(),
                reason: "must be non-negative".into(),
            });
        }
        if self.gradient.is_empty() {
            return Err(Error::InvalidOption {
                name: "gradient",
                value: "[]".into(),
                reason: "needs at least one stop".into(),
            });
        }
        Ok(())
    }
}
