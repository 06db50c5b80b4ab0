//! # Heatfield Render
//!
//! The heatmap pipeline: viewport projection, zoom-decayed grid
//! aggregation, coverage stamping, per-pixel interpolation through an
//! [`Estimator`](heatfield_core::Estimator), and redraw coalescing.
//!
//! Data flow per frame:
//!
//! ```text
//! samples -> project_visible -> GridAggregator -> Estimator::train
//!         -> stamp_coverage -> colorize (predict per covered pixel)
//!         -> PixelBuffer
//! ```
//!
//! [`HeatmapOverlay`] ties the stages together behind the host-facing
//! observer surface; [`RedrawScheduler`] guarantees at most one queued
//! execution.

pub mod compositor;
pub mod grid;
pub mod maybe_rayon;
pub mod options;
pub mod overlay;
pub mod projector;
pub mod scheduler;
pub mod stamp;

pub use compositor::TRANSLUCENCY;
pub use grid::{decay_factor, GridAggregator};
pub use options::{HeatmapOptions, DECAY_CLAMP_LEVELS};
pub use overlay::HeatmapOverlay;
pub use projector::{project_visible, ProjectedPoint};
pub use scheduler::{RedrawScheduler, RedrawState};
pub use stamp::CircleStamp;
