//! The heatmap overlay facade.
//!
//! Owns the samples, configuration, precomputed stamp and ramp, the redraw
//! scheduler, and the single live model slot. Hosts drive it through the
//! observer surface (`viewport_changed`, `transform_animating`) and a
//! frame pump (`on_frame`).

use std::time::Instant;

use tracing::debug;

use heatfield_colormap::ColorRamp;
use heatfield_core::{Estimator, LatLng, MapTransform, PixelBuffer, Result, Sample};
use heatfield_kriging::KrigingEstimator;

use crate::compositor;
use crate::grid::{decay_factor, GridAggregator};
use crate::options::HeatmapOptions;
use crate::projector::project_visible;
use crate::scheduler::RedrawScheduler;
use crate::stamp::CircleStamp;

/// An interpolated heatmap layer over a host map.
///
/// One pipeline run per pumped frame: project visible samples, aggregate
/// into grid points, train the estimator, stamp coverage and colorize.
/// The latest completed raster and fitted model are retained; both are
/// replaced wholesale by the next run.
pub struct HeatmapOverlay<E: Estimator = KrigingEstimator> {
    options: HeatmapOptions,
    samples: Vec<Sample>,
    estimator: E,
    stamp: CircleStamp,
    ramp: ColorRamp,
    scheduler: RedrawScheduler,
    /// Single-slot model cache for point queries; `None` until the first
    /// successful training and after any fallback render.
    model: Option<E::Model>,
    raster: Option<PixelBuffer>,
}

impl HeatmapOverlay<KrigingEstimator> {
    /// Overlay with the default kriging estimator.
    pub fn new(options: HeatmapOptions) -> Result<Self> {
        Self::with_estimator(options, KrigingEstimator)
    }
}

impl<E: Estimator> HeatmapOverlay<E> {
    pub fn with_estimator(options: HeatmapOptions, estimator: E) -> Result<Self> {
        options.validate()?;
        let stamp = CircleStamp::new(options.radius, options.blur);
        let ramp = ColorRamp::from_stops(&options.gradient);
        Ok(Self {
            options,
            samples: Vec::new(),
            estimator,
            stamp,
            ramp,
            scheduler: RedrawScheduler::new(),
            model: None,
            raster: None,
        })
    }

    pub fn options(&self) -> &HeatmapOptions {
        &self.options
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Replace the sample collection and request a redraw.
    pub fn set_samples(&mut self, samples: Vec<Sample>) {
        self.samples = samples;
        self.request_redraw();
    }

    /// Append one sample and request a redraw.
    pub fn add_sample(&mut self, sample: Sample) {
        self.samples.push(sample);
        self.request_redraw();
    }

    /// Replace the configuration, rebuilding the stamp and ramp only when
    /// their inputs changed, and request a redraw.
    pub fn set_options(&mut self, options: HeatmapOptions) -> Result<()> {
        options.validate()?;
        if options.radius != self.options.radius || options.blur != self.options.blur {
            self.stamp = CircleStamp::new(options.radius, options.blur);
        }
        if options.gradient != self.options.gradient {
            self.ramp = ColorRamp::from_stops(&options.gradient);
        }
        self.options = options;
        self.request_redraw();
        Ok(())
    }

    /// Enqueue at most one pipeline execution.
    pub fn request_redraw(&mut self) {
        self.scheduler.request();
    }

    /// Observer hook: the host viewport moved or resized.
    pub fn viewport_changed(&mut self) {
        self.request_redraw();
    }

    /// Observer hook: a host transform animation started or ended.
    pub fn transform_animating(&mut self, animating: bool) {
        self.scheduler.set_animating(animating);
    }

    /// Latest completed frame, if any.
    pub fn raster(&self) -> Option<&PixelBuffer> {
        self.raster.as_ref()
    }

    /// Interpolated value at a geographic coordinate, against the live
    /// model. `None` when no model is available — before the first
    /// successful redraw, or after a degraded (fallback) frame.
    pub fn point_query<V: MapTransform>(&self, view: &V, pos: LatLng) -> Option<f64> {
        let model = self.model.as_ref()?;
        let (x, y) = view.project(pos);
        Some(self.estimator.predict(x, y, model))
    }

    /// Pump the scheduler: run the pipeline if a frame is pending.
    ///
    /// Returns the freshly rendered raster, or `Ok(None)` when idle or
    /// mid-animation. A zero-area viewport is fatal for the frame.
    pub fn on_frame<V: MapTransform>(&mut self, view: &V) -> Result<Option<&PixelBuffer>>
    where
        E: Sync,
        E::Model: Sync,
    {
        if !self.scheduler.take_frame() {
            return Ok(None);
        }
        self.redraw(view)?;
        Ok(self.raster.as_ref())
    }

    fn redraw<V: MapTransform>(&mut self, view: &V) -> Result<()>
    where
        E: Sync,
        E::Model: Sync,
    {
        let start = Instant::now();
        let (width, height) = view.size();
        let mut buf = PixelBuffer::new(width, height)?;

        let points = project_visible(&self.samples, view, self.options.margin());
        let decay = decay_factor(
            view.zoom(),
            self.options.max_zoom,
            self.options.decay_clamp_levels,
        );
        let mut grid = GridAggregator::new(self.options.cell_size(), view.pane_offset(), decay);
        for p in &points {
            grid.insert(p);
        }
        let training = grid.into_training_set();
        debug!(
            samples = self.samples.len(),
            visible = points.len(),
            grid_points = training.len(),
            decay,
            "aggregated viewport samples"
        );

        compositor::stamp_coverage(&mut buf, &self.stamp, &training);

        match self.estimator.train(&training, &self.options.model) {
            Ok(model) => {
                compositor::colorize(&mut buf, &self.estimator, &model, &self.ramp, self.options.max);
                self.model = Some(model);
            }
            Err(err) => {
                debug!(%err, "estimator failed, rendering mean-value fallback");
                compositor::render_fallback(&mut buf, &self.ramp, &training, self.options.max);
                self.model = None;
            }
        }

        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            covered = buf.covered_pixels(),
            "redraw complete"
        );
        self.raster = Some(buf);
        Ok(())
    }
}
