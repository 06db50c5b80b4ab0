//! Raster compositing: coverage stamping, per-pixel interpolation, and the
//! degraded mean-value pass.

use heatfield_colormap::ColorRamp;
use heatfield_core::{Estimator, PixelBuffer, TrainingSet};

use crate::maybe_rayon::*;
use crate::stamp::CircleStamp;

/// Alpha multiplier applied to interpolated pixels.
pub const TRANSLUCENCY: f64 = 0.8;

/// Coverage pass: stamp the circle mask at every emitted grid point.
///
/// Defines the covered-pixel set — the only pixels the interpolation pass
/// will touch, which bounds estimator calls to the area near actual
/// samples.
pub fn stamp_coverage(buf: &mut PixelBuffer, stamp: &CircleStamp, training: &TrainingSet) {
    for i in 0..training.len() {
        stamp.paint(buf, training.xs[i], training.ys[i]);
    }
}

/// Interpolation pass: for every covered pixel, query the model and write
/// the ramp color with the coverage alpha scaled by [`TRANSLUCENCY`].
///
/// Uncovered pixels stay fully transparent. Row-parallel when the
/// `parallel` feature is on.
pub fn colorize<E>(
    buf: &mut PixelBuffer,
    estimator: &E,
    model: &E::Model,
    ramp: &ColorRamp,
    max: f64,
) where
    E: Estimator + Sync,
    E::Model: Sync,
{
    let width = buf.width();
    let height = buf.height();
    let coverage: &PixelBuffer = buf;

    let out: Vec<u8> = (0..height)
        .into_par_iter()
        .flat_map(|y| {
            let mut row = vec![0u8; width * 4];
            for x in 0..width {
                let a = coverage.alpha(x, y);
                if a == 0 {
                    continue;
                }
                let predicted = estimator.predict(x as f64, y as f64, model);
                let [r, g, b, _] = ramp.color_for(predicted, max);
                let o = x * 4;
                row[o] = r;
                row[o + 1] = g;
                row[o + 2] = b;
                row[o + 3] = (a as f64 * TRANSLUCENCY).round() as u8;
            }
            row
        })
        .collect();

    buf.data_mut().copy_from_slice(&out);
}

/// Degraded pass for estimator failure: paint every covered pixel with the
/// single color of the mean training value, keeping the full coverage
/// alpha (no translucency discount — the visual cue of a non-interpolated
/// render).
///
/// Never fails; an empty training set leaves the buffer untouched.
pub fn render_fallback(buf: &mut PixelBuffer, ramp: &ColorRamp, training: &TrainingSet, max: f64) {
    let Some(mean) = training.mean_value() else {
        return;
    };
    let [r, g, b, _] = ramp.color_for(mean, max);
    for px in buf.data_mut().chunks_exact_mut(4) {
        if px[3] > 0 {
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatfield_core::{EstimationError, ModelParams};

    /// Estimator test double: constant prediction or forced failure.
    struct Fixed {
        value: f64,
        fail: bool,
    }

    impl Estimator for Fixed {
        type Model = f64;

        fn train(
            &self,
            _training: &TrainingSet,
            _params: &ModelParams,
        ) -> Result<f64, EstimationError> {
            if self.fail {
                Err(EstimationError::SingularSystem)
            } else {
                Ok(self.value)
            }
        }

        fn predict(&self, _x: f64, _y: f64, model: &f64) -> f64 {
            *model
        }
    }

    fn one_point_training(x: f64, y: f64, value: f64) -> TrainingSet {
        let mut t = TrainingSet::default();
        t.push(value, x, y);
        t
    }

    #[test]
    fn coverage_is_union_of_footprints() {
        let stamp = CircleStamp::new(4.0, 2.0);
        let mut buf = PixelBuffer::new(64, 32).unwrap();
        let mut training = TrainingSet::default();
        training.push(1.0, 12.0, 16.0);
        training.push(1.0, 44.0, 16.0);
        stamp_coverage(&mut buf, &stamp, &training);

        let centers = [(12.0_f64, 16.0_f64), (44.0, 16.0)];
        for y in 0..32 {
            for x in 0..64 {
                let covered = buf.alpha(x, y) > 0;
                // Conservative membership: strictly inside some footprint
                // must be covered; strictly outside every footprint must
                // not be.
                let d_min = centers
                    .iter()
                    .map(|&(cx, cy)| {
                        let dx = x as f64 + 0.5 - cx;
                        let dy = y as f64 + 0.5 - cy;
                        (dx * dx + dy * dy).sqrt()
                    })
                    .fold(f64::INFINITY, f64::min);
                if d_min < stamp.radius() {
                    assert!(covered, "({x},{y}) inside a footprint but uncovered");
                }
                if d_min > stamp.extent() + 1.0 {
                    assert!(!covered, "({x},{y}) outside all footprints but covered");
                }
            }
        }
    }

    #[test]
    fn colorize_writes_ramp_color_with_translucency() {
        let est = Fixed {
            value: 10.0,
            fail: false,
        };
        let model = est.train(&TrainingSet::default(), &ModelParams::default()).unwrap();
        let stamp = CircleStamp::new(4.0, 0.0);
        let ramp = ColorRamp::default();
        let mut buf = PixelBuffer::new(32, 32).unwrap();
        stamp_coverage(&mut buf, &stamp, &one_point_training(16.0, 16.0, 10.0));

        colorize(&mut buf, &est, &model, &ramp, 10.0);

        // Prediction equals max -> ramp index 255 -> red; 255 * 0.8 = 204.
        assert_eq!(buf.pixel(16, 16).unwrap(), [255, 0, 0, 204]);
        // Uncovered pixel untouched.
        assert_eq!(buf.pixel(0, 0).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn colorize_clamps_index_low_and_high() {
        let stamp = CircleStamp::new(2.0, 0.0);
        let ramp = ColorRamp::default();

        let est = Fixed {
            value: -3.0,
            fail: false,
        };
        let mut buf = PixelBuffer::new(16, 16).unwrap();
        stamp_coverage(&mut buf, &stamp, &one_point_training(8.0, 8.0, 1.0));
        colorize(&mut buf, &est, &est.train(&TrainingSet::default(), &ModelParams::default()).unwrap(), &ramp, 1.0);
        // Negative prediction -> index 0 -> blue.
        let [r, g, b, _] = buf.pixel(8, 8).unwrap();
        assert_eq!([r, g, b], [0, 0, 255]);

        let est = Fixed {
            value: 50.0,
            fail: false,
        };
        let mut buf = PixelBuffer::new(16, 16).unwrap();
        stamp_coverage(&mut buf, &stamp, &one_point_training(8.0, 8.0, 1.0));
        colorize(&mut buf, &est, &est.train(&TrainingSet::default(), &ModelParams::default()).unwrap(), &ramp, 1.0);
        // Prediction far above max -> index 255 -> red.
        let [r, g, b, _] = buf.pixel(8, 8).unwrap();
        assert_eq!([r, g, b], [255, 0, 0]);
    }

    #[test]
    fn fallback_paints_uniform_color_at_coverage_alpha() {
        let stamp = CircleStamp::new(4.0, 2.0);
        let ramp = ColorRamp::default();
        let mut buf = PixelBuffer::new(32, 32).unwrap();
        let mut training = TrainingSet::default();
        training.push(10.0, 10.0, 16.0);
        training.push(10.0, 22.0, 16.0);
        stamp_coverage(&mut buf, &stamp, &training);
        let coverage_before: Vec<u8> = buf.data().iter().skip(3).step_by(4).copied().collect();

        render_fallback(&mut buf, &ramp, &training, 10.0);

        let expected = ramp.entry(255);
        for y in 0..32 {
            for x in 0..32 {
                let [r, g, b, a] = buf.pixel(x, y).unwrap();
                // Alpha is exactly the coverage alpha: no 0.8 discount.
                assert_eq!(a, coverage_before[y * 32 + x]);
                if a > 0 {
                    assert_eq!([r, g, b], [expected[0], expected[1], expected[2]]);
                } else {
                    assert_eq!([r, g, b], [0, 0, 0]);
                }
            }
        }
        // Stamp cores render fully opaque.
        assert_eq!(buf.alpha(10, 16), 255);
    }

    #[test]
    fn fallback_with_empty_training_set_is_a_no_op() {
        let ramp = ColorRamp::default();
        let mut buf = PixelBuffer::new(8, 8).unwrap();
        render_fallback(&mut buf, &ramp, &TrainingSet::default(), 1.0);
        assert_eq!(buf.covered_pixels(), 0);
    }
}
