//! Viewport projection: samples to screen space.

use heatfield_core::{MapTransform, Sample};

/// A sample projected into container-pixel space for one redraw.
///
/// Ephemeral: recomputed on every pass, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Project the samples visible within the viewport expanded by `margin`
/// pixels on every side.
///
/// Samples outside the expanded bounds are dropped for this redraw only.
/// Empty input yields empty output.
pub fn project_visible<V: MapTransform>(
    samples: &[Sample],
    view: &V,
    margin: f64,
) -> Vec<ProjectedPoint> {
    let bounds = view.expanded_bounds(margin);
    samples
        .iter()
        .filter(|s| bounds.contains(s.position()))
        .map(|s| {
            let (x, y) = view.project(s.position());
            ProjectedPoint {
                x,
                y,
                value: s.intensity(),
            }
        })
        .collect()
}
