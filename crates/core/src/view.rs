//! The host-map seam: viewport state and pixel projection.
//!
//! The renderer never owns a map. It reads the current transform through
//! [`MapTransform`], which a host (slippy-map widget, test harness, CLI)
//! implements. [`MercatorView`] is the concrete implementation shipped for
//! headless rendering.

use crate::geo::{LatLng, LatLngBounds};

/// Read-only view of the host map's current transform.
///
/// Coordinates returned by [`project`](MapTransform::project) are container
/// pixels: `(0, 0)` is the top-left of the visible viewport, x grows east
/// and y grows south.
pub trait MapTransform {
    /// Viewport size in pixels.
    fn size(&self) -> (u32, u32);

    /// Current zoom level (fractional zooms allowed).
    fn zoom(&self) -> f64;

    /// Geographic coordinate to container-pixel coordinates.
    fn project(&self, pos: LatLng) -> (f64, f64);

    /// Container-pixel coordinates to geographic coordinate.
    fn unproject(&self, x: f64, y: f64) -> LatLng;

    /// Accumulated pane translation in pixels since the host last reset its
    /// origin. Anchors the aggregation grid so cell boundaries stay fixed
    /// under whole-pixel panning.
    fn pane_offset(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    /// Geographic bounds of the viewport expanded by `margin` pixels on
    /// every side.
    fn expanded_bounds(&self, margin: f64) -> LatLngBounds {
        let (w, h) = self.size();
        let a = self.unproject(-margin, -margin);
        let b = self.unproject(w as f64 + margin, h as f64 + margin);
        LatLngBounds::new(a, b)
    }
}

const TILE_SIZE: f64 = 256.0;

/// Spherical Web-Mercator view: center, zoom and viewport size.
///
/// World size at zoom `z` is `256 * 2^z` pixels; latitudes are clamped to
/// the projection's ±85.05° limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorView {
    center: LatLng,
    zoom: f64,
    width: u32,
    height: u32,
    pane_offset: (f64, f64),
}

impl MercatorView {
    pub fn new(center: LatLng, zoom: f64, width: u32, height: u32) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
            pane_offset: (0.0, 0.0),
        }
    }

    /// Simulate a pan by `(dx, dy)` pixels of pane translation.
    pub fn with_pane_offset(mut self, dx: f64, dy: f64) -> Self {
        self.pane_offset = (dx, dy);
        self
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }

    /// Geographic coordinate to global mercator pixels at the current zoom.
    fn project_global(&self, pos: LatLng) -> (f64, f64) {
        let world = self.world_size();
        let lat = pos.lat.clamp(-85.051_128_78, 85.051_128_78);
        let x = (pos.lng + 180.0) / 360.0 * world;
        let phi = lat.to_radians();
        let y = (1.0 - (phi.tan() + 1.0 / phi.cos()).ln() / std::f64::consts::PI) / 2.0 * world;
        (x, y)
    }

    /// Global pixel coordinates of the viewport's top-left corner.
    fn origin(&self) -> (f64, f64) {
        let (cx, cy) = self.project_global(self.center);
        (
            cx - self.width as f64 / 2.0,
            cy - self.height as f64 / 2.0,
        )
    }
}

impl MapTransform for MercatorView {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn project(&self, pos: LatLng) -> (f64, f64) {
        let (gx, gy) = self.project_global(pos);
        let (ox, oy) = self.origin();
        (gx - ox, gy - oy)
    }

    fn unproject(&self, x: f64, y: f64) -> LatLng {
        let world = self.world_size();
        let (ox, oy) = self.origin();
        let gx = x + ox;
        let gy = y + oy;
        let lng = gx / world * 360.0 - 180.0;
        let n = std::f64::consts::PI * (1.0 - 2.0 * gy / world);
        let lat = n.sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    fn pane_offset(&self) -> (f64, f64) {
        self.pane_offset
    }
}
