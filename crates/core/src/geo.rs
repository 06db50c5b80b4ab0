//! Geographic coordinates and bounds

use serde::{Deserialize, Serialize};

/// A WGS-84 geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A rectangular geographic region spanned by two corners.
///
/// Corners may be given in any order; the constructor normalizes to
/// south-west / north-east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// Whether the coordinate lies inside the bounds (edges inclusive).
    pub fn contains(&self, pos: LatLng) -> bool {
        pos.lat >= self.south_west.lat
            && pos.lat <= self.north_east.lat
            && pos.lng >= self.south_west.lng
            && pos.lng <= self.north_east.lng
    }
}
