//! Geotagged scalar readings

use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::LatLng;

/// A geotagged scalar reading, e.g. a radiation level measurement.
///
/// The value defaults to `1.0` when absent or non-finite, so bare
/// coordinate lists render as a plain density heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub lat: f64,
    pub lng: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            value: 1.0,
        }
    }

    pub fn with_value(lat: f64, lng: f64, value: f64) -> Self {
        Self { lat, lng, value }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// The reading, with non-finite values coerced to the default of 1.0.
    pub fn intensity(&self) -> f64 {
        if self.value.is_finite() {
            self.value
        } else {
            1.0
        }
    }
}

impl From<LatLng> for Sample {
    fn from(pos: LatLng) -> Self {
        Sample::new(pos.lat, pos.lng)
    }
}

// Accepts `[lat, lng]`, `[lat, lng, value]`, or the struct form with an
// optional `value` field.
impl<'de> Deserialize<'de> for Sample {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Triple(f64, f64, f64),
            Pair(f64, f64),
            Struct {
                lat: f64,
                lng: f64,
                #[serde(default)]
                value: Option<f64>,
            },
        }

        let sample = match Repr::deserialize(deserializer)? {
            Repr::Triple(lat, lng, value) => Sample::with_value(lat, lng, value),
            Repr::Pair(lat, lng) => Sample::new(lat, lng),
            Repr::Struct { lat, lng, value } => {
                Sample::with_value(lat, lng, value.unwrap_or(1.0))
            }
        };
        Ok(sample)
    }
}
