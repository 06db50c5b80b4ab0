//! Gradient stops and multi-stop color interpolation.

use serde::{Deserialize, Serialize};

/// RGB color with channel values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const CYAN: Self = Self::new(0, 255, 255);
    pub const LIME: Self = Self::new(0, 255, 0);
    pub const YELLOW: Self = Self::new(255, 255, 0);
    pub const RED: Self = Self::new(255, 0, 0);
}

/// A gradient stop: position in [0, 1] mapped to a color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub t: f64,
    pub color: Rgb,
}

impl GradientStop {
    pub const fn new(t: f64, color: Rgb) -> Self {
        Self { t, color }
    }
}

/// The intensity gradient used when no stops are configured:
/// blue → cyan → lime → yellow → red.
pub const DEFAULT_STOPS: &[GradientStop] = &[
    GradientStop::new(0.4, Rgb::BLUE),
    GradientStop::new(0.6, Rgb::CYAN),
    GradientStop::new(0.7, Rgb::LIME),
    GradientStop::new(0.8, Rgb::YELLOW),
    GradientStop::new(1.0, Rgb::RED),
];

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp(c1.r as f64, c2.r as f64, t).round() as u8,
        lerp(c1.g as f64, c2.g as f64, t).round() as u8,
        lerp(c1.b as f64, c2.b as f64, t).round() as u8,
    )
}

/// Evaluate a stop list at normalized position `t`.
///
/// Canvas-gradient edge semantics: positions at or before the first stop
/// take the first stop's color, at or after the last stop the last's.
/// Stops must be sorted ascending by position and non-empty.
pub fn evaluate(stops: &[GradientStop], t: f64) -> Rgb {
    debug_assert!(!stops.is_empty());

    if t <= stops[0].t {
        return stops[0].color;
    }
    for i in 1..stops.len() {
        if t <= stops[i].t {
            let span = stops[i].t - stops[i - 1].t;
            if span <= 0.0 {
                return stops[i].color;
            }
            let ratio = (t - stops[i - 1].t) / span;
            return lerp_color(stops[i - 1].color, stops[i].color, ratio);
        }
    }
    stops[stops.len() - 1].color
}
