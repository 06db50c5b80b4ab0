//! Theoretical variogram models.
//!
//! The semivariance γ(h) measures spatial dissimilarity as a function of
//! separation distance h. The pipeline supplies nugget and range; the sill
//! is estimated from the training values at fit time.
//!
//! Reference:
//! Matheron, G. (1963). Principles of geostatistics. Economic Geology.
//! Cressie, N. (1993). Statistics for Spatial Data. Wiley.

use heatfield_core::{ModelParams, VariogramKind};

/// A variogram model with concrete parameters, evaluable at any lag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variogram {
    pub kind: VariogramKind,
    /// Semivariance as h → 0 (measurement error + micro-scale variation).
    pub nugget: f64,
    /// Sill minus nugget.
    pub partial_sill: f64,
    /// Distance at which semivariance reaches ~95% of the sill.
    pub range: f64,
}

impl Variogram {
    /// Build from pipeline-supplied parameters plus a data-derived sill.
    pub fn from_params(params: &ModelParams, sill: f64) -> Self {
        Self {
            kind: params.kind,
            nugget: params.nugget,
            partial_sill: (sill - params.nugget).max(0.0),
            range: params.range,
        }
    }

    /// Evaluate the model at lag distance `h`.
    ///
    /// γ(0) = 0 by convention; the nugget applies for any h > 0.
    pub fn evaluate(&self, h: f64) -> f64 {
        if h < 1e-15 {
            return 0.0;
        }

        let c0 = self.nugget;
        let c = self.partial_sill;
        let a = self.range;

        match self.kind {
            VariogramKind::Spherical => {
                if h >= a {
                    c0 + c
                } else {
                    let hr = h / a;
                    c0 + c * (1.5 * hr - 0.5 * hr * hr * hr)
                }
            }
            VariogramKind::Exponential => c0 + c * (1.0 - (-3.0 * h / a).exp()),
            VariogramKind::Gaussian => c0 + c * (1.0 - (-3.0 * h * h / (a * a)).exp()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model(kind: VariogramKind) -> Variogram {
        Variogram {
            kind,
            nugget: 1.0,
            partial_sill: 9.0,
            range: 50.0,
        }
    }

    #[test]
    fn zero_lag_is_zero() {
        for kind in [
            VariogramKind::Spherical,
            VariogramKind::Exponential,
            VariogramKind::Gaussian,
        ] {
            assert_eq!(model(kind).evaluate(0.0), 0.0);
        }
    }

    #[test]
    fn spherical_reaches_sill_at_range() {
        let v = model(VariogramKind::Spherical);
        assert_relative_eq!(v.evaluate(50.0), 10.0, epsilon = 1e-12);
        assert_relative_eq!(v.evaluate(200.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn exponential_near_sill_at_range() {
        let v = model(VariogramKind::Exponential);
        let at_range = v.evaluate(50.0);
        assert!(at_range > 9.0 && at_range < 10.0, "got {at_range}");
    }

    #[test]
    fn semivariance_increases_with_lag() {
        let v = model(VariogramKind::Gaussian);
        assert!(v.evaluate(10.0) < v.evaluate(20.0));
        assert!(v.evaluate(20.0) < v.evaluate(40.0));
    }

    #[test]
    fn from_params_clamps_negative_partial_sill() {
        let params = ModelParams {
            nugget: 5.0,
            ..Default::default()
        };
        let v = Variogram::from_params(&params, 2.0);
        assert_eq!(v.partial_sill, 0.0);
    }
}
