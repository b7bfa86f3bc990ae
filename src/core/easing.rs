//! Easing curves for the smooth scroller.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, is non-decreasing, and fixes
//! both endpoints.  Inputs outside the unit interval are clamped.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Quadratic ease-in-out: `2t²` up to the midpoint, `1 - 2(1 - t)²` after.
    #[default]
    QuadInOut,
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = 1.0 - t;
                    1.0 - 2.0 * u * u
                }
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 1.0 - t;
                    1.0 - 4.0 * u * u * u
                }
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadInOut => "quad-in-out",
            Easing::CubicInOut => "cubic-in-out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 3] = [Easing::Linear, Easing::QuadInOut, Easing::CubicInOut];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{}", easing.label());
            assert_eq!(easing.apply(1.0), 1.0, "{}", easing.label());
        }
    }

    #[test]
    fn quad_in_out_matches_reference_points() {
        let e = Easing::QuadInOut;
        assert!((e.apply(0.25) - 0.125).abs() < 1e-12);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((e.apply(0.75) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn curves_are_non_decreasing() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=1000 {
                let v = easing.apply(i as f64 / 1000.0);
                assert!(v >= prev, "{} dipped at step {i}", easing.label());
                prev = v;
            }
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Easing::QuadInOut.apply(-3.0), 0.0);
        assert_eq!(Easing::QuadInOut.apply(7.0), 1.0);
        assert_eq!(Easing::Linear.apply(f64::NAN), 0.0);
    }
}
