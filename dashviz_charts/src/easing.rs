// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves for transitions.

use serde::{Deserialize, Serialize};

/// An easing curve mapping normalized time `t ∈ [0, 1]` to progress `∈ [0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Exponential ease-out (d3 `easeExpOut`): fast start, long deceleration.
    #[default]
    ExpOut,
    /// Cubic ease-in-out (d3 `easeCubicInOut`).
    CubicInOut,
}

impl Easing {
    /// Evaluates the curve.
    ///
    /// Input is clamped to `[0, 1]`; the endpoints map exactly to `0` and `1`.
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::ExpOut => 1.0 - tpmt(t),
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

// 2^(-10t), rescaled so that it hits exactly 1 at t = 0 and 0 at t = 1.
fn tpmt(x: f64) -> f64 {
    (2_f64.powf(-10.0 * x) - 0.000_976_562_5) * 1.000_977_517_106_549_4
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 3] = [Easing::Linear, Easing::ExpOut, Easing::CubicInOut];

    #[test]
    fn endpoints_are_exact() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?}");
            assert_eq!(e.apply(1.0), 1.0, "{e:?}");
            assert_eq!(e.apply(-1.0), 0.0, "{e:?}");
            assert_eq!(e.apply(3.0), 1.0, "{e:?}");
            assert_eq!(e.apply(f64::NAN), 0.0, "{e:?}");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for e in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = e.apply(f64::from(i) / 100.0);
                assert!(v >= prev, "{e:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn exp_out_decelerates() {
        let e = Easing::ExpOut;
        assert!(e.apply(0.25) > 0.8, "most of the distance is covered early");
        assert!(e.apply(0.5) - e.apply(0.25) > e.apply(0.75) - e.apply(0.5));
        assert!((Easing::CubicInOut.apply(0.5) - 0.5).abs() < 1e-12);
    }
}
