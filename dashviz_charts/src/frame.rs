// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry frames: the projected geometry of one data snapshot.

use core::f64::consts::TAU;

use kurbo::{Point, Rect};
use peniko::Color;

use crate::scale::ScaleLinear;

/// Chart families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Pie or donut (see [`crate::PieConfig::inner_radius_ratio`]).
    Pie,
    /// Stem + circle per category on a band scale.
    Lollipop,
    /// Rectangle per category on a band scale.
    Bar,
    /// Polyline through a point scale (time series).
    Line,
}

impl ChartKind {
    /// Whether the kind has x/y axes.
    pub fn is_cartesian(self) -> bool {
        !matches!(self, Self::Pie)
    }
}

/// Exact at both endpoints.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Per-datum geometry in scene coordinates.
///
/// Angles are in radians, measured clockwise from the positive x axis (y grows downward), as
/// `kurbo` expects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    /// A pie slice.
    Arc {
        /// Start angle.
        start_angle: f64,
        /// End angle.
        end_angle: f64,
    },
    /// A lollipop stem from `base` up to `tip` at `x`.
    Stem {
        /// Stem x.
        x: f64,
        /// Baseline y (value zero).
        base: f64,
        /// Tip y (the value).
        tip: f64,
    },
    /// A bar spanning `x..x + width` from `base` up to `top`.
    Bar {
        /// Left edge.
        x: f64,
        /// Band width.
        width: f64,
        /// Baseline y.
        base: f64,
        /// Top y.
        top: f64,
    },
    /// A line chart vertex.
    Vertex {
        /// Vertex x.
        x: f64,
        /// Vertex y.
        y: f64,
        /// Baseline y, used when entering or exiting.
        base: f64,
    },
}

impl Geometry {
    /// Linear interpolation towards `to`.
    ///
    /// Mismatched variants snap to `to`.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        match (*self, *to) {
            (
                Self::Arc {
                    start_angle: s0,
                    end_angle: e0,
                },
                Self::Arc {
                    start_angle: s1,
                    end_angle: e1,
                },
            ) => Self::Arc {
                start_angle: lerp(s0, s1, t),
                end_angle: lerp(e0, e1, t),
            },
            (
                Self::Stem {
                    x: x0,
                    base: b0,
                    tip: t0,
                },
                Self::Stem {
                    x: x1,
                    base: b1,
                    tip: t1,
                },
            ) => Self::Stem {
                x: lerp(x0, x1, t),
                base: lerp(b0, b1, t),
                tip: lerp(t0, t1, t),
            },
            (
                Self::Bar {
                    x: x0,
                    width: w0,
                    base: b0,
                    top: t0,
                },
                Self::Bar {
                    x: x1,
                    width: w1,
                    base: b1,
                    top: t1,
                },
            ) => Self::Bar {
                x: lerp(x0, x1, t),
                width: lerp(w0, w1, t),
                base: lerp(b0, b1, t),
                top: lerp(t0, t1, t),
            },
            (
                Self::Vertex {
                    x: x0,
                    y: y0,
                    base: b0,
                },
                Self::Vertex {
                    x: x1,
                    y: y1,
                    base: b1,
                },
            ) => Self::Vertex {
                x: lerp(x0, x1, t),
                y: lerp(y0, y1, t),
                base: lerp(b0, b1, t),
            },
            (_, to) => to,
        }
    }

    /// The zero-size form used as the start of an enter and the end of an exit.
    ///
    /// Slices collapse onto their start angle, stems and bars onto their baseline, vertices onto
    /// the baseline at the same x.
    pub fn collapsed(&self) -> Self {
        match *self {
            Self::Arc { start_angle, .. } => Self::Arc {
                start_angle,
                end_angle: start_angle,
            },
            Self::Stem { x, base, .. } => Self::Stem { x, base, tip: base },
            Self::Bar { x, width, base, .. } => Self::Bar {
                x,
                width,
                base,
                top: base,
            },
            Self::Vertex { x, base, .. } => Self::Vertex { x, y: base, base },
        }
    }

    /// The point a hover marker snaps to, for cartesian geometry.
    pub fn anchor(&self) -> Option<Point> {
        match *self {
            Self::Arc { .. } => None,
            Self::Stem { x, tip, .. } => Some(Point::new(x, tip)),
            Self::Bar { x, width, top, .. } => Some(Point::new(x + width * 0.5, top)),
            Self::Vertex { x, y, .. } => Some(Point::new(x, y)),
        }
    }

    /// Fraction of the full circle covered by an arc; `0` for other geometry.
    pub fn sweep_fraction(&self) -> f64 {
        match *self {
            Self::Arc {
                start_angle,
                end_angle,
            } => (end_angle - start_angle) / TAU,
            _ => 0.0,
        }
    }
}

/// One projected data point.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedDatum {
    /// Identity used for reconciliation (the category or date label).
    pub key: String,
    /// Sanitised value.
    pub value: f64,
    /// Category color.
    pub color: Color,
    /// Geometry.
    pub geometry: Geometry,
}

/// Pie placement within the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieGeometry {
    /// Center.
    pub center: Point,
    /// Outer radius.
    pub outer_radius: f64,
    /// Inner radius (`0` for a pie).
    pub inner_radius: f64,
}

/// The geometry of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryFrame {
    /// Chart family.
    pub kind: ChartKind,
    /// Plot rectangle in scene coordinates.
    pub plot: Rect,
    /// Data in input order (exiting data, during a transition, follow the target data).
    pub data: Vec<ProjectedDatum>,
    /// Value shown in the pie center, if any.
    pub headline: Option<f64>,
    /// Value axis, for cartesian kinds with data.
    pub value_scale: Option<ScaleLinear>,
    /// Pie placement, for pie frames.
    pub pie: Option<PieGeometry>,
}

impl GeometryFrame {
    /// A frame with nothing to draw.
    pub fn empty(kind: ChartKind, plot: Rect) -> Self {
        Self {
            kind,
            plot,
            data: Vec::new(),
            headline: None,
            value_scale: None,
            pie: None,
        }
    }

    /// Returns `true` if the frame has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Looks up a datum by key.
    pub fn get(&self, key: &str) -> Option<&ProjectedDatum> {
        self.data.iter().find(|d| d.key == key)
    }

    /// Slice fractions in data order (pie frames).
    pub fn fractions(&self) -> Vec<f64> {
        self.data.iter().map(|d| d.geometry.sweep_fraction()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_then_lerp_reaches_target() {
        let target = Geometry::Stem {
            x: 10.0,
            base: 100.0,
            tip: 20.0,
        };
        let start = target.collapsed();
        assert_eq!(
            start,
            Geometry::Stem {
                x: 10.0,
                base: 100.0,
                tip: 100.0
            }
        );
        assert_eq!(start.lerp(&target, 1.0), target);
        let Geometry::Stem { tip, .. } = start.lerp(&target, 0.5) else {
            panic!("stem lerps to a stem");
        };
        assert_eq!(tip, 60.0);
    }

    #[test]
    fn mismatched_variants_snap() {
        let a = Geometry::Arc {
            start_angle: 0.0,
            end_angle: 1.0,
        };
        let b = Geometry::Vertex {
            x: 1.0,
            y: 2.0,
            base: 3.0,
        };
        assert_eq!(a.lerp(&b, 0.1), b);
        assert_eq!(a.anchor(), None);
        assert_eq!(b.anchor(), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn collapsed_arc_has_no_sweep() {
        let a = Geometry::Arc {
            start_angle: 1.0,
            end_angle: 2.0,
        };
        assert_eq!(a.collapsed().sweep_fraction(), 0.0);
        assert!((a.sweep_fraction() - 1.0 / TAU).abs() < 1e-12);
    }
}
