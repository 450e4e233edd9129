// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover probing: pointer position to a tooltip reading.
//!
//! [`derive_hover`] is a pure function of the displayed frame and the pointer; callers recompute
//! it on every pointer event instead of keeping listener state.

use core::f64::consts::TAU;

use kurbo::{Point, Rect};
use peniko::Color;

use crate::frame::{ChartKind, GeometryFrame, PieGeometry, lerp};
use crate::projector::PIE_START_ANGLE;

/// Pointer x within this distance of a point reads that point exactly.
pub const SNAP_EPSILON: f64 = 1e-9;

/// What the tooltip shows.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverReading {
    /// Label of the nearest data point.
    pub label: String,
    /// Exact or interpolated value.
    pub value: f64,
    /// Where the marker goes.
    pub position: Point,
    /// Color of the nearest data point.
    pub color: Color,
    /// `true` when the reading is a data point's own value rather than an interpolation.
    pub exact: bool,
}

/// Hover overlay state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HoverState {
    /// Marker and tooltip hidden.
    #[default]
    Hidden,
    /// Marker and tooltip shown.
    Active(HoverReading),
}

impl HoverState {
    /// Returns `true` when the overlay is shown.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// The reading, if active.
    pub fn reading(&self) -> Option<&HoverReading> {
        match self {
            Self::Active(r) => Some(r),
            Self::Hidden => None,
        }
    }
}

/// Derives the hover state for `pointer` over `frame`.
///
/// Cartesian charts bracket the pointer between the two nearest points by x and interpolate
/// linearly; a pointer left of the first or right of the last point clamps to it. Pie charts
/// report the slice under the pointer. Pointers outside the plot, and empty frames, hide the
/// overlay.
pub fn derive_hover(frame: &GeometryFrame, pointer: Point) -> HoverState {
    if frame.is_empty() || !pointer.x.is_finite() || !pointer.y.is_finite() {
        return HoverState::Hidden;
    }
    let state = match (frame.kind, frame.pie) {
        (ChartKind::Pie, Some(pie)) => probe_pie(frame, pie, pointer),
        (ChartKind::Pie, None) => HoverState::Hidden,
        _ => probe_cartesian(frame, pointer),
    };
    tracing::trace!(x = pointer.x, y = pointer.y, active = state.is_active(), "hover");
    state
}

fn contains_inclusive(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

struct Candidate<'a> {
    at: Point,
    value: f64,
    label: &'a str,
    color: Color,
}

impl Candidate<'_> {
    fn exact(&self) -> HoverState {
        HoverState::Active(HoverReading {
            label: self.label.to_string(),
            value: self.value,
            position: self.at,
            color: self.color,
            exact: true,
        })
    }
}

fn probe_cartesian(frame: &GeometryFrame, pointer: Point) -> HoverState {
    if !contains_inclusive(frame.plot, pointer) {
        return HoverState::Hidden;
    }
    let px = pointer.x;

    let mut left: Option<Candidate<'_>> = None;
    let mut right: Option<Candidate<'_>> = None;
    for d in &frame.data {
        let Some(at) = d.geometry.anchor() else {
            continue;
        };
        let c = Candidate {
            at,
            value: d.value,
            label: &d.key,
            color: d.color,
        };
        if at.x <= px && left.as_ref().is_none_or(|l| at.x > l.at.x) {
            left = Some(c);
        } else if at.x >= px && right.as_ref().is_none_or(|r| at.x < r.at.x) {
            right = Some(c);
        }
    }

    match (left, right) {
        (Some(l), _) if (px - l.at.x).abs() <= SNAP_EPSILON => l.exact(),
        (_, Some(r)) if (r.at.x - px).abs() <= SNAP_EPSILON => r.exact(),
        (Some(l), Some(r)) => {
            let t = (px - l.at.x) / (r.at.x - l.at.x);
            let nearer = if t < 0.5 { &l } else { &r };
            HoverState::Active(HoverReading {
                label: nearer.label.to_string(),
                value: lerp(l.value, r.value, t),
                position: Point::new(px, lerp(l.at.y, r.at.y, t)),
                color: nearer.color,
                exact: false,
            })
        }
        (Some(only), None) | (None, Some(only)) => only.exact(),
        (None, None) => HoverState::Hidden,
    }
}

fn probe_pie(frame: &GeometryFrame, pie: PieGeometry, pointer: Point) -> HoverState {
    let offset = pointer - pie.center;
    let dist = offset.hypot();
    if dist > pie.outer_radius || dist < pie.inner_radius {
        return HoverState::Hidden;
    }
    let angle = normalize_angle(offset.atan2());

    frame
        .data
        .iter()
        .find_map(|d| match d.geometry {
            crate::frame::Geometry::Arc {
                start_angle,
                end_angle,
            } if end_angle > start_angle
                && angle >= normalize_angle(start_angle)
                && angle < normalize_angle(start_angle) + (end_angle - start_angle) =>
            {
                Some(HoverState::Active(HoverReading {
                    label: d.key.clone(),
                    value: d.value,
                    position: pointer,
                    color: d.color,
                    exact: true,
                }))
            }
            _ => None,
        })
        .unwrap_or_default()
}

/// Maps an angle into `[PIE_START_ANGLE, PIE_START_ANGLE + TAU)`.
fn normalize_angle(angle: f64) -> f64 {
    PIE_START_ANGLE + (angle - PIE_START_ANGLE).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::data::DataPoint;
    use crate::projector::{DatumProjector, Size};

    fn frame(kind: ChartKind, values: &[(&str, f64)]) -> GeometryFrame {
        let config = ChartConfig::default();
        let theme = config.resolve().unwrap();
        let points: Vec<_> = values.iter().map(|&(l, v)| DataPoint::new(l, v)).collect();
        DatumProjector::new(config, theme).project(kind, &points, Size::new(400.0, 200.0))
    }

    fn anchor_x(frame: &GeometryFrame, i: usize) -> f64 {
        frame.data[i].geometry.anchor().unwrap().x
    }

    #[test]
    fn midpoint_reads_the_mean() {
        let f = frame(ChartKind::Line, &[("mon", 10.0), ("tue", 30.0), ("wed", 5.0)]);
        let x = 0.5 * (anchor_x(&f, 0) + anchor_x(&f, 1));
        let y = f.plot.center().y;
        let reading = derive_hover(&f, Point::new(x, y));
        let r = reading.reading().expect("inside the plot");
        assert!((r.value - 20.0).abs() < 1e-9);
        assert!(!r.exact);
    }

    #[test]
    fn on_a_point_reads_it_exactly() {
        let f = frame(ChartKind::Line, &[("mon", 10.0), ("tue", 30.0), ("wed", 5.0)]);
        for (i, expected) in [(0, 10.0), (1, 30.0), (2, 5.0)] {
            let p = Point::new(anchor_x(&f, i), f.plot.center().y);
            let r = derive_hover(&f, p);
            let r = r.reading().unwrap();
            assert!(r.exact);
            assert_eq!(r.value, expected);
            assert_eq!(r.label, f.data[i].key);
        }
    }

    #[test]
    fn edges_clamp_to_boundary_points() {
        let f = frame(ChartKind::Lollipop, &[("a", 4.0), ("b", 8.0)]);
        let y = f.plot.center().y;
        let left = derive_hover(&f, Point::new(f.plot.x0, y));
        assert_eq!(left.reading().unwrap().value, 4.0);
        let right = derive_hover(&f, Point::new(f.plot.x1, y));
        assert_eq!(right.reading().unwrap().value, 8.0);
        assert_eq!(right.reading().unwrap().label, "b");
    }

    #[test]
    fn outside_or_empty_hides() {
        let f = frame(ChartKind::Line, &[("mon", 10.0)]);
        assert_eq!(derive_hover(&f, Point::new(-5.0, 50.0)), HoverState::Hidden);
        let empty = frame(ChartKind::Line, &[]);
        assert_eq!(
            derive_hover(&empty, empty.plot.center()),
            HoverState::Hidden
        );
    }

    #[test]
    fn pie_reports_the_slice_under_the_pointer() {
        let f = frame(ChartKind::Pie, &[("count", 10.0), ("succeeded", 7.0), ("failed", 3.0)]);
        let pie = f.pie.unwrap();
        // First slice runs clockwise from twelve o'clock over half the circle: the right half.
        let right = Point::new(pie.center.x + pie.outer_radius * 0.5, pie.center.y);
        assert_eq!(derive_hover(&f, right).reading().unwrap().label, "count");
        // Just left of twelve o'clock is the end of the last slice.
        let top_left = Point::new(pie.center.x - 1.0, pie.center.y - pie.outer_radius * 0.5);
        assert_eq!(derive_hover(&f, top_left).reading().unwrap().label, "failed");
        let outside = Point::new(pie.center.x, pie.center.y + pie.outer_radius + 1.0);
        assert!(!derive_hover(&f, outside).is_active());
    }
}
