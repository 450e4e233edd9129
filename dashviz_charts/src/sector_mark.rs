// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sector (arc) mark generation.
//!
//! Pie and donut slices are modelled by start/end angles and inner/outer radii.

use dashviz_core::{Mark, MarkId};
use kurbo::{BezPath, Circle, Point, Shape};
use peniko::Brush;

use crate::axis::StrokeStyle;

/// A sector (arc slice), suitable for pie/donut charts.
///
/// Angles are in radians, clockwise from the positive x axis.
#[derive(Clone, Debug)]
pub struct SectorMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Center in scene coordinates.
    pub center: Point,
    /// Inner radius in scene coordinates (0 for a pie slice).
    pub inner_radius: f64,
    /// Outer radius in scene coordinates.
    pub outer_radius: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Fill paint for the sector.
    pub fill: Brush,
    /// Optional outline stroke.
    pub stroke: Option<StrokeStyle>,
    /// Curve flattening tolerance when converting the sector to a `BezPath`.
    pub tolerance: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

impl SectorMarkSpec {
    /// Creates a new sector mark spec.
    pub fn new(
        id: MarkId,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        Self {
            id,
            center,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            fill: Brush::default(),
            stroke: None,
            tolerance: 0.1,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the outline stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// The sector outline.
    ///
    /// A zero sweep or zero radius yields an empty path rather than a degenerate sliver.
    pub fn path(&self) -> BezPath {
        let sweep = self.end_angle - self.start_angle;
        if sweep.abs() <= f64::EPSILON || self.outer_radius <= 0.0 {
            return BezPath::new();
        }
        let circle = Circle::new(self.center, self.outer_radius);
        let segment = circle.segment(self.inner_radius, self.start_angle, sweep);
        segment.path_elements(self.tolerance).collect()
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let builder = Mark::builder(self.id)
            .z_index(self.z_index)
            .path(self.path())
            .fill(self.fill.clone());
        let builder = match &self.stroke {
            Some(stroke) => builder.stroke(stroke.brush.clone(), stroke.stroke_width),
            None => builder,
        };
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use dashviz_core::{MarkDiff, MarkKind, MarkPayload, Scene};
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn sector_emits_a_path_mark_with_bounds() {
        let sector = SectorMarkSpec::new(
            MarkId::from_raw(1),
            Point::new(50.0, 50.0),
            10.0,
            20.0,
            0.0,
            core::f64::consts::FRAC_PI_2,
        )
        .with_fill(css::TOMATO)
        .with_stroke(StrokeStyle::solid(css::WHITE, 2.0));

        let mut scene = Scene::new();
        let diffs = scene.tick(vec![sector.mark()]);
        let [
            MarkDiff::Enter {
                id,
                kind,
                new,
                bounds,
                ..
            },
        ] = &diffs[..]
        else {
            panic!("expected a single enter diff");
        };
        assert_eq!(*id, MarkId::from_raw(1));
        assert_eq!(*kind, MarkKind::Path);
        let bounds = bounds.expect("non-empty sector has bounds");
        assert!(bounds.x0 >= 49.9 && bounds.y0 >= 49.9);
        assert!(bounds.x1 <= 70.1 && bounds.y1 <= 70.1);

        let MarkPayload::Path(p) = &**new else {
            panic!("expected path payload");
        };
        assert_eq!(p.fill, css::TOMATO.into());
        assert_eq!(p.stroke_width, 2.0);
    }

    #[test]
    fn zero_sweep_is_empty() {
        let sector = SectorMarkSpec::new(MarkId::from_raw(1), Point::ZERO, 0.0, 10.0, 1.0, 1.0);
        assert!(sector.path().elements().is_empty());
        let MarkPayload::Path(p) = sector.mark().payload else {
            panic!("expected path payload");
        };
        assert_eq!(p.stroke_width, 0.0);
    }

    #[test]
    fn full_sweep_covers_the_disc() {
        let sector = SectorMarkSpec::new(
            MarkId::from_raw(1),
            Point::new(0.0, 0.0),
            0.0,
            10.0,
            -core::f64::consts::FRAC_PI_2,
            -core::f64::consts::FRAC_PI_2 + core::f64::consts::TAU,
        );
        let b = sector.path().bounding_box();
        assert!((b.width() - 20.0).abs() < 0.5);
        assert!((b.height() - 20.0).abs() < 0.5);
    }
}
