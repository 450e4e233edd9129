// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polyline mark generation (series lines, leader lines).

use dashviz_core::{Mark, MarkId};
use kurbo::{BezPath, Point};

use crate::axis::StrokeStyle;

/// An unfilled polyline through a sequence of points.
///
/// This generates a single [`dashviz_core::MarkKind::Path`] mark.
#[derive(Clone, Debug)]
pub struct LineMarkSpec {
    /// Stable-id for the mark emitted by this spec.
    pub id: MarkId,
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Stroke style for the line.
    pub stroke: StrokeStyle,
    /// Rendering order hint.
    pub z_index: i32,
}

impl LineMarkSpec {
    /// Creates a line mark spec with a black stroke at width 1.
    pub fn new(id: MarkId, points: Vec<Point>) -> Self {
        Self {
            id,
            points,
            stroke: StrokeStyle::default(),
            z_index: crate::z_order::SERIES_STROKE,
        }
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// The polyline path; empty when there are no points.
    pub fn path(&self) -> BezPath {
        let mut p = BezPath::new();
        for (i, pt) in self.points.iter().enumerate() {
            if i == 0 {
                p.move_to(*pt);
            } else {
                p.line_to(*pt);
            }
        }
        p
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        Mark::builder(self.id)
            .z_index(self.z_index)
            .path(self.path())
            .stroke(self.stroke.brush.clone(), self.stroke.stroke_width)
            .build()
    }
}
