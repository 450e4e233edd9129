// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circle mark generation (lollipop heads, line vertices, hover marker).

use dashviz_core::{Mark, MarkId};
use kurbo::{Circle, Point, Shape};
use peniko::Brush;

use crate::axis::StrokeStyle;

/// A filled circle.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Center.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Optional outline.
    pub stroke: Option<StrokeStyle>,
    /// Whether the mark is shown.
    pub visible: bool,
    /// Rendering order hint.
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a circle with a default fill.
    pub fn new(id: MarkId, center: Point, radius: f64) -> Self {
        Self {
            id,
            center,
            radius: radius.max(0.0),
            fill: Brush::default(),
            stroke: None,
            visible: true,
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the outline.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let path = Circle::new(self.center, self.radius).to_path(0.1);
        let builder = Mark::builder(self.id)
            .z_index(self.z_index)
            .visible(self.visible)
            .path(path)
            .fill(self.fill.clone());
        let builder = match &self.stroke {
            Some(stroke) => builder.stroke(stroke.brush.clone(), stroke.stroke_width),
            None => builder,
        };
        builder.build()
    }
}
