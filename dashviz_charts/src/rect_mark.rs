// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle mark generation (bars, tooltip backgrounds).

use dashviz_core::{Mark, MarkId};
use kurbo::Rect;
use peniko::Brush;

/// A filled rectangle.
#[derive(Clone, Debug)]
pub struct RectMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Rectangle in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Corner radius.
    pub corner_radius: f64,
    /// Whether the mark is shown.
    pub visible: bool,
    /// Rendering order hint.
    pub z_index: i32,
}

impl RectMarkSpec {
    /// Creates a rect mark spec; the rectangle is normalized so bars growing upward stay valid.
    pub fn new(id: MarkId, rect: Rect) -> Self {
        Self {
            id,
            rect: rect.abs(),
            fill: Brush::default(),
            corner_radius: 0.0,
            visible: true,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the corner radius.
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
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
        Mark::builder(self.id)
            .z_index(self.z_index)
            .visible(self.visible)
            .rect(self.rect)
            .fill(self.fill.clone())
            .corner_radius(self.corner_radius)
            .build()
    }
}
