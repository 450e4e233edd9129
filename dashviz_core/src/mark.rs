// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: drawable items with stable identity.

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};

/// Stable identity of a mark across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id from a role base and a string key (e.g. a category label).
    ///
    /// The same `(base, key)` pair always yields the same id, independent of the position of the
    /// key in any input sequence, and independent of process or platform.
    pub fn for_key(base: u64, key: &str) -> Self {
        let mut h = FNV_OFFSET;
        for b in base.to_le_bytes().into_iter().chain(key.bytes()) {
            h ^= u64::from(b);
            h = h.wrapping_mul(FNV_PRIME);
        }
        Self(h)
    }
}

/// The primitive kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// Arbitrary filled and/or stroked path.
    Path,
    /// Axis-aligned filled rectangle.
    Rect,
    /// Unshaped text run.
    Text,
}

/// Horizontal text anchor, matching SVG `text-anchor`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    #[default]
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline, matching SVG `dominant-baseline`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Anchor is the vertical middle of the text.
    #[default]
    Middle,
    /// Anchor is the alphabetic baseline.
    Alphabetic,
    /// Anchor is the hanging baseline (top).
    Hanging,
    /// Anchor is the ideographic baseline.
    Ideographic,
}

/// Path payload.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables stroking.
    pub stroke_width: f64,
}

/// Rectangle payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Rectangle in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Corner radius.
    pub corner_radius: f64,
}

/// Text payload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// The resolved visual content of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A path.
    Path(PathPayload),
    /// A rectangle.
    Rect(RectPayload),
    /// A text run.
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the primitive kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Path(_) => MarkKind::Path,
            Self::Rect(_) => MarkKind::Rect,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns geometric bounds, if they can be known without text shaping.
    ///
    /// Text returns `None`; empty paths return `None`.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    None
                } else {
                    Some(p.path.bounding_box())
                }
            }
            Self::Rect(r) => Some(r.rect),
            Self::Text(_) => None,
        }
    }
}

/// A drawable item with stable identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Paint order; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Whether the mark is currently shown.
    ///
    /// Hidden marks stay in the scene, so toggling visibility yields `Update` diffs rather than
    /// `Exit` followed by `Enter`.
    pub visible: bool,
    /// Resolved content.
    pub payload: MarkPayload,
}

impl Mark {
    /// Starts building a mark with the given id.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder {
            id,
            z_index: 0,
            visible: true,
        }
    }

    /// Returns the primitive kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}

/// Kind-agnostic part of a mark under construction.
#[derive(Clone, Copy, Debug)]
pub struct MarkBuilder {
    id: MarkId,
    z_index: i32,
    visible: bool,
}

impl MarkBuilder {
    /// Sets the paint order.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Continues as a path mark.
    pub fn path(self, path: BezPath) -> PathMarkBuilder {
        PathMarkBuilder {
            base: self,
            payload: PathPayload {
                path,
                fill: Brush::Solid(Color::TRANSPARENT),
                stroke: Brush::Solid(Color::TRANSPARENT),
                stroke_width: 0.0,
            },
        }
    }

    /// Continues as a rect mark.
    pub fn rect(self, rect: Rect) -> RectMarkBuilder {
        RectMarkBuilder {
            base: self,
            payload: RectPayload {
                rect,
                fill: Brush::default(),
                corner_radius: 0.0,
            },
        }
    }

    /// Continues as a text mark.
    pub fn text(self, pos: Point, text: impl Into<String>) -> TextMarkBuilder {
        TextMarkBuilder {
            base: self,
            payload: TextPayload {
                pos,
                text: text.into(),
                font_size: 12.0,
                angle: 0.0,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
                fill: Brush::default(),
            },
        }
    }

    fn finish(self, payload: MarkPayload) -> Mark {
        Mark {
            id: self.id,
            z_index: self.z_index,
            visible: self.visible,
            payload,
        }
    }
}

/// Builder for path marks.
#[derive(Clone, Debug)]
pub struct PathMarkBuilder {
    base: MarkBuilder,
    payload: PathPayload,
}

impl PathMarkBuilder {
    /// Sets the fill paint.
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        self.payload.fill = fill.into();
        self
    }

    /// Sets the stroke paint and width.
    pub fn stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.payload.stroke = stroke.into();
        self.payload.stroke_width = stroke_width;
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        self.base.finish(MarkPayload::Path(self.payload))
    }
}

/// Builder for rect marks.
#[derive(Clone, Debug)]
pub struct RectMarkBuilder {
    base: MarkBuilder,
    payload: RectPayload,
}

impl RectMarkBuilder {
    /// Sets the fill paint.
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        self.payload.fill = fill.into();
        self
    }

    /// Sets the corner radius.
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.payload.corner_radius = radius.max(0.0);
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        self.base.finish(MarkPayload::Rect(self.payload))
    }
}

/// Builder for text marks.
#[derive(Clone, Debug)]
pub struct TextMarkBuilder {
    base: MarkBuilder,
    payload: TextPayload,
}

impl TextMarkBuilder {
    /// Sets the font size.
    pub fn font_size(mut self, font_size: f64) -> Self {
        self.payload.font_size = font_size;
        self
    }

    /// Sets the rotation in degrees.
    pub fn angle(mut self, angle: f64) -> Self {
        self.payload.angle = angle;
        self
    }

    /// Sets the horizontal anchor.
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.payload.anchor = anchor;
        self
    }

    /// Sets the baseline.
    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.payload.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        self.payload.fill = fill.into();
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        self.base.finish(MarkPayload::Text(self.payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ids_are_stable_and_role_scoped() {
        let a = MarkId::for_key(1, "failed");
        assert_eq!(a, MarkId::for_key(1, "failed"));
        assert_ne!(a, MarkId::for_key(2, "failed"));
        assert_ne!(a, MarkId::for_key(1, "succeeded"));
    }

    #[test]
    fn empty_path_has_no_bounds() {
        let mark = Mark::builder(MarkId::from_raw(1))
            .path(BezPath::new())
            .build();
        assert_eq!(mark.kind(), MarkKind::Path);
        assert!(mark.payload.bounds().is_none());
    }
}
