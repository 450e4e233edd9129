// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape rendering: geometry frames to stable-identity marks.
//!
//! Every per-datum mark id is derived from the datum key and a role offset, so reconciliation in
//! [`dashviz_core::Scene::tick`] follows category identity, never array position.

use dashviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::{Point, Rect, Vec2};
use peniko::color::palette::css;

use crate::axis::{AxisStyle, CategoryAxisSpec, StrokeStyle, ValueAxisSpec};
use crate::config::{ChartConfig, Theme};
use crate::frame::{ChartKind, Geometry, GeometryFrame, PieGeometry};
use crate::hover::HoverReading;
use crate::line_mark::LineMarkSpec;
use crate::point_mark::PointMarkSpec;
use crate::projector::polar;
use crate::rect_mark::RectMarkSpec;
use crate::rule_mark::RuleMarkSpec;
use crate::sector_mark::SectorMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Role offsets added to a chart's id base.
pub mod role {
    /// Pie slices (keyed).
    pub const SLICE: u64 = 0x10;
    /// Leader lines (keyed).
    pub const LEADER: u64 = 0x11;
    /// Percentage labels (keyed).
    pub const PERCENT: u64 = 0x12;
    /// Pie center label.
    pub const HEADLINE: u64 = 0x13;
    /// Lollipop stems (keyed).
    pub const STEM: u64 = 0x20;
    /// Lollipop heads (keyed).
    pub const HEAD: u64 = 0x21;
    /// Bars (keyed).
    pub const BAR: u64 = 0x22;
    /// Line vertices (keyed).
    pub const VERTEX: u64 = 0x23;
    /// The series polyline.
    pub const LINE: u64 = 0x24;
    /// Value axis (uses this offset and the next two).
    pub const VALUE_AXIS: u64 = 0x30;
    /// Category axis (uses this offset and the next).
    pub const CATEGORY_AXIS: u64 = 0x40;
    /// Hover marker.
    pub const HOVER_MARKER: u64 = 0x50;
    /// Tooltip background.
    pub const TOOLTIP_BACKGROUND: u64 = 0x51;
    /// Tooltip text.
    pub const TOOLTIP_TEXT: u64 = 0x52;
}

/// Draws geometry frames and the hover overlay.
#[derive(Clone, Debug)]
pub struct ShapeRenderer {
    id_base: u64,
    config: ChartConfig,
    theme: Theme,
}

impl ShapeRenderer {
    /// Creates a renderer whose mark ids derive from `id_base`.
    ///
    /// Charts sharing a host scene need distinct bases; offsets up to `0xff` are reserved.
    pub fn new(id_base: u64, config: ChartConfig, theme: Theme) -> Self {
        Self {
            id_base,
            config,
            theme,
        }
    }

    fn keyed(&self, role: u64, key: &str) -> MarkId {
        MarkId::for_key(self.id_base + role, key)
    }

    fn single(&self, role: u64) -> MarkId {
        MarkId::from_raw(self.id_base + role)
    }

    fn axis_style(&self) -> AxisStyle {
        AxisStyle {
            rule: StrokeStyle::solid(self.theme.axis, 1.0),
            label_fill: self.theme.text.into(),
            label_font_size: self.config.font_size,
        }
    }

    /// Marks for one frame: one shape per datum plus guides.
    ///
    /// Output depends only on the frame, so rendering the same frame twice yields equal marks.
    pub fn marks(&self, frame: &GeometryFrame) -> Vec<Mark> {
        let mut out = Vec::new();
        match (frame.kind, frame.pie) {
            (ChartKind::Pie, Some(pie)) => self.pie_marks(frame, pie, &mut out),
            (ChartKind::Pie, None) => {}
            (ChartKind::Lollipop, _) => self.lollipop_marks(frame, &mut out),
            (ChartKind::Bar, _) => self.bar_marks(frame, &mut out),
            (ChartKind::Line, _) => self.line_marks(frame, &mut out),
        }
        if frame.kind.is_cartesian() {
            self.axis_marks(frame, &mut out);
        }
        out
    }

    fn pie_marks(&self, frame: &GeometryFrame, pie: PieGeometry, out: &mut Vec<Mark>) {
        let separator = StrokeStyle::solid(css::WHITE, 1.0);
        let leader_stroke = StrokeStyle::solid(self.theme.axis, 1.0);
        let offset = self.config.pie.label_offset;

        for d in &frame.data {
            let Geometry::Arc {
                start_angle,
                end_angle,
            } = d.geometry
            else {
                continue;
            };
            out.push(
                SectorMarkSpec::new(
                    self.keyed(role::SLICE, &d.key),
                    pie.center,
                    pie.inner_radius,
                    pie.outer_radius,
                    start_angle,
                    end_angle,
                )
                .with_fill(d.color)
                .with_stroke(separator.clone())
                .mark(),
            );

            let fraction = d.geometry.sweep_fraction();
            if !self.config.pie.leader_labels || fraction <= 0.0 {
                continue;
            }
            let mid = 0.5 * (start_angle + end_angle);
            let right = mid.cos() >= 0.0;
            let side = if right { 1.0 } else { -1.0 };
            let p0 = polar(pie.center, pie.outer_radius, mid);
            let elbow = polar(pie.center, pie.outer_radius + offset, mid);
            let end = elbow + Vec2::new(side * offset * 0.5, 0.0);
            out.push(
                LineMarkSpec::new(self.keyed(role::LEADER, &d.key), vec![p0, elbow, end])
                    .with_stroke(leader_stroke.clone())
                    .with_z_index(z_order::LEADER_LINES)
                    .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    self.keyed(role::PERCENT, &d.key),
                    end + Vec2::new(side * 3.0, 0.0),
                    format_percent(fraction),
                )
                .with_font_size(self.config.font_size)
                .with_fill(self.theme.text)
                .with_anchor(if right {
                    TextAnchor::Start
                } else {
                    TextAnchor::End
                })
                .with_z_index(z_order::SERIES_LABELS)
                .mark(),
            );
        }

        if let Some(headline) = frame.headline {
            out.push(
                TextMarkSpec::new(
                    self.single(role::HEADLINE),
                    pie.center,
                    format_headline(headline),
                )
                .with_font_size(self.config.headline_font_size)
                .with_fill(self.theme.text)
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Middle)
                .with_z_index(z_order::HEADLINE)
                .mark(),
            );
        }
    }

    fn lollipop_marks(&self, frame: &GeometryFrame, out: &mut Vec<Mark>) {
        for d in &frame.data {
            let Geometry::Stem { x, base, tip } = d.geometry else {
                continue;
            };
            out.push(
                RuleMarkSpec::vertical(self.keyed(role::STEM, &d.key), x, base, tip)
                    .with_stroke(StrokeStyle::solid(d.color, self.config.stem_width))
                    .mark(),
            );
            out.push(
                PointMarkSpec::new(
                    self.keyed(role::HEAD, &d.key),
                    Point::new(x, tip),
                    self.config.dot_radius,
                )
                .with_fill(d.color)
                .mark(),
            );
        }
    }

    fn bar_marks(&self, frame: &GeometryFrame, out: &mut Vec<Mark>) {
        for d in &frame.data {
            let Geometry::Bar { x, width, base, top } = d.geometry else {
                continue;
            };
            out.push(
                RectMarkSpec::new(
                    self.keyed(role::BAR, &d.key),
                    Rect::new(x, top, x + width, base),
                )
                .with_fill(d.color)
                .mark(),
            );
        }
    }

    fn line_marks(&self, frame: &GeometryFrame, out: &mut Vec<Mark>) {
        let mut vertices: Vec<(Point, &str, peniko::Color)> = frame
            .data
            .iter()
            .filter_map(|d| match d.geometry {
                Geometry::Vertex { x, y, .. } => Some((Point::new(x, y), d.key.as_str(), d.color)),
                _ => None,
            })
            .collect();
        // Exiting vertices trail the target data; draw the polyline left to right.
        vertices.sort_by(|a, b| a.0.x.total_cmp(&b.0.x));
        if vertices.is_empty() {
            return;
        }

        let stroke_color = self.theme.palette.color(0);
        out.push(
            LineMarkSpec::new(
                self.single(role::LINE),
                vertices.iter().map(|v| v.0).collect(),
            )
            .with_stroke(StrokeStyle::solid(stroke_color, self.config.line_width))
            .mark(),
        );
        for (p, key, color) in vertices {
            out.push(
                PointMarkSpec::new(self.keyed(role::VERTEX, key), p, self.config.dot_radius * 0.6)
                    .with_fill(color)
                    .mark(),
            );
        }
    }

    fn axis_marks(&self, frame: &GeometryFrame, out: &mut Vec<Mark>) {
        let Some(scale) = frame.value_scale else {
            return;
        };
        let style = self.axis_style();
        out.extend(
            ValueAxisSpec::new(self.id_base + role::VALUE_AXIS, scale, frame.plot)
                .with_tick_count(self.config.tick_count)
                .with_style(style.clone())
                .marks(),
        );
        let axis = frame.data.iter().fold(
            CategoryAxisSpec::new(self.id_base + role::CATEGORY_AXIS, frame.plot)
                .with_style(style),
            |axis, d| match d.geometry.anchor() {
                Some(p) => axis.with_label(d.key.clone(), d.key.clone(), p.x),
                None => axis,
            },
        );
        out.extend(axis.marks());
    }

    /// Marker and tooltip marks.
    ///
    /// The three marks are always emitted with the same ids; `visible` toggles them. Without a
    /// reading they park at the plot origin with empty text.
    pub fn overlay_marks(
        &self,
        reading: Option<&HoverReading>,
        visible: bool,
        plot: Rect,
    ) -> Vec<Mark> {
        let tip = &self.config.tooltip;
        let (position, text, color) = match reading {
            Some(r) => (
                r.position,
                format!("{}: {}", r.label, format_value(r.value)),
                r.color,
            ),
            None => (plot.origin(), String::new(), self.theme.text),
        };

        let text_w = 0.6 * tip.font_size * text.chars().count() as f64;
        let box_w = text_w + 2.0 * tip.padding;
        let box_h = tip.font_size + 2.0 * tip.padding;
        let gap = tip.marker_radius + 6.0;
        let x0 = if position.x + gap + box_w > plot.x1 {
            position.x - gap - box_w
        } else {
            position.x + gap
        };
        let y0 = position.y - gap - box_h;
        let background = Rect::new(x0, y0, x0 + box_w, y0 + box_h);

        vec![
            PointMarkSpec::new(self.single(role::HOVER_MARKER), position, tip.marker_radius)
                .with_fill(color)
                .with_stroke(StrokeStyle::solid(css::WHITE, 1.5))
                .with_visible(visible)
                .with_z_index(z_order::HOVER_MARKER)
                .mark(),
            RectMarkSpec::new(self.single(role::TOOLTIP_BACKGROUND), background)
                .with_fill(self.theme.tooltip_background)
                .with_corner_radius(3.0)
                .with_visible(visible)
                .with_z_index(z_order::TOOLTIP_BACKGROUND)
                .mark(),
            TextMarkSpec::new(
                self.single(role::TOOLTIP_TEXT),
                Point::new(x0 + tip.padding, y0 + 0.5 * box_h),
                text,
            )
            .with_font_size(tip.font_size)
            .with_fill(self.theme.tooltip_text)
            .with_visible(visible)
            .with_z_index(z_order::TOOLTIP_TEXT)
            .mark(),
        ]
    }
}

/// Formats a pie fraction as a percentage: `0.5 -> "50%"`, `0.375 -> "37.5%"`.
pub fn format_percent(fraction: f64) -> String {
    let pct = fraction * 100.0;
    if (pct - pct.round()).abs() < 0.05 {
        format!("{:.0}%", pct.round())
    } else {
        format!("{pct:.1}%")
    }
}

/// Formats the pie center value as a rounded integer.
pub fn format_headline(value: f64) -> String {
    format!("{:.0}", value.round().max(0.0))
}

/// Formats a tooltip value with at most two decimals, trimming trailing zeros.
pub fn format_value(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use dashviz_core::{MarkPayload, Scene};

    use super::*;
    use crate::data::DataPoint;
    use crate::projector::{DatumProjector, Size};

    fn setup() -> (DatumProjector, ShapeRenderer) {
        let config = ChartConfig::default();
        let theme = config.resolve().unwrap();
        (
            DatumProjector::new(config.clone(), theme.clone()),
            ShapeRenderer::new(0x1000, config, theme),
        )
    }

    fn texts(marks: &[Mark]) -> Vec<String> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn pie_emits_slices_leaders_percentages_and_headline() {
        let (projector, renderer) = setup();
        let frame = projector.project(
            ChartKind::Pie,
            &[
                DataPoint::new("count", 10.0),
                DataPoint::new("succeeded", 7.0),
                DataPoint::new("failed", 3.0),
            ],
            Size::new(320.0, 240.0),
        );
        let marks = renderer.marks(&frame);
        assert_eq!(marks.len(), 3 * 3 + 1);
        let t = texts(&marks);
        assert!(t.contains(&"50%".to_string()));
        assert!(t.contains(&"35%".to_string()));
        assert!(t.contains(&"15%".to_string()));
        assert!(t.contains(&"10".to_string()));
    }

    #[test]
    fn shuffled_input_keeps_ids_per_category() {
        let (projector, renderer) = setup();
        let a = projector.project(
            ChartKind::Lollipop,
            &[DataPoint::new("video", 3.0), DataPoint::new("audio", 5.0)],
            Size::new(300.0, 200.0),
        );
        let b = projector.project(
            ChartKind::Lollipop,
            &[DataPoint::new("audio", 5.0), DataPoint::new("video", 3.0)],
            Size::new(300.0, 200.0),
        );
        let mut scene = Scene::new();
        scene.tick(renderer.marks(&a));
        let diffs = scene.tick(renderer.marks(&b));
        assert!(
            diffs
                .iter()
                .all(|d| matches!(d, dashviz_core::MarkDiff::Update { .. })),
            "categories moved, none were replaced: {diffs:?}"
        );
        let video_stem = MarkId::for_key(0x1000 + role::STEM, "video");
        assert!(diffs.iter().any(|d| d.id() == video_stem));
    }

    #[test]
    fn rendering_is_idempotent() {
        let (projector, renderer) = setup();
        let frame = projector.project(
            ChartKind::Line,
            &[DataPoint::new("d1", 3.0), DataPoint::new("d2", 5.0)],
            Size::new(300.0, 200.0),
        );
        assert_eq!(renderer.marks(&frame), renderer.marks(&frame));
        let mut scene = Scene::new();
        scene.tick(renderer.marks(&frame));
        assert!(scene.tick(renderer.marks(&frame)).is_empty());
    }

    #[test]
    fn empty_frames_draw_nothing() {
        let (projector, renderer) = setup();
        for kind in [
            ChartKind::Pie,
            ChartKind::Lollipop,
            ChartKind::Bar,
            ChartKind::Line,
        ] {
            let frame = projector.project(kind, &[], Size::new(300.0, 200.0));
            assert!(renderer.marks(&frame).is_empty(), "{kind:?}");
        }
    }

    #[test]
    fn overlay_keeps_ids_and_toggles_visibility() {
        let (_, renderer) = setup();
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let shown = renderer.overlay_marks(None, true, plot);
        let hidden = renderer.overlay_marks(None, false, plot);
        assert_eq!(shown.len(), 3);
        for (a, b) in shown.iter().zip(&hidden) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.payload, b.payload);
            assert!(a.visible && !b.visible);
        }
    }

    #[test]
    fn number_formats() {
        assert_eq!(format_percent(0.375), "37.5%");
        assert_eq!(format_percent(0.125), "12.5%");
        assert_eq!(format_percent(0.5), "50%");
        assert_eq!(format_headline(14.6), "15");
        assert_eq!(format_value(20.0), "20");
        assert_eq!(format_value(7.25), "7.25");
        assert_eq!(format_value(7.5), "7.5");
    }
}
