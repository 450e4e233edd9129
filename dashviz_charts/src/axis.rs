// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! Cartesian charts get a left value axis (domain line, ticks, tick labels) and a bottom category
//! axis (baseline and one label per category). Tick and label ids are derived from the label
//! text, so a tick that survives a rescale updates in place.

use dashviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use crate::rule_mark::RuleMarkSpec;
use crate::scale::ScaleLinear;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A paint + width pair for stroked paths (domain lines, ticks, stems).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for labels.
    pub label_fill: Brush,
    /// Font size for labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            label_fill: rule.brush.clone(),
            rule,
            label_font_size: 10.0,
        }
    }
}

/// A vertical value axis on the left edge of the plot.
#[derive(Clone, Debug)]
pub struct ValueAxisSpec {
    /// Stable-id base; marks derive their ids from it.
    pub id_base: u64,
    /// The value scale (range in scene y).
    pub scale: ScaleLinear,
    /// Plot rectangle.
    pub plot: Rect,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick length.
    pub tick_size: f64,
    /// Gap between tick end and label.
    pub tick_padding: f64,
    /// Styling.
    pub style: AxisStyle,
}

impl ValueAxisSpec {
    /// Creates an axis with 5 ticks of length 5.
    pub fn new(id_base: u64, scale: ScaleLinear, plot: Rect) -> Self {
        Self {
            id_base,
            scale,
            plot,
            tick_count: 5,
            tick_size: 5.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
        }
    }

    /// Sets the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the styling.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Generates the domain line, tick rules and tick labels.
    pub fn marks(&self) -> Vec<Mark> {
        let x = self.plot.x0;
        let (d0, d1) = self.scale.domain();
        let ticks = self.scale.ticks(self.tick_count);
        let step = match ticks[..] {
            [a, b, ..] => b - a,
            _ => 0.0,
        };

        let mut out = Vec::with_capacity(1 + 2 * ticks.len());
        out.push(
            RuleMarkSpec::vertical(
                MarkId::from_raw(self.id_base),
                x,
                self.scale.map(d0),
                self.scale.map(d1),
            )
            .with_stroke(self.style.rule.clone())
            .with_z_index(z_order::AXIS_RULES)
            .mark(),
        );
        for t in ticks {
            let y = self.scale.map(t);
            let label = format_tick(t, step);
            out.push(
                RuleMarkSpec::horizontal(
                    MarkId::for_key(self.id_base + 1, &label),
                    y,
                    x - self.tick_size,
                    x,
                )
                .with_stroke(self.style.rule.clone())
                .with_z_index(z_order::AXIS_RULES)
                .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::for_key(self.id_base + 2, &label),
                    Point::new(x - self.tick_size - self.tick_padding, y),
                    label,
                )
                .with_font_size(self.style.label_font_size)
                .with_fill(self.style.label_fill.clone())
                .with_anchor(TextAnchor::End)
                .with_baseline(TextBaseline::Middle)
                .mark(),
            );
        }
        out
    }
}

/// A horizontal category axis along the bottom of the plot.
#[derive(Clone, Debug)]
pub struct CategoryAxisSpec {
    /// Stable-id base; labels derive their ids from it and their key.
    pub id_base: u64,
    /// Plot rectangle.
    pub plot: Rect,
    /// `(key, text, x)` per category.
    pub labels: Vec<(String, String, f64)>,
    /// Gap between the baseline and the labels.
    pub label_padding: f64,
    /// Styling.
    pub style: AxisStyle,
}

impl CategoryAxisSpec {
    /// Creates an empty category axis.
    pub fn new(id_base: u64, plot: Rect) -> Self {
        Self {
            id_base,
            plot,
            labels: Vec::new(),
            label_padding: 6.0,
            style: AxisStyle::default(),
        }
    }

    /// Adds a label at scene x `x`, identified by `key`.
    pub fn with_label(mut self, key: impl Into<String>, text: impl Into<String>, x: f64) -> Self {
        self.labels.push((key.into(), text.into(), x));
        self
    }

    /// Sets the styling.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Generates the baseline and labels.
    pub fn marks(&self) -> Vec<Mark> {
        let y = self.plot.y1;
        let mut out = Vec::with_capacity(1 + self.labels.len());
        out.push(
            RuleMarkSpec::horizontal(
                MarkId::from_raw(self.id_base),
                y,
                self.plot.x0,
                self.plot.x1,
            )
            .with_stroke(self.style.rule.clone())
            .with_z_index(z_order::AXIS_RULES)
            .mark(),
        );
        out.extend(self.labels.iter().map(|(key, text, x)| {
            TextMarkSpec::new(
                MarkId::for_key(self.id_base + 1, key),
                Point::new(*x, y + self.label_padding),
                text.clone(),
            )
            .with_font_size(self.style.label_font_size)
            .with_fill(self.style.label_fill.clone())
            .with_anchor(TextAnchor::Middle)
            .with_baseline(TextBaseline::Hanging)
            .mark()
        }));
        out
    }
}

/// Formats a tick value with as many decimals as the tick step needs.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "step is in (0, 1), so the digit count is small and positive"
        )]
        {
            (-step.log10()).ceil().clamp(0.0, 12.0) as usize
        }
    } else {
        0
    };
    let s = format!("{value:.decimals$}");
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use dashviz_core::{MarkPayload, Scene};

    use super::*;

    fn text_of(mark: &Mark) -> Option<&str> {
        match &mark.payload {
            MarkPayload::Text(t) => Some(t.text.as_str()),
            _ => None,
        }
    }

    #[test]
    fn value_axis_labels_every_tick() {
        let plot = Rect::new(40.0, 20.0, 200.0, 140.0);
        let scale = ScaleLinear::new((0.0, 12.0), (140.0, 20.0));
        let marks = ValueAxisSpec::new(0x100, scale, plot).marks();
        let labels: Vec<_> = marks.iter().filter_map(text_of).collect();
        assert_eq!(labels, ["0", "2", "4", "6", "8", "10", "12"]);
    }

    #[test]
    fn ticks_that_survive_a_rescale_keep_their_ids() {
        let plot = Rect::new(40.0, 20.0, 200.0, 140.0);
        let mut scene = Scene::new();
        scene.tick(
            ValueAxisSpec::new(0x100, ScaleLinear::new((0.0, 10.0), (140.0, 20.0)), plot).marks(),
        );
        let diffs = scene.tick(
            ValueAxisSpec::new(0x100, ScaleLinear::new((0.0, 12.0), (140.0, 20.0)), plot).marks(),
        );
        let label_4 = MarkId::for_key(0x102, "4");
        assert!(
            diffs
                .iter()
                .any(|d| matches!(d, dashviz_core::MarkDiff::Update { id, .. } if *id == label_4))
        );
    }

    #[test]
    fn category_axis_places_labels_under_the_plot() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let marks = CategoryAxisSpec::new(0x200, plot)
            .with_label("video", "video", 25.0)
            .with_label("audio", "audio", 75.0)
            .marks();
        assert_eq!(marks.len(), 3);
        let MarkPayload::Text(t) = &marks[2].payload else {
            panic!("labels are text");
        };
        assert_eq!(t.pos, Point::new(75.0, 56.0));
        assert_eq!(marks[2].id, MarkId::for_key(0x201, "audio"));
    }

    #[test]
    fn tick_format_follows_step() {
        assert_eq!(format_tick(4.0, 2.0), "4");
        assert_eq!(format_tick(0.4, 0.2), "0.4");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
        assert_eq!(format_tick(-0.0, 1.0), "0");
    }
}
