// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A retained SVG document driven by mark diffs.

use hashbrown::HashMap;
use kurbo::Rect;
use peniko::Brush;

use dashviz_core::{MarkDiff, MarkId, MarkPayload, TextAnchor, TextBaseline};

#[derive(Clone, Debug)]
struct Entry {
    z_index: i32,
    visible: bool,
    payload: MarkPayload,
}

/// Applies [`MarkDiff`]s and serialises the current marks as an SVG document.
///
/// Hidden marks stay in the document with `visibility="hidden"`.
#[derive(Clone, Debug, Default)]
pub struct SvgScene {
    marks: HashMap<MarkId, Entry>,
    view_box: Option<Rect>,
}

impl SvgScene {
    /// Creates an empty document with a fixed `0 0 width height` view box.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            marks: HashMap::new(),
            view_box: Some(Rect::new(0.0, 0.0, width, height)),
        }
    }

    /// Sets the minimum view box; it grows to fit visible marks.
    pub fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    /// Number of retained marks, hidden ones included.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if no marks are retained.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns `true` if the mark is retained and visible.
    pub fn is_visible(&self, id: MarkId) -> bool {
        self.marks.get(&id).is_some_and(|e| e.visible)
    }

    /// Applies one batch of diffs.
    pub fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id,
                    z_index,
                    visible,
                    new,
                    ..
                } => {
                    self.marks.insert(
                        *id,
                        Entry {
                            z_index: *z_index,
                            visible: *visible,
                            payload: (**new).clone(),
                        },
                    );
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    visible,
                    new,
                    ..
                } => {
                    self.marks.insert(
                        *id,
                        Entry {
                            z_index: *new_z_index,
                            visible: *visible,
                            payload: (**new).clone(),
                        },
                    );
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    /// Serialises the document, painting marks in `(z_index, id)` order.
    pub fn to_svg_string(&self) -> String {
        let view_box = match (self.view_box, self.content_bounds()) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (a, b) => a.or(b),
        }
        .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));

        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');

        let mut entries: Vec<(&MarkId, &Entry)> = self.marks.iter().collect();
        entries.sort_by_key(|(id, e)| (e.z_index, id.0));

        for (_id, entry) in entries {
            let hidden = if entry.visible {
                ""
            } else {
                r#" visibility="hidden""#
            };
            match &entry.payload {
                MarkPayload::Rect(r) => {
                    out.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        r.rect.x0,
                        r.rect.y0,
                        r.rect.width(),
                        r.rect.height(),
                    ));
                    if r.corner_radius > 0.0 {
                        out.push_str(&format!(r#" rx="{}""#, r.corner_radius));
                    }
                    write_paint_attr(&mut out, "fill", &r.fill);
                    out.push_str(hidden);
                    out.push_str("/>\n");
                }
                MarkPayload::Text(t) => {
                    let baseline = match t.baseline {
                        TextBaseline::Middle => "middle",
                        TextBaseline::Alphabetic => "alphabetic",
                        TextBaseline::Hanging => "hanging",
                        TextBaseline::Ideographic => "ideographic",
                    };
                    out.push_str(&format!(
                        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                        t.pos.x, t.pos.y, t.font_size, baseline
                    ));
                    if t.angle != 0.0 {
                        out.push_str(&format!(
                            r#" transform="rotate({} {} {})""#,
                            t.angle, t.pos.x, t.pos.y
                        ));
                    }
                    out.push_str(match t.anchor {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    write_paint_attr(&mut out, "fill", &t.fill);
                    out.push_str(hidden);
                    out.push('>');
                    out.push_str(&escape_xml(&t.text));
                    out.push_str("</text>\n");
                }
                MarkPayload::Path(p) => {
                    let d = p.path.to_svg();
                    out.push_str(&format!(r#"<path d="{d}""#));
                    write_paint_attr(&mut out, "fill", &p.fill);
                    if p.stroke_width > 0.0 {
                        write_paint_attr(&mut out, "stroke", &p.stroke);
                        out.push_str(&format!(r#" stroke-width="{}""#, p.stroke_width));
                    }
                    out.push_str(hidden);
                    out.push_str("/>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }

    fn content_bounds(&self) -> Option<Rect> {
        self.marks
            .values()
            .filter(|e| e.visible)
            .filter_map(|e| match &e.payload {
                MarkPayload::Text(t) => Some(estimate_text_bounds(
                    t.pos.x,
                    t.pos.y,
                    t.font_size,
                    t.anchor,
                    t.baseline,
                    &t.text,
                )),
                payload => payload.bounds(),
            })
            .reduce(|a, b| a.union(b))
            .map(|r| r.inflate(4.0, 4.0))
    }
}

/// Rough text extent: 0.6em per glyph, midline estimated from the baseline.
fn estimate_text_bounds(
    x: f64,
    y: f64,
    font_size: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
    text: &str,
) -> Rect {
    let width = 0.6 * font_size * text.chars().count() as f64;
    let half_height = 0.5 * font_size;
    let y_midline = match baseline {
        TextBaseline::Middle => y,
        TextBaseline::Alphabetic => y - 0.3 * font_size,
        TextBaseline::Hanging => y + 0.3 * font_size,
        TextBaseline::Ideographic => y - 0.2 * font_size,
    };
    let (x0, x1) = match anchor {
        TextAnchor::Start => (x, x + width),
        TextAnchor::Middle => (x - width / 2.0, x + width / 2.0),
        TextAnchor::End => (x - width, x),
    };
    Rect::new(x0, y_midline - half_height, x1, y_midline + half_height)
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (fill, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use dashviz_core::{Mark, Scene};
    use kurbo::Point;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn hidden_marks_are_kept_but_not_shown() {
        let id = MarkId::from_raw(7);
        let mut scene = Scene::new();
        let mut svg = SvgScene::new(100.0, 100.0);
        let tip = |visible| {
            Mark::builder(id)
                .visible(visible)
                .text(Point::new(10.0, 10.0), "a < b")
                .fill(css::BLACK)
                .build()
        };

        svg.apply_diffs(&scene.tick(vec![tip(true)]));
        let shown = svg.to_svg_string();
        assert!(shown.contains("a &lt; b"));
        assert!(!shown.contains("visibility"));

        svg.apply_diffs(&scene.tick(vec![tip(false)]));
        assert_eq!(svg.len(), 1);
        assert!(!svg.is_visible(id));
        assert!(svg.to_svg_string().contains(r#"visibility="hidden""#));
    }

    #[test]
    fn rects_carry_corner_radius_and_exit_removes() {
        let id = MarkId::from_raw(1);
        let mut scene = Scene::new();
        let mut svg = SvgScene::default();
        svg.apply_diffs(&scene.tick(vec![
            Mark::builder(id)
                .rect(Rect::new(0.0, 0.0, 10.0, 5.0))
                .fill(css::RED)
                .corner_radius(2.0)
                .build(),
        ]));
        let out = svg.to_svg_string();
        assert!(out.contains(r#"rx="2""#));
        assert!(out.contains(r##"fill="#ff0000""##));

        svg.apply_diffs(&scene.clear());
        assert!(svg.is_empty());
    }
}
