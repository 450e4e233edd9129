// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data projection: raw records to a [`GeometryFrame`].

use core::f64::consts::{FRAC_PI_2, TAU};

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::config::{ChartConfig, HeadlineMode, Theme};
use crate::data::{DataPoint, sanitize};
use crate::frame::{ChartKind, Geometry, GeometryFrame, PieGeometry, ProjectedDatum};
use crate::scale::{ScaleBand, ScaleLinear, ScaleLinearSpec, ScalePoint};

/// Pie slices start at twelve o'clock.
pub const PIE_START_ANGLE: f64 = -FRAC_PI_2;

/// A container size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Maps data points into plotting coordinates.
#[derive(Clone, Debug)]
pub struct DatumProjector {
    config: ChartConfig,
    theme: Theme,
}

impl DatumProjector {
    /// Creates a projector from a validated configuration and its theme.
    pub fn new(config: ChartConfig, theme: Theme) -> Self {
        Self { config, theme }
    }

    /// The configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The resolved theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The plot rectangle for a container size: the size minus margins.
    ///
    /// Spans that would be negative collapse to zero.
    pub fn plot_rect(&self, size: Size) -> Rect {
        let m = &self.config.margin;
        let w = sanitize(size.width);
        let h = sanitize(size.height);
        let x0 = m.left.min(w);
        let y0 = m.top.min(h);
        let x1 = (w - m.right).max(x0);
        let y1 = (h - m.bottom).max(y0);
        Rect::new(x0, y0, x1, y1)
    }

    /// Projects `points` for a chart of the given kind and size.
    ///
    /// Values are sanitised (non-finite and negative become zero). Empty input yields an empty
    /// frame without axes.
    pub fn project(&self, kind: ChartKind, points: &[DataPoint], size: Size) -> GeometryFrame {
        let plot = self.plot_rect(size);
        if points.is_empty() {
            return GeometryFrame::empty(kind, plot);
        }

        let keys = unique_keys(points);
        let values: Vec<f64> = points.iter().map(|p| sanitize(p.value)).collect();
        let clamped = points
            .iter()
            .zip(&values)
            .filter(|(p, v)| p.value != **v)
            .count();
        if clamped > 0 {
            tracing::warn!(clamped, ?kind, "non-finite or negative values drawn as zero");
        }

        match kind {
            ChartKind::Pie => self.project_pie(plot, keys, &values),
            ChartKind::Lollipop | ChartKind::Bar => self.project_bands(kind, plot, keys, &values),
            ChartKind::Line => self.project_line(plot, keys, &values),
        }
    }

    fn project_pie(&self, plot: Rect, keys: Vec<String>, values: &[f64]) -> GeometryFrame {
        let pie_cfg = &self.config.pie;
        let label_room = if pie_cfg.leader_labels {
            pie_cfg.label_offset + 2.0 * self.config.font_size
        } else {
            0.0
        };
        let outer_radius = (0.5 * plot.width().min(plot.height()) - label_room).max(0.0);
        let pie = PieGeometry {
            center: plot.center(),
            outer_radius,
            inner_radius: outer_radius * pie_cfg.inner_radius_ratio,
        };

        let sum: f64 = values.iter().sum();
        // Large finite values can overflow the sum; normalise by the max instead.
        let unit = if sum.is_finite() {
            1.0
        } else {
            values.iter().copied().fold(0.0, f64::max)
        };
        let total: f64 = if sum.is_finite() {
            sum
        } else {
            values.iter().map(|v| v / unit).sum()
        };
        let mut cumulative = 0.0;
        let data = keys
            .into_iter()
            .zip(values)
            .enumerate()
            .map(|(i, (key, &value))| {
                let (start, end) = if total > 0.0 {
                    let start = cumulative / total;
                    cumulative += value / unit;
                    (start, cumulative / total)
                } else {
                    (0.0, 0.0)
                };
                ProjectedDatum {
                    key,
                    value,
                    color: self.theme.palette.color(i),
                    geometry: Geometry::Arc {
                        start_angle: PIE_START_ANGLE + start * TAU,
                        end_angle: PIE_START_ANGLE + end * TAU,
                    },
                }
            })
            .collect();

        let headline = match pie_cfg.headline {
            HeadlineMode::First => values.first().copied(),
            HeadlineMode::Sum => Some(sum.min(f64::MAX)),
            HeadlineMode::None => None,
        };

        GeometryFrame {
            kind: ChartKind::Pie,
            plot,
            data,
            headline,
            value_scale: None,
            pie: Some(pie),
        }
    }

    fn value_scale(&self, plot: Rect, values: &[f64]) -> ScaleLinear {
        let max = values.iter().copied().fold(0.0, f64::max);
        ScaleLinearSpec::value_axis(max, self.config.headroom)
            .instantiate((plot.y1, plot.y0), self.config.tick_count)
    }

    fn project_bands(
        &self,
        kind: ChartKind,
        plot: Rect,
        keys: Vec<String>,
        values: &[f64],
    ) -> GeometryFrame {
        let y = self.value_scale(plot, values);
        let base = y.map(0.0);
        let band = ScaleBand::new((plot.x0, plot.x1), values.len()).with_padding(
            self.config.band_padding_inner,
            self.config.band_padding_outer,
        );

        let data = keys
            .into_iter()
            .zip(values)
            .enumerate()
            .map(|(i, (key, &value))| {
                let geometry = if kind == ChartKind::Bar {
                    Geometry::Bar {
                        x: band.x(i),
                        width: band.band_width(),
                        base,
                        top: y.map(value),
                    }
                } else {
                    Geometry::Stem {
                        x: band.center(i),
                        base,
                        tip: y.map(value),
                    }
                };
                ProjectedDatum {
                    key,
                    value,
                    color: self.theme.palette.color(i),
                    geometry,
                }
            })
            .collect();

        GeometryFrame {
            kind,
            plot,
            data,
            headline: None,
            value_scale: Some(y),
            pie: None,
        }
    }

    fn project_line(&self, plot: Rect, keys: Vec<String>, values: &[f64]) -> GeometryFrame {
        let y = self.value_scale(plot, values);
        let base = y.map(0.0);
        let x = ScalePoint::new((plot.x0, plot.x1), values.len())
            .with_padding(self.config.point_padding);
        let color = self.theme.palette.color(0);

        let data = keys
            .into_iter()
            .zip(values)
            .enumerate()
            .map(|(i, (key, &value))| ProjectedDatum {
                key,
                value,
                color,
                geometry: Geometry::Vertex {
                    x: x.x(i),
                    y: y.map(value),
                    base,
                },
            })
            .collect();

        GeometryFrame {
            kind: ChartKind::Line,
            plot,
            data,
            headline: None,
            value_scale: Some(y),
            pie: None,
        }
    }
}

/// Reconciliation keys: the labels, with repeats disambiguated as `label#2`, `label#3`, ...
fn unique_keys(points: &[DataPoint]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    points
        .iter()
        .map(|p| {
            let n = seen.entry(p.label.as_str()).or_insert(0);
            *n += 1;
            if *n == 1 {
                p.label.clone()
            } else {
                format!("{}#{}", p.label, n)
            }
        })
        .collect()
}

/// Point on a circle at `angle` (kurbo convention).
pub(crate) fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector() -> DatumProjector {
        let config = ChartConfig::default();
        let theme = config.resolve().unwrap();
        DatumProjector::new(config, theme)
    }

    fn pts(values: &[(&str, f64)]) -> Vec<DataPoint> {
        values.iter().map(|&(l, v)| DataPoint::new(l, v)).collect()
    }

    #[test]
    fn pie_fractions_follow_values_in_input_order() {
        let frame = projector().project(
            ChartKind::Pie,
            &pts(&[("count", 10.0), ("succeeded", 7.0), ("failed", 3.0)]),
            Size::new(300.0, 300.0),
        );
        let f = frame.fractions();
        assert!((f[0] - 0.5).abs() < 1e-9);
        assert!((f[1] - 0.35).abs() < 1e-9);
        assert!((f[2] - 0.15).abs() < 1e-9);
        assert_eq!(frame.headline, Some(10.0));
        let Geometry::Arc { start_angle, .. } = frame.data[0].geometry else {
            panic!("pie data are arcs");
        };
        assert_eq!(start_angle, PIE_START_ANGLE);
    }

    #[test]
    fn single_point_pie_is_a_full_circle() {
        let frame = projector().project(
            ChartKind::Pie,
            &pts(&[("only", 4.0)]),
            Size::new(200.0, 200.0),
        );
        assert!((frame.fractions()[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_sum_pie_draws_zero_slices() {
        let frame = projector().project(
            ChartKind::Pie,
            &pts(&[("a", 0.0), ("b", f64::NAN), ("c", -2.0)]),
            Size::new(200.0, 200.0),
        );
        assert_eq!(frame.data.len(), 3);
        assert!(frame.fractions().iter().all(|f| *f == 0.0));
        assert!(frame.data.iter().all(|d| d.value == 0.0));
    }

    #[test]
    fn empty_input_projects_an_empty_frame() {
        for kind in [
            ChartKind::Pie,
            ChartKind::Lollipop,
            ChartKind::Bar,
            ChartKind::Line,
        ] {
            let frame = projector().project(kind, &[], Size::new(100.0, 100.0));
            assert!(frame.is_empty());
            assert!(frame.value_scale.is_none());
        }
    }

    #[test]
    fn lollipop_stems_share_a_baseline_and_scale_with_headroom() {
        let frame = projector().project(
            ChartKind::Lollipop,
            &pts(&[("video", 10.0), ("audio", 5.0)]),
            Size::new(240.0, 170.0),
        );
        let plot = frame.plot;
        let y = frame.value_scale.unwrap();
        assert_eq!(y.domain(), (0.0, 12.0));
        let Geometry::Stem { x: x0, base, tip } = frame.data[0].geometry else {
            panic!("lollipop data are stems");
        };
        assert_eq!(base, plot.y1);
        assert!(tip > plot.y0, "headroom keeps the tallest stem below the top");
        let Geometry::Stem { x: x1, .. } = frame.data[1].geometry else {
            panic!("lollipop data are stems");
        };
        assert!(x0 < x1);
    }

    #[test]
    fn single_zero_point_does_not_divide_by_zero() {
        for kind in [ChartKind::Lollipop, ChartKind::Bar, ChartKind::Line] {
            let frame = projector().project(kind, &pts(&[("d", 0.0)]), Size::new(100.0, 100.0));
            let p = frame.data[0].geometry.anchor().unwrap();
            assert!(p.x.is_finite() && p.y.is_finite(), "{kind:?}");
        }
    }

    #[test]
    fn repeated_labels_get_distinct_keys() {
        let frame = projector().project(
            ChartKind::Line,
            &pts(&[("mon", 1.0), ("mon", 2.0)]),
            Size::new(100.0, 100.0),
        );
        assert_eq!(frame.data[0].key, "mon");
        assert_eq!(frame.data[1].key, "mon#2");
    }

    #[test]
    fn tiny_containers_clamp_the_plot() {
        let plot = projector().plot_rect(Size::new(10.0, 5.0));
        assert!(plot.width() >= 0.0 && plot.height() >= 0.0);
        let frame = projector().project(
            ChartKind::Pie,
            &pts(&[("a", 1.0)]),
            Size::new(10.0, 5.0),
        );
        assert_eq!(frame.pie.unwrap().outer_radius, 0.0);
    }

    #[test]
    fn huge_pie_values_keep_their_fractions() {
        let big = f64::MAX / 2.0;
        let frame = projector().project(
            ChartKind::Pie,
            &pts(&[("a", big), ("b", big), ("c", big), ("d", big)]),
            Size::new(300.0, 300.0),
        );
        for f in frame.fractions() {
            assert!((f - 0.25).abs() < 1e-9, "{f}");
        }
    }
}
