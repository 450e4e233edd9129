// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart scenario demos for `dashviz_charts`.
//!
//! Writes `dashviz_demo.html`. Set `RUST_LOG=dashviz_charts=debug` to watch transitions start,
//! get superseded and complete.

mod html;

use std::error::Error;
use std::time::Duration;

use dashviz_charts::{
    Chart, ChartConfig, ChartKind, DataPoint, Metric, Size, SvgScene, category_series,
    parse_analytics, parse_series,
};
use kurbo::Point;
use tracing_subscriber::EnvFilter;

const ANALYTICS: &str = r#"{
    "video": {"count": 10, "succeeded": 7, "failed": 3},
    "audio": {"count": 6, "succeeded": 6, "failed": 0},
    "image": {"count": 14, "succeeded": 9, "failed": 5},
    "subtitle": null
}"#;

const ANALYTICS_NEXT: &str = r#"{
    "video": {"count": 20, "succeeded": 15, "failed": 5},
    "image": {"count": 11, "succeeded": 10, "failed": 1},
    "archive": {"count": 8, "succeeded": 8, "failed": 0},
    "audio": {"count": 4, "succeeded": 3, "failed": 1}
}"#;

const TRAFFIC: &str = r#"[
    {"date": "03-01", "value": 120}, {"date": "03-02", "value": 180},
    {"date": "03-03", "value": 90}, {"date": "03-04", "value": 240},
    {"date": "03-05", "value": 210}, {"date": "03-06", "value": null},
    {"date": "03-07", "value": 160}
]"#;

const MS: Duration = Duration::from_millis(1);

/// Drives one chart and keeps an SVG snapshot per captured frame.
#[derive(Debug)]
struct Recorder {
    chart: Chart,
    svg: SvgScene,
    frames: Vec<(String, String)>,
}

impl Recorder {
    fn new(chart: Chart) -> Self {
        let size = chart.size();
        Self {
            chart,
            svg: SvgScene::new(size.width, size.height),
            frames: Vec::new(),
        }
    }

    fn snapshot(&mut self, caption: impl Into<String>, now: Duration) {
        let diffs = self.chart.frame(now);
        self.svg.apply_diffs(&diffs);
        self.frames.push((caption.into(), self.svg.to_svg_string()));
    }

    fn hover(&mut self, caption: impl Into<String>, pointer: Point) {
        let diffs = self.chart.pointer_move(pointer);
        self.svg.apply_diffs(&diffs);
        self.frames.push((caption.into(), self.svg.to_svg_string()));
    }

    fn finish(self) -> Vec<(String, String)> {
        let diffs = self.chart.unmount();
        tracing::info!(exits = diffs.len(), "chart unmounted");
        self.frames
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let sections = vec![
        pie_demo()?,
        donut_demo()?,
        lollipop_demo()?,
        bar_demo()?,
        line_demo()?,
    ];

    let html = html::render_report("Dashviz charts demo", &sections);
    std::fs::write("dashviz_demo.html", html)?;
    println!("wrote dashviz_demo.html");
    Ok(())
}

fn first_bucket_points(json: &str) -> Result<Vec<DataPoint>, Box<dyn Error>> {
    let buckets = parse_analytics(json)?;
    Ok(buckets
        .first()
        .map(|(_, bucket)| bucket.points())
        .unwrap_or_default())
}

fn pie_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let size = Size::new(320.0, 240.0);
    let mut rec = Recorder::new(Chart::with_defaults(ChartKind::Pie, size));

    rec.chart
        .set_data(&first_bucket_points(ANALYTICS)?, Duration::ZERO);
    rec.snapshot("initial: 10 / 7 / 3", Duration::ZERO);

    let start = 1000 * MS;
    rec.chart
        .set_data(&first_bucket_points(ANALYTICS_NEXT)?, start);
    for ms in [60, 180, 400, 750] {
        rec.snapshot(format!("+{ms} ms"), start + ms * MS);
    }

    let center = rec.chart.displayed().pie.map_or(Point::ZERO, |p| p.center);
    rec.hover("hover: right half", center + kurbo::Vec2::new(20.0, 0.0));

    Ok(html::HtmlSection {
        title: "Pie: job status",
        description: "Count, succeeded and failed for one category. The update animates slice angles and counts the center label up from 10 to 20.",
        frames: rec.finish(),
    })
}

fn donut_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let config = ChartConfig::from_json(
        r#"{
            "transition_ms": 600,
            "easing": "cubic_in_out",
            "pie": {"inner_radius_ratio": 0.55, "headline": "sum"}
        }"#,
    )?;
    let size = Size::new(320.0, 240.0);
    let mut rec = Recorder::new(Chart::new(ChartKind::Pie, size, &config)?);

    let buckets = parse_analytics(ANALYTICS)?;
    rec.chart
        .set_data(&category_series(&buckets, Metric::Count), Duration::ZERO);
    rec.snapshot("count per category", Duration::ZERO);

    let next = parse_analytics(ANALYTICS_NEXT)?;
    let start = 500 * MS;
    rec.chart
        .set_data(&category_series(&next, Metric::Count), start);
    rec.snapshot("+150 ms", start + 150 * MS);
    // Superseded mid-flight: the donut converges to the newest data.
    rec.chart
        .set_data(&category_series(&next, Metric::Failed), start + 150 * MS);
    for ms in [300, 900] {
        rec.snapshot(format!("+{ms} ms (failed)"), start + ms * MS);
    }

    Ok(html::HtmlSection {
        title: "Donut: categories",
        description: "Configured from JSON: inner radius, cubic easing and a summed center label. A second update supersedes the first mid-transition.",
        frames: rec.finish(),
    })
}

fn lollipop_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let size = Size::new(420.0, 240.0);
    let mut rec = Recorder::new(Chart::with_defaults(ChartKind::Lollipop, size));

    let buckets = parse_analytics(ANALYTICS)?;
    rec.chart
        .set_data(&category_series(&buckets, Metric::Succeeded), Duration::ZERO);
    rec.snapshot("succeeded", Duration::ZERO);

    let next = parse_analytics(ANALYTICS_NEXT)?;
    let start = 1000 * MS;
    rec.chart
        .set_data(&category_series(&next, Metric::Succeeded), start);
    for ms in [150, 750] {
        rec.snapshot(format!("+{ms} ms"), start + ms * MS);
    }

    Ok(html::HtmlSection {
        title: "Lollipop: succeeded jobs",
        description: "Categories are matched by name: `subtitle` shrinks out, `archive` grows in, the rest move to their new bands.",
        frames: rec.finish(),
    })
}

fn bar_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let size = Size::new(420.0, 240.0);
    let mut rec = Recorder::new(Chart::with_defaults(ChartKind::Bar, size));

    let buckets = parse_analytics(ANALYTICS)?;
    rec.chart
        .set_data(&category_series(&buckets, Metric::Failed), Duration::ZERO);
    rec.snapshot("failed", Duration::ZERO);

    rec.chart.resize(Size::new(300.0, 200.0), 100 * MS);
    rec.snapshot("resized", 100 * MS);

    let plot = rec.chart.displayed().plot;
    rec.hover("hover", Point::new(plot.x0 + 0.3 * plot.width(), plot.center().y));

    Ok(html::HtmlSection {
        title: "Bar: failed jobs",
        description: "The same band layout as the lollipop chart, with a resize and a hover reading.",
        frames: rec.finish(),
    })
}

fn line_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let size = Size::new(480.0, 240.0);
    let mut rec = Recorder::new(Chart::with_defaults(ChartKind::Line, size));

    let traffic = parse_series(TRAFFIC)?;
    rec.chart.set_data(&traffic, Duration::ZERO);
    rec.snapshot("traffic", Duration::ZERO);

    let (a, b) = {
        let data = &rec.chart.displayed().data;
        let anchor = |i: usize| {
            data.get(i)
                .and_then(|d| d.geometry.anchor())
                .unwrap_or(Point::ZERO)
        };
        (anchor(1), anchor(2))
    };
    let y = rec.chart.displayed().plot.center().y;
    rec.hover("between 03-02 and 03-03", Point::new(0.5 * (a.x + b.x), y));
    rec.hover("on 03-03", Point::new(b.x, y));

    // Slide the window by one day while hovering.
    let mut next: Vec<DataPoint> = traffic.iter().skip(1).cloned().collect();
    next.push(DataPoint::new("03-08", 260.0));
    let start = 1000 * MS;
    rec.chart.set_data(&next, start);
    for ms in [150, 750] {
        rec.snapshot(format!("+{ms} ms"), start + ms * MS);
    }

    Ok(html::HtmlSection {
        title: "Line: daily traffic",
        description: "Hover interpolates between neighbouring days and snaps on a day. A missing value reads as zero.",
        frames: rec.finish(),
    })
}
