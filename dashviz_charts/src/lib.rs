// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated dashboard charts on top of `dashviz_core`.
//!
//! The pipeline has four stages, each usable on its own:
//! - **Projection** ([`DatumProjector`]) maps data points and a container size to a
//!   [`GeometryFrame`]: angles for pies, stems or bars on a band scale, line vertices on a point
//!   scale.
//! - **Transitions** ([`Transition`]) interpolate between frames by category key, so entering
//!   data grow in, exiting data shrink out, and updates tween in place.
//! - **Rendering** ([`ShapeRenderer`]) turns a frame into stable-identity
//!   [`dashviz_core::Mark`]s, which [`dashviz_core::Scene`] diffs into enter/update/exit.
//! - **Hover** ([`derive_hover`]) probes a frame at a pointer position.
//!
//! [`Chart`] wires these together as a small state machine driven by explicit timestamps, and
//! [`SvgScene`] applies its diffs to an SVG document.
//!
//! Text shaping is out of scope; text marks store unshaped strings.

mod axis;
mod chart;
mod config;
mod data;
mod easing;
mod error;
mod frame;
mod hover;
mod line_mark;
mod point_mark;
mod projector;
mod rect_mark;
mod render;
mod rule_mark;
mod scale;
mod sector_mark;
mod svg;
mod text_mark;
mod transition;
mod z_order;

pub use axis::{AxisStyle, CategoryAxisSpec, StrokeStyle, ValueAxisSpec, format_tick};
pub use chart::{Chart, ChartPhase};
pub use config::{
    ChartConfig, DEFAULT_PALETTE, HeadlineMode, MAX_TICK_COUNT, Margins, PieConfig, Theme,
    TooltipConfig,
};
pub use data::{
    AnalyticsBucket, DataPoint, Metric, category_series, parse_analytics, parse_series,
    sanitize,
};
pub use easing::Easing;
pub use error::{ChartError, Result};
pub use frame::{ChartKind, Geometry, GeometryFrame, PieGeometry, ProjectedDatum};
pub use hover::{HoverReading, HoverState, SNAP_EPSILON, derive_hover};
pub use line_mark::LineMarkSpec;
pub use point_mark::PointMarkSpec;
pub use projector::{DatumProjector, PIE_START_ANGLE, Size};
pub use rect_mark::RectMarkSpec;
pub use render::{ShapeRenderer, format_headline, format_percent, format_value, role};
pub use rule_mark::RuleMarkSpec;
pub use scale::{ScaleBand, ScaleLinear, ScaleLinearSpec, ScaleOrdinal, ScalePoint};
pub use sector_mark::SectorMarkSpec;
pub use svg::SvgScene;
pub use text_mark::TextMarkSpec;
pub use transition::{Phase, Transition};
pub use z_order::*;
