// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.
//!
//! [`ChartConfig`] is the serialisable form (colors as CSS strings, durations in milliseconds);
//! [`ChartConfig::resolve`] validates it into a [`Theme`] of parsed paints that the projector and
//! renderer consume.

use std::time::Duration;

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{ChartError, Result};
use crate::scale::ScaleOrdinal;

/// The d3 `schemeTableau10` palette, used for category colors by default.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Upper bound accepted for [`ChartConfig::tick_count`].
pub const MAX_TICK_COUNT: usize = 1000;

const DEFAULT_PALETTE_RGB: [(u8, u8, u8); 10] = [
    (0x4e, 0x79, 0xa7),
    (0xf2, 0x8e, 0x2c),
    (0xe1, 0x57, 0x59),
    (0x76, 0xb7, 0xb2),
    (0x59, 0xa1, 0x4f),
    (0xed, 0xc9, 0x49),
    (0xaf, 0x7a, 0xa1),
    (0xff, 0x9d, 0xa7),
    (0x9c, 0x75, 0x5f),
    (0xba, 0xb0, 0xab),
];

/// Outer margins between the container edge and the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin (room for category labels).
    pub bottom: f64,
    /// Left margin (room for the value axis).
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

/// What the pie center shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadlineMode {
    /// The value of the first data point (the `count` bucket in analytics data).
    #[default]
    First,
    /// The sum of all values.
    Sum,
    /// No center label.
    None,
}

/// Pie/donut options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieConfig {
    /// Inner radius as a fraction of the outer radius; `0` draws a pie, `> 0` a donut.
    pub inner_radius_ratio: f64,
    /// Whether to draw percentage labels joined to slices by leader lines.
    pub leader_labels: bool,
    /// Radial distance from the outer radius to the label elbow.
    pub label_offset: f64,
    /// What the center shows.
    pub headline: HeadlineMode,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            inner_radius_ratio: 0.0,
            leader_labels: true,
            label_offset: 16.0,
            headline: HeadlineMode::First,
        }
    }
}

/// Tooltip overlay styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Background color.
    pub background: String,
    /// Text color.
    pub text_color: String,
    /// Font size.
    pub font_size: f64,
    /// Padding around the text.
    pub padding: f64,
    /// Radius of the hover marker circle.
    pub marker_radius: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            background: "#222222".to_string(),
            text_color: "#ffffff".to_string(),
            font_size: 11.0,
            padding: 6.0,
            marker_radius: 4.0,
        }
    }
}

/// Serialisable chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Transition length in milliseconds.
    pub transition_ms: u64,
    /// Transition easing curve.
    pub easing: Easing,
    /// Plot margins.
    pub margin: Margins,
    /// Band scale inner padding (fraction of a band).
    pub band_padding_inner: f64,
    /// Band scale outer padding (fraction of a band).
    pub band_padding_outer: f64,
    /// Point scale outer padding (fraction of a step).
    pub point_padding: f64,
    /// Approximate value-axis tick count.
    pub tick_count: usize,
    /// Value-axis headroom factor applied to the data maximum.
    pub headroom: f64,
    /// Pie options.
    pub pie: PieConfig,
    /// Category palette as CSS colors, indexed by category order.
    pub palette: Vec<String>,
    /// Lollipop stem width.
    pub stem_width: f64,
    /// Lollipop head and line vertex radius.
    pub dot_radius: f64,
    /// Line chart stroke width.
    pub line_width: f64,
    /// Label font size.
    pub font_size: f64,
    /// Pie center label font size.
    pub headline_font_size: f64,
    /// Label color.
    pub text_color: String,
    /// Axis rule color.
    pub axis_color: String,
    /// Tooltip options.
    pub tooltip: TooltipConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            transition_ms: 750,
            easing: Easing::ExpOut,
            margin: Margins::default(),
            band_padding_inner: 0.3,
            band_padding_outer: 0.2,
            point_padding: 0.5,
            tick_count: 5,
            headroom: 1.1,
            pie: PieConfig::default(),
            palette: DEFAULT_PALETTE.iter().map(|s| (*s).to_string()).collect(),
            stem_width: 2.0,
            dot_radius: 5.0,
            line_width: 2.0,
            font_size: 11.0,
            headline_font_size: 24.0,
            text_color: "#333333".to_string(),
            axis_color: "#666666".to_string(),
            tooltip: TooltipConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.resolve()?;
        Ok(config)
    }

    /// The transition length.
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Validates the configuration and parses its colors.
    pub fn resolve(&self) -> Result<Theme> {
        if self.palette.is_empty() {
            return Err(ChartError::InvalidConfig("palette must not be empty".into()));
        }
        if !(0.0..1.0).contains(&self.pie.inner_radius_ratio) {
            return Err(ChartError::InvalidConfig(format!(
                "pie.inner_radius_ratio must be in [0, 1), got {}",
                self.pie.inner_radius_ratio
            )));
        }
        if !(self.headroom.is_finite() && self.headroom >= 1.0) {
            return Err(ChartError::InvalidConfig(format!(
                "headroom must be >= 1, got {}",
                self.headroom
            )));
        }
        if !(1..=MAX_TICK_COUNT).contains(&self.tick_count) {
            return Err(ChartError::InvalidConfig(format!(
                "tick_count must be in 1..={MAX_TICK_COUNT}, got {}",
                self.tick_count
            )));
        }

        let palette = self
            .palette
            .iter()
            .map(|s| parse_css_color(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(Theme {
            palette: ScaleOrdinal::new(palette),
            text: parse_css_color(&self.text_color)?,
            axis: parse_css_color(&self.axis_color)?,
            tooltip_background: parse_css_color(&self.tooltip.background)?,
            tooltip_text: parse_css_color(&self.tooltip.text_color)?,
        })
    }
}

/// Parsed paints derived from a [`ChartConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Category colors.
    pub palette: ScaleOrdinal,
    /// Label color.
    pub text: Color,
    /// Axis rule color.
    pub axis: Color,
    /// Tooltip background.
    pub tooltip_background: Color,
    /// Tooltip text.
    pub tooltip_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            palette: ScaleOrdinal::new(
                DEFAULT_PALETTE_RGB
                    .iter()
                    .map(|&(r, g, b)| Color::from_rgb8(r, g, b))
                    .collect(),
            ),
            text: Color::from_rgb8(0x33, 0x33, 0x33),
            axis: Color::from_rgb8(0x66, 0x66, 0x66),
            tooltip_background: Color::from_rgb8(0x22, 0x22, 0x22),
            tooltip_text: Color::from_rgb8(0xff, 0xff, 0xff),
        }
    }
}

fn parse_css_color(value: &str) -> Result<Color> {
    parse_color(value)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|err| ChartError::InvalidColor {
            value: value.to_string(),
            reason: format!("{err:?}"),
        })
}
