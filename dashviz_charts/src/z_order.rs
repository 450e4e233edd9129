// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Renderers sort by `(z_index, MarkId)`, so equal values tie-break deterministically.

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = -20;
/// Axis tick and category labels.
pub const AXIS_LABELS: i32 = -10;

/// Filled series marks (slices, bars).
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks (lines, stems).
pub const SERIES_STROKE: i32 = 10;
/// Point series marks drawn above lines.
pub const SERIES_POINTS: i32 = 20;

/// Pie leader lines.
pub const LEADER_LINES: i32 = 30;
/// Pie percentage labels.
pub const SERIES_LABELS: i32 = 40;
/// Pie center label.
pub const HEADLINE: i32 = 50;

/// Hover marker circle.
pub const HOVER_MARKER: i32 = 90;
/// Tooltip background.
pub const TOOLTIP_BACKGROUND: i32 = 100;
/// Tooltip text.
pub const TOOLTIP_TEXT: i32 = 110;
