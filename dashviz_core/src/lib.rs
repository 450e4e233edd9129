// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode mark model for dashboard charts.
//!
//! Charts describe what they want on screen as a flat list of [`Mark`]s, each with a stable
//! [`MarkId`]. A [`Scene`] remembers the previous list and, on every [`Scene::tick`], reports the
//! difference as [`MarkDiff`]s:
//! - `Enter` for ids it has not seen,
//! - `Update` for ids whose payload, z-order or visibility changed,
//! - `Exit` for ids that are no longer emitted.
//!
//! Hosts (an SVG writer, a DOM binding, a GPU renderer) only ever apply diffs, so shapes are
//! reconciled by identity instead of being cleared and redrawn.

mod mark;
mod scene;

pub use mark::{
    Mark, MarkBuilder, MarkId, MarkKind, MarkPayload, PathMarkBuilder, PathPayload,
    RectMarkBuilder, RectPayload, TextAnchor, TextBaseline, TextMarkBuilder, TextPayload,
};
pub use scene::{MarkDiff, Scene};
