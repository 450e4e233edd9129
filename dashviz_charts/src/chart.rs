// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart state machine.
//!
//! A [`Chart`] owns one chart instance: its data, the displayed geometry, at most one in-flight
//! [`Transition`], the hover state and the retained [`Scene`]. The host drives it with explicit
//! timestamps and forwards the returned diffs to its drawing surface.
//!
//! ```text
//! Empty --set_data--> Rendered --set_data--> Transitioning --frame(done)--> Rendered
//! ```
//!
//! Hover is orthogonal to these phases.

use std::time::Duration;

use dashviz_core::{MarkDiff, Scene};
use kurbo::Point;

use crate::config::{ChartConfig, Theme};
use crate::data::DataPoint;
use crate::error::Result;
use crate::frame::{ChartKind, GeometryFrame};
use crate::hover::{HoverReading, HoverState, derive_hover};
use crate::projector::{DatumProjector, Size};
use crate::render::ShapeRenderer;
use crate::transition::Transition;

/// Default mark id base for a chart.
const DEFAULT_ID_BASE: u64 = 0x0001_0000;

/// Lifecycle phase of a [`Chart`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartPhase {
    /// No data has been drawn yet.
    Empty,
    /// The displayed geometry matches the latest data.
    Rendered,
    /// Animating towards the latest data.
    Transitioning,
}

/// A single mounted chart.
#[derive(Debug)]
pub struct Chart {
    kind: ChartKind,
    size: Size,
    projector: DatumProjector,
    renderer: ShapeRenderer,
    data: Vec<DataPoint>,
    displayed: GeometryFrame,
    transition: Option<Transition>,
    rendered: bool,
    pointer: Option<Point>,
    hover: HoverState,
    last_reading: Option<HoverReading>,
    scene: Scene,
}

impl Chart {
    /// Creates a chart, validating `config`.
    pub fn new(kind: ChartKind, size: Size, config: &ChartConfig) -> Result<Self> {
        let theme = config.resolve()?;
        Ok(Self::with_theme(kind, size, config.clone(), theme))
    }

    /// Creates a chart with the default configuration.
    pub fn with_defaults(kind: ChartKind, size: Size) -> Self {
        Self::with_theme(kind, size, ChartConfig::default(), Theme::default())
    }

    fn with_theme(kind: ChartKind, size: Size, config: ChartConfig, theme: Theme) -> Self {
        let projector = DatumProjector::new(config.clone(), theme.clone());
        let displayed = GeometryFrame::empty(kind, projector.plot_rect(size));
        Self {
            kind,
            size,
            projector,
            renderer: ShapeRenderer::new(DEFAULT_ID_BASE, config, theme),
            data: Vec::new(),
            displayed,
            transition: None,
            rendered: false,
            pointer: None,
            hover: HoverState::Hidden,
            last_reading: None,
            scene: Scene::new(),
        }
    }

    /// Uses `id_base` for mark ids, so several charts can share one host scene.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.renderer = ShapeRenderer::new(
            id_base,
            self.projector.config().clone(),
            self.projector.theme().clone(),
        );
        self
    }

    /// The chart kind.
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// The container size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The configuration.
    pub fn config(&self) -> &ChartConfig {
        self.projector.config()
    }

    /// The latest data.
    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> ChartPhase {
        if self.transition.is_some() {
            ChartPhase::Transitioning
        } else if self.rendered {
            ChartPhase::Rendered
        } else {
            ChartPhase::Empty
        }
    }

    /// The geometry as of the last [`frame`](Self::frame) or data change.
    pub fn displayed(&self) -> &GeometryFrame {
        &self.displayed
    }

    /// The geometry the chart converges to.
    pub fn target(&self) -> &GeometryFrame {
        self.transition
            .as_ref()
            .map_or(&self.displayed, Transition::target)
    }

    /// The hover state.
    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    /// Returns `true` while the tooltip is shown.
    pub fn is_hovering(&self) -> bool {
        self.hover.is_active()
    }

    /// Replaces the data.
    ///
    /// The first data snaps into place. Later changes start a transition from whatever is on
    /// screen at `now`; an in-flight transition is superseded, never queued. Call
    /// [`frame`](Self::frame) to obtain the resulting diffs.
    pub fn set_data(&mut self, points: &[DataPoint], now: Duration) {
        self.data = points.to_vec();
        let next = self.projector.project(self.kind, &self.data, self.size);
        self.retarget(next, now);
    }

    /// Changes the container size.
    ///
    /// A settled chart snaps to the new layout; an animating one retargets its transition.
    pub fn resize(&mut self, size: Size, now: Duration) {
        if size == self.size {
            return;
        }
        tracing::debug!(width = size.width, height = size.height, "resize");
        self.size = size;
        let next = self.projector.project(self.kind, &self.data, size);
        if self.transition.is_some() {
            self.retarget(next, now);
        } else {
            self.displayed = next;
            self.refresh_hover();
        }
    }

    fn retarget(&mut self, next: GeometryFrame, now: Duration) {
        if !self.rendered {
            self.rendered = !next.is_empty();
            self.displayed = next;
            return;
        }

        let from = match self.transition.take() {
            Some(in_flight) if !in_flight.is_finished(now) => {
                tracing::debug!(
                    started_ms = in_flight.started().as_millis(),
                    now_ms = now.as_millis(),
                    "superseding in-flight transition"
                );
                in_flight.sample(now)
            }
            Some(done) => done.into_target(),
            None => self.displayed.clone(),
        };

        let duration = self.config().transition();
        if duration.is_zero() {
            self.displayed = next;
            self.refresh_hover();
            return;
        }
        tracing::debug!(
            ?duration,
            from = from.data.len(),
            to = next.data.len(),
            "transition started"
        );
        let transition = Transition::between(&from, next, now, duration, self.config().easing);
        self.displayed = from;
        self.transition = Some(transition);
    }

    /// Advances to `now` and returns the diffs to apply.
    ///
    /// Rendering the same state twice yields no diffs.
    pub fn frame(&mut self, now: Duration) -> Vec<MarkDiff> {
        if let Some(transition) = &self.transition {
            self.displayed = transition.sample(now);
            if transition.is_finished(now) {
                tracing::debug!(now_ms = now.as_millis(), "transition complete");
                self.transition = None;
            }
            self.refresh_hover();
        }
        self.emit()
    }

    /// Moves the pointer to `pointer` (chart coordinates) and returns the overlay diffs.
    pub fn pointer_move(&mut self, pointer: Point) -> Vec<MarkDiff> {
        self.pointer = Some(pointer);
        self.refresh_hover();
        self.emit()
    }

    /// The pointer left the chart: hides the overlay.
    pub fn pointer_leave(&mut self) -> Vec<MarkDiff> {
        self.pointer = None;
        self.hover = HoverState::Hidden;
        self.emit()
    }

    /// Tears the chart down, returning exit diffs for every mark it drew.
    ///
    /// Any in-flight transition is cancelled; consuming `self` guarantees no later update.
    pub fn unmount(mut self) -> Vec<MarkDiff> {
        if self.transition.take().is_some() {
            tracing::debug!("cancelled in-flight transition on unmount");
        }
        tracing::debug!(marks = self.scene.len(), "unmount");
        self.scene.clear()
    }

    fn refresh_hover(&mut self) {
        let Some(pointer) = self.pointer else {
            return;
        };
        self.hover = derive_hover(&self.displayed, pointer);
        if let Some(reading) = self.hover.reading() {
            self.last_reading = Some(reading.clone());
        }
    }

    fn emit(&mut self) -> Vec<MarkDiff> {
        let mut marks = self.renderer.marks(&self.displayed);
        if self.rendered {
            marks.extend(self.renderer.overlay_marks(
                self.last_reading.as_ref(),
                self.hover.is_active(),
                self.displayed.plot,
            ));
        }
        self.scene.tick(marks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn pts(values: &[(&str, f64)]) -> Vec<DataPoint> {
        values.iter().map(|&(l, v)| DataPoint::new(l, v)).collect()
    }

    #[test]
    fn phases_follow_the_lifecycle() {
        let mut chart = Chart::with_defaults(ChartKind::Bar, Size::new(300.0, 200.0));
        assert_eq!(chart.phase(), ChartPhase::Empty);
        assert!(chart.frame(Duration::ZERO).is_empty());

        chart.set_data(&pts(&[("a", 1.0)]), Duration::ZERO);
        assert_eq!(chart.phase(), ChartPhase::Rendered);
        assert!(!chart.frame(Duration::ZERO).is_empty());

        chart.set_data(&pts(&[("a", 2.0)]), 10 * MS);
        assert_eq!(chart.phase(), ChartPhase::Transitioning);
        chart.frame(400 * MS);
        assert_eq!(chart.phase(), ChartPhase::Transitioning);
        chart.frame(760 * MS);
        assert_eq!(chart.phase(), ChartPhase::Rendered);
        assert_eq!(chart.displayed(), chart.target());
    }

    #[test]
    fn empty_first_data_stays_empty() {
        let mut chart = Chart::with_defaults(ChartKind::Pie, Size::new(300.0, 200.0));
        chart.set_data(&[], Duration::ZERO);
        assert_eq!(chart.phase(), ChartPhase::Empty);
        assert!(chart.frame(Duration::ZERO).is_empty());
        assert!(chart.pointer_move(Point::new(150.0, 100.0)).is_empty());
        assert!(!chart.is_hovering());
    }

    #[test]
    fn zero_duration_config_snaps() {
        let config = ChartConfig {
            transition_ms: 0,
            ..ChartConfig::default()
        };
        let mut chart = Chart::new(ChartKind::Line, Size::new(300.0, 200.0), &config).unwrap();
        chart.set_data(&pts(&[("d1", 1.0)]), Duration::ZERO);
        chart.frame(Duration::ZERO);
        chart.set_data(&pts(&[("d1", 3.0)]), MS);
        assert_eq!(chart.phase(), ChartPhase::Rendered);
        assert_eq!(chart.displayed().data[0].value, 3.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ChartConfig {
            palette: Vec::new(),
            ..ChartConfig::default()
        };
        assert!(Chart::new(ChartKind::Pie, Size::new(10.0, 10.0), &config).is_err());
    }

    #[test]
    fn resize_relayouts_a_settled_chart() {
        let mut chart = Chart::with_defaults(ChartKind::Lollipop, Size::new(300.0, 200.0));
        chart.set_data(&pts(&[("a", 1.0), ("b", 2.0)]), Duration::ZERO);
        chart.frame(Duration::ZERO);
        chart.resize(Size::new(600.0, 200.0), MS);
        assert_eq!(chart.phase(), ChartPhase::Rendered);
        assert_eq!(chart.displayed().plot.x1, 580.0);
        let diffs = chart.frame(MS);
        assert!(
            diffs
                .iter()
                .all(|d| !matches!(d, MarkDiff::Enter { .. } | MarkDiff::Exit { .. })),
            "categories move in place"
        );
    }

    #[test]
    fn distinct_id_bases_do_not_collide() {
        let mut a = Chart::with_defaults(ChartKind::Bar, Size::new(300.0, 200.0));
        let mut b =
            Chart::with_defaults(ChartKind::Bar, Size::new(300.0, 200.0)).with_id_base(0x0002_0000);
        a.set_data(&pts(&[("x", 1.0)]), Duration::ZERO);
        b.set_data(&pts(&[("x", 1.0)]), Duration::ZERO);
        let ids_a: Vec<_> = a.frame(Duration::ZERO).iter().map(MarkDiff::id).collect();
        let ids_b: Vec<_> = b.frame(Duration::ZERO).iter().map(MarkDiff::id).collect();
        assert!(ids_a.iter().all(|id| !ids_b.contains(id)));
    }
}
