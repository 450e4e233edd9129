// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed interpolation between two geometry frames.
//!
//! A [`Transition`] pairs the data of a *from* frame (whatever is on screen when the transition
//! starts) with the data of a *to* frame by key:
//! - keys in both frames tween from old to new geometry and value,
//! - keys only in the target enter from their collapsed geometry,
//! - keys only in the source exit to their collapsed geometry and are gone once it completes.
//!
//! Sampling is a pure function of the timestamp.

use std::time::Duration;

use hashbrown::HashMap;
use peniko::Color;

use crate::easing::Easing;
use crate::frame::{Geometry, GeometryFrame, ProjectedDatum, lerp};

/// How a datum takes part in a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Present before and after.
    Update,
    /// Only present after.
    Enter,
    /// Only present before.
    Exit,
}

#[derive(Clone, Debug)]
struct Tween {
    key: String,
    phase: Phase,
    color: Color,
    value: (f64, f64),
    geometry: (Geometry, Geometry),
}

/// An in-flight interpolation towards a target frame.
#[derive(Clone, Debug)]
pub struct Transition {
    target: GeometryFrame,
    tweens: Vec<Tween>,
    headline: Option<(f64, f64)>,
    started: Duration,
    duration: Duration,
    easing: Easing,
}

impl Transition {
    /// Plans a transition from `from` (the displayed frame) to `to`.
    pub fn between(
        from: &GeometryFrame,
        to: GeometryFrame,
        started: Duration,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        let old: HashMap<&str, &ProjectedDatum> =
            from.data.iter().map(|d| (d.key.as_str(), d)).collect();

        let mut tweens: Vec<Tween> = to
            .data
            .iter()
            .map(|d| match old.get(d.key.as_str()) {
                Some(prev) => Tween {
                    key: d.key.clone(),
                    phase: Phase::Update,
                    color: d.color,
                    value: (prev.value, d.value),
                    geometry: (prev.geometry, d.geometry),
                },
                None => Tween {
                    key: d.key.clone(),
                    phase: Phase::Enter,
                    color: d.color,
                    value: (0.0, d.value),
                    geometry: (d.geometry.collapsed(), d.geometry),
                },
            })
            .collect();

        tweens.extend(
            from.data
                .iter()
                .filter(|d| to.get(&d.key).is_none())
                .map(|d| Tween {
                    key: d.key.clone(),
                    phase: Phase::Exit,
                    color: d.color,
                    value: (d.value, 0.0),
                    geometry: (d.geometry, d.geometry.collapsed()),
                }),
        );

        let headline = match (from.headline, to.headline) {
            (None, None) => None,
            (a, b) => Some((a.unwrap_or(0.0), b.unwrap_or(0.0))),
        };

        Self {
            target: to,
            tweens,
            headline,
            started,
            duration,
            easing,
        }
    }

    /// The frame this transition converges to.
    pub fn target(&self) -> &GeometryFrame {
        &self.target
    }

    /// Consumes the transition, returning its target.
    pub fn into_target(self) -> GeometryFrame {
        self.target
    }

    /// When the transition started.
    pub fn started(&self) -> Duration {
        self.started
    }

    /// The phase of the datum with `key`, if it takes part.
    pub fn phase_of(&self, key: &str) -> Option<Phase> {
        self.tweens.iter().find(|t| t.key == key).map(|t| t.phase)
    }

    /// Linear progress in `[0, 1]` at `now`.
    pub fn linear_progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Whether the transition has completed at `now`.
    pub fn is_finished(&self, now: Duration) -> bool {
        self.linear_progress(now) >= 1.0
    }

    /// The displayed geometry at `now`.
    ///
    /// Once finished this is exactly the target frame; exiting data are gone.
    pub fn sample(&self, now: Duration) -> GeometryFrame {
        if self.is_finished(now) {
            return self.target.clone();
        }
        let t = self.easing.apply(self.linear_progress(now));

        let data = self
            .tweens
            .iter()
            .map(|tw| ProjectedDatum {
                key: tw.key.clone(),
                value: lerp(tw.value.0, tw.value.1, t),
                color: tw.color,
                geometry: tw.geometry.0.lerp(&tw.geometry.1, t),
            })
            .collect();

        GeometryFrame {
            kind: self.target.kind,
            plot: self.target.plot,
            data,
            headline: self.headline.map(|(a, b)| lerp(a, b, t)),
            value_scale: self.target.value_scale,
            pie: self.target.pie,
        }
    }
}
