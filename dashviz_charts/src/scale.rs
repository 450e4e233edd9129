// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: pure mappings from data space into pixel space.
//!
//! Scales are cheap `Copy` values (the ordinal palette aside) and are rebuilt whenever the data
//! set or the plot size changes.

use peniko::Color;
use peniko::color::palette::css;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to "nice" the domain based on tick generation.
    pub nice: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps everything to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    ///
    /// A degenerate range maps everything to the start of the domain.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (y - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// The configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns "nice-ish" tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// A value axis starting at zero with `headroom` applied to `max`.
    ///
    /// Non-positive or non-finite maxima fall back to the unit domain so the scale never divides
    /// by zero. The result is niced.
    pub fn value_axis(max: f64, headroom: f64) -> Self {
        let top = max * headroom;
        let domain = if top.is_finite() && top > 0.0 {
            (0.0, top)
        } else {
            (0.0, 1.0)
        };
        Self::new(domain).with_nice(true)
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        let ticks = nice_ticks(self.domain.0, self.domain.1, tick_count);
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let eps = 1e-9 * lo.abs().max(hi.abs()).max(1.0);
        match ticks[..] {
            // A truncated tick list must not shrink the domain.
            [first, .., last] if first <= lo + eps && last >= hi - eps => (first, last),
            _ => self.domain,
        }
    }

    /// Instantiates a concrete scale using the `resolved_domain` (respecting `nice`).
    pub fn instantiate(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step = nice_step(span / count as f64);
    if step == 0.0 {
        return vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round().min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "finite, non-negative and capped at 10k"
    )]
    let n = n_f.max(0.0) as u64;
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete band scale for categorical charts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the leading edge of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width();
        let step = bw * (1.0 + self.padding_inner);
        let start = r0.min(r1);
        start + bw * self.padding_outer + step * index as f64
    }

    /// Returns the center of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + self.band_width() * 0.5
    }
}

/// A discrete point scale (like band without width).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePoint {
    range: (f64, f64),
    count: usize,
    padding: f64,
}

impl ScalePoint {
    /// Creates a new point scale.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding: 0.5,
        }
    }

    /// Sets the outer padding in point steps.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Distance between neighbouring points.
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        let span = (r1 - r0).abs();
        let denom = (n - 1.0) + 2.0 * self.padding;
        if denom <= 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the x-position for a point at `index`.
    ///
    /// With the default padding a single point lands in the middle of the range.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let step = self.step();
        let start = r0.min(r1);
        start + self.padding * step + step * index as f64
    }
}

/// A deterministic ordinal color scale indexed by category order.
///
/// Index `i` always maps to the same color; indices past the end of the palette wrap.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOrdinal {
    palette: Vec<Color>,
}

impl ScaleOrdinal {
    /// Creates a scale over the given palette.
    pub fn new(palette: Vec<Color>) -> Self {
        Self { palette }
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.palette.len()
    }

    /// Returns `true` if the palette has no colors.
    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }

    /// Color for the category at `index`.
    pub fn color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return css::GRAY;
        }
        self.palette[index % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_scale_positions_are_monotonic() {
        let scale = ScalePoint::new((0.0, 100.0), 5);
        let a = scale.x(0);
        let b = scale.x(1);
        let c = scale.x(2);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn single_point_is_centered() {
        let scale = ScalePoint::new((0.0, 100.0), 1);
        assert_eq!(scale.x(0), 50.0);
        assert!(ScalePoint::new((0.0, 100.0), 0).step() == 0.0);
    }

    #[test]
    fn band_centers_are_evenly_spaced() {
        let band = ScaleBand::new((0.0, 300.0), 3).with_padding(0.2, 0.1);
        let d1 = band.center(1) - band.center(0);
        let d2 = band.center(2) - band.center(1);
        assert!((d1 - d2).abs() < 1e-9);
        assert!(band.x(0) > 0.0);
        assert!(band.x(2) + band.band_width() < 300.0);
        assert_eq!(ScaleBand::new((0.0, 300.0), 0).band_width(), 0.0);
    }

    #[test]
    fn value_axis_has_headroom_and_is_niced() {
        let spec = ScaleLinearSpec::value_axis(10.0, 1.1);
        assert_eq!(spec.domain.0, 0.0);
        assert!((spec.domain.1 - 11.0).abs() < 1e-9);
        assert_eq!(spec.resolved_domain(5), (0.0, 12.0));

        let scale = spec.instantiate((200.0, 0.0), 5);
        assert_eq!(scale.map(0.0), 200.0);
        assert_eq!(scale.map(12.0), 0.0);
        assert!((scale.invert(scale.map(7.5)) - 7.5).abs() < 1e-9);
    }

    #[test]
    fn huge_tick_counts_still_cover_the_data() {
        let spec = ScaleLinearSpec::value_axis(10.0, 1.1);
        let (lo, hi) = spec.resolved_domain(100_000);
        assert!(lo <= 0.0);
        assert!(hi >= 11.0, "domain shrank to {hi}");
        let scale = spec.instantiate((200.0, 0.0), 100_000);
        assert!(scale.map(10.0) >= 0.0);
    }

    #[test]
    fn zero_maximum_uses_unit_domain() {
        let spec = ScaleLinearSpec::value_axis(0.0, 1.1);
        assert_eq!(spec.domain, (0.0, 1.0));
        let scale = spec.instantiate((100.0, 0.0), 5);
        assert!(scale.map(0.0).is_finite());
        assert_eq!(ScaleLinear::new((3.0, 3.0), (0.0, 10.0)).map(9.0), 0.0);
    }

    #[test]
    fn ordinal_wraps() {
        let ord = ScaleOrdinal::new(vec![css::RED, css::BLUE]);
        assert_eq!(ord.color(0), css::RED);
        assert_eq!(ord.color(3), css::BLUE);
        assert_eq!(ScaleOrdinal::new(Vec::new()).color(4), css::GRAY);
    }
}
