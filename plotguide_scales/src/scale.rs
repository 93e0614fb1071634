// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: a domain mapped onto a position or color range.

extern crate alloc;

use alloc::vec::Vec;

use peniko::Color;
use plotguide_core::{AxisRange, Break, Categories, Error, Result};

use crate::breaks::{Labels, NumericBreaks, categorical_breaks, index_of};
use crate::palette::{ColorMap, Gradient, Palette};
use crate::time::TemporalBreaks;

/// Which visual channel a scale drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aesthetic {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Fill or stroke color.
    Color,
}

/// The data side of a scale, tagged by kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    /// A continuous numeric interval.
    Numeric(AxisRange),
    /// A continuous interval of timestamps (seconds since the Unix epoch, UTC).
    Temporal(AxisRange),
    /// An ordered set of categories. Category `i` sits at position `i`.
    Categorical(Categories),
}

impl Domain {
    /// The continuous interval, or `None` for categorical domains.
    pub fn range(&self) -> Option<AxisRange> {
        match self {
            Self::Numeric(r) | Self::Temporal(r) => Some(*r),
            Self::Categorical(_) => None,
        }
    }

    /// The positions a categorical domain occupies: `[0, len - 1]`.
    fn index_range(categories: &Categories) -> AxisRange {
        let last = categories.len().saturating_sub(1) as f64;
        AxisRange::finite(0.0, last).unwrap_or(AxisRange::UNIT)
    }

    /// The interval positions are mapped from, before expansion.
    pub fn extent(&self) -> AxisRange {
        match self {
            Self::Numeric(r) | Self::Temporal(r) => *r,
            Self::Categorical(c) => Self::index_range(c),
        }
    }

    /// Whether this is a [`Domain::Categorical`] domain.
    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Categorical(_))
    }
}

/// Padding added around a domain before mapping it to a range.
///
/// Each side grows by `mult * span + add`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expansion {
    /// Fraction of the span added on each side.
    pub mult: f64,
    /// Data units added on each side.
    pub add: f64,
}

impl Expansion {
    /// 5% of the span on each side.
    pub const CONTINUOUS: Self = Self {
        mult: 0.05,
        add: 0.0,
    };
    /// 0.6 category widths on each side.
    pub const DISCRETE: Self = Self {
        mult: 0.0,
        add: 0.6,
    };
    /// No padding.
    pub const NONE: Self = Self {
        mult: 0.0,
        add: 0.0,
    };

    /// Padding with both components.
    pub const fn new(mult: f64, add: f64) -> Self {
        Self { mult, add }
    }
}

/// What happens to values outside a scale's limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutOfBounds {
    /// Dropped: mapping returns `None`.
    #[default]
    Censor,
    /// Moved to the nearest limit.
    Squish,
    /// Mapped as-is, landing outside the range. Used by zoomed views.
    Keep,
}

/// A domain mapped onto a visual range.
///
/// Scales are immutable once built. Position scales map onto whatever pixel interval the
/// caller passes to [`Scale::map`], so one scale can serve several plots of different sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    aesthetic: Aesthetic,
    domain: Domain,
    expansion: Expansion,
    oob: OutOfBounds,
    colors: Option<ColorMap>,
}

impl Scale {
    /// A scale with the defaults for its aesthetic and domain.
    ///
    /// Position scales expand continuous domains by [`Expansion::CONTINUOUS`] and categorical
    /// ones by [`Expansion::DISCRETE`]. Color scales are not expanded and get the default
    /// [`Palette`] or [`Gradient`].
    pub fn new(aesthetic: Aesthetic, domain: Domain) -> Self {
        let (expansion, colors) = match (aesthetic, domain.is_categorical()) {
            (Aesthetic::Color, true) => (
                Expansion::NONE,
                Some(ColorMap::Palette(Palette::default())),
            ),
            (Aesthetic::Color, false) => {
                (Expansion::NONE, Some(ColorMap::Gradient(Gradient::default())))
            }
            (_, true) => (Expansion::DISCRETE, None),
            (_, false) => (Expansion::CONTINUOUS, None),
        };
        Self {
            aesthetic,
            domain,
            expansion,
            oob: OutOfBounds::default(),
            colors,
        }
    }

    /// Sets the expansion.
    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    /// Sets the out-of-bounds policy.
    pub fn with_oob(mut self, oob: OutOfBounds) -> Self {
        self.oob = oob;
        self
    }

    /// Sets the color range. Only meaningful for [`Aesthetic::Color`].
    pub fn with_colors(mut self, colors: ColorMap) -> Self {
        self.colors = Some(colors);
        self
    }

    /// The channel this scale drives.
    pub fn aesthetic(&self) -> Aesthetic {
        self.aesthetic
    }

    /// The data domain.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The padding applied before mapping.
    pub fn expansion(&self) -> Expansion {
        self.expansion
    }

    /// The out-of-bounds policy.
    pub fn oob(&self) -> OutOfBounds {
        self.oob
    }

    /// The color range, for color scales.
    pub fn colors(&self) -> Option<&ColorMap> {
        self.colors.as_ref()
    }

    /// The domain extent after expansion; this is what the visual range spans.
    pub fn expanded_range(&self) -> AxisRange {
        self.domain
            .extent()
            .expand(self.expansion.mult, self.expansion.add)
    }

    /// Position of `value` as a fraction of the expanded range.
    ///
    /// Returns `None` for non-finite values and for censored out-of-bounds values.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let limits = self.domain.extent();
        let value = match self.oob {
            OutOfBounds::Censor if !limits.contains(value) => return None,
            OutOfBounds::Squish => limits.clamp(value),
            _ => value,
        };
        let expanded = self.expanded_range();
        if expanded.is_degenerate() {
            return Some(0.5);
        }
        Some((value - expanded.min()) / expanded.span())
    }

    /// Maps `value` onto the interval `range` (which may be reversed).
    pub fn map(&self, value: f64, range: (f64, f64)) -> Option<f64> {
        let t = self.normalize(value)?;
        Some(range.0 + t * (range.1 - range.0))
    }

    /// Maps a category name onto `range`. `None` if the name is not in the domain.
    pub fn map_category(&self, name: &str, range: (f64, f64)) -> Option<f64> {
        let Domain::Categorical(categories) = &self.domain else {
            return None;
        };
        let index = categories.position(name)?;
        self.map(index as f64, range)
    }

    /// Color for a category name, or the missing-value color.
    pub fn color_of_category(&self, name: &str) -> Color {
        let Some(colors) = &self.colors else {
            return Color::TRANSPARENT;
        };
        let Domain::Categorical(categories) = &self.domain else {
            return colors.na();
        };
        match (colors, categories.position(name)) {
            (ColorMap::Palette(p), Some(i)) => p.color(i),
            (ColorMap::Gradient(g), Some(i)) => {
                self.normalize(i as f64).map_or(g.na, |t| g.at(t))
            }
            (_, None) => colors.na(),
        }
    }

    /// Color for a continuous value (or a category index), or the missing-value color.
    pub fn color_of_value(&self, value: f64) -> Color {
        let Some(colors) = &self.colors else {
            return Color::TRANSPARENT;
        };
        match (colors, self.normalize(value)) {
            (ColorMap::Gradient(g), Some(t)) => g.at(t),
            (ColorMap::Palette(p), Some(_)) if self.domain.is_categorical() => {
                p.color(index_of(value))
            }
            _ => colors.na(),
        }
    }

    /// Breaks for this scale, dispatching on the domain kind.
    ///
    /// Temporal domains pick a calendar granularity automatically; use [`TemporalBreaks`]
    /// directly for a fixed unit or format.
    pub fn breaks(&self, count: usize, labels: &Labels) -> Result<Vec<Break>> {
        match &self.domain {
            Domain::Numeric(range) => NumericBreaks::new(count)
                .with_labels(labels.clone())
                .generate(*range),
            Domain::Temporal(range) => TemporalBreaks::auto(*range, count)?
                .with_labels(labels.clone())
                .generate(*range),
            Domain::Categorical(categories) => categorical_breaks(categories, count, labels),
        }
    }

    /// A view of this scale restricted to `window` without discarding data.
    ///
    /// Unbounded window ends keep the current limits. The returned scale keeps out-of-window
    /// values ([`OutOfBounds::Keep`]) so lines and polygons leaving the view are not cut.
    pub fn zoomed(&self, window: AxisRange) -> Result<Self> {
        let limits = match &self.domain {
            Domain::Numeric(r) | Domain::Temporal(r) => *r,
            Domain::Categorical(_) => {
                return Err(Error::invalid_range(
                    "window",
                    "categorical scales cannot be zoomed",
                ));
            }
        };
        let window = window.resolve(Some(limits));
        let domain = match self.domain {
            Domain::Temporal(_) => Domain::Temporal(window),
            _ => Domain::Numeric(window),
        };
        log::debug!(
            "zoomed {:?} scale to [{}, {}]",
            self.aesthetic,
            window.min(),
            window.max()
        );
        Ok(Self {
            domain,
            oob: OutOfBounds::Keep,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn numeric(min: f64, max: f64) -> Scale {
        Scale::new(Aesthetic::X, Domain::Numeric(AxisRange::finite(min, max).unwrap()))
    }

    #[test]
    fn continuous_expansion_adds_five_percent() {
        let s = numeric(0.0, 100.0);
        let e = s.expanded_range();
        assert!((e.min() + 5.0).abs() < 1e-9 && (e.max() - 105.0).abs() < 1e-9);
        assert_eq!(s.map(-5.0, (0.0, 110.0)), None);
        assert!((s.map(50.0, (0.0, 110.0)).unwrap() - 55.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_bounds_policies() {
        let s = numeric(0.0, 10.0).with_expansion(Expansion::NONE);
        assert_eq!(s.map(12.0, (0.0, 100.0)), None);
        let squished = s.clone().with_oob(OutOfBounds::Squish);
        assert_eq!(squished.map(12.0, (0.0, 100.0)), Some(100.0));
        let kept = s.with_oob(OutOfBounds::Keep);
        assert!((kept.map(12.0, (0.0, 100.0)).unwrap() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn categories_map_to_band_centres() {
        let cats = Categories::from_order(["a", "b", "c"]).unwrap();
        let s = Scale::new(Aesthetic::X, Domain::Categorical(cats));
        // [0, 2] expanded by 0.6 on each side spans 3.2 units.
        let a = s.map_category("a", (0.0, 320.0)).unwrap();
        assert!((a - 60.0).abs() < 1e-9);
        assert_eq!(s.map_category("z", (0.0, 320.0)), None);
    }

    #[test]
    fn color_scales_use_palette_or_gradient() {
        let cats = Categories::from_order(["a", "b"]).unwrap();
        let s = Scale::new(Aesthetic::Color, Domain::Categorical(cats));
        let palette = Palette::default();
        assert_eq!(s.color_of_category("b"), palette.color(1));
        assert_eq!(s.color_of_category("nope"), palette.na);

        let g = Scale::new(
            Aesthetic::Color,
            Domain::Numeric(AxisRange::finite(0.0, 1.0).unwrap()),
        );
        assert_eq!(g.color_of_value(0.0), Gradient::default().low);
        assert_eq!(g.color_of_value(f64::NAN), Gradient::default().na);
    }

    #[test]
    fn zooming_keeps_out_of_window_values() {
        let s = numeric(0.0, 100.0).with_expansion(Expansion::NONE);
        let z = s.zoomed(AxisRange::new(20.0, f64::INFINITY).unwrap()).unwrap();
        assert_eq!(z.domain().range(), AxisRange::finite(20.0, 100.0).ok());
        assert_eq!(z.map(0.0, (0.0, 80.0)), Some(-20.0));

        let cats = Scale::new(Aesthetic::X, Domain::Categorical(Categories::new()));
        assert!(cats.zoomed(AxisRange::UNIT).is_err());
    }

    #[test]
    fn breaks_dispatch_on_domain() {
        let b = numeric(10.0, 30.0).breaks(5, &Labels::Auto).unwrap();
        assert_eq!(b.len(), 5);
        let cats = Categories::from_order(["x", "y"]).unwrap();
        let b = Scale::new(Aesthetic::X, Domain::Categorical(cats))
            .breaks(5, &Labels::Auto)
            .unwrap();
        assert_eq!(b[1], Break::new(1.0, "y"));
        assert!(numeric(0.0, 1.0).breaks(0, &Labels::Auto).is_err());
    }

    #[test]
    fn temporal_domains_get_calendar_breaks() {
        // 2020-01-01 .. 2024-01-01 UTC.
        let years = AxisRange::finite(1_577_836_800.0, 1_704_067_200.0).unwrap();
        let s = Scale::new(Aesthetic::X, Domain::Temporal(years));
        let b = s.breaks(5, &Labels::Auto).unwrap();
        let labels: Vec<&str> = b.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["2020", "2021", "2022", "2023", "2024"]);
        assert_eq!(b[0].position, years.min());

        assert!(s.breaks(0, &Labels::Auto).is_err());
        assert!(
            s.breaks(5, &Labels::Number(plotguide_core::NumberFormat::Plain))
                .is_err()
        );
    }

    #[test]
    fn small_magnitude_domains_keep_distinct_labels() {
        let b = numeric(0.0, 1e-13).breaks(5, &Labels::Auto).unwrap();
        assert!(b.len() >= 2);
        for pair in b.windows(2) {
            assert_ne!(pair[0].label, pair[1].label, "{b:?}");
        }
        assert!(!b[0].label.starts_with('-'), "{b:?}");
    }
}
