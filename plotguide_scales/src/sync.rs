// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scales for groups of plots.
//!
//! A [`ScaleGroupBuilder`] collects configuration, then [`ScaleGroupBuilder::build`] scans
//! every dataset and publishes an immutable [`ScaleGroup`]. Plots in the group clone the
//! group (cheap: three `Arc`s) and therefore read the very same [`Scale`] objects.

extern crate alloc;

use alloc::sync::Arc;

use peniko::Color;
use plotguide_core::{AxisRange, Categories, Point};

use crate::palette::ColorMap;
use crate::scale::{Aesthetic, Domain, Expansion, OutOfBounds, Scale};

/// Whether a position axis holds plain numbers or timestamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisKind {
    /// Plain numbers.
    #[default]
    Numeric,
    /// Seconds since the Unix epoch (UTC).
    Temporal,
}

/// Which channel of a [`Point`] drives the color scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorSource {
    /// The point's category, through a discrete palette.
    Category,
    /// The x value, through a gradient.
    X,
    /// The y value, through a gradient.
    Y,
}

/// Configuration for one position axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisConfig {
    /// Numeric or temporal.
    pub kind: AxisKind,
    /// Explicit limits. Unbounded ends extend to the union of the data.
    pub limits: AxisRange,
    /// Padding; `None` uses the scale default.
    pub expansion: Option<Expansion>,
    /// Policy for values outside the limits.
    pub oob: OutOfBounds,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            kind: AxisKind::Numeric,
            limits: AxisRange::UNBOUNDED,
            expansion: None,
            oob: OutOfBounds::Censor,
        }
    }
}

impl AxisConfig {
    /// A data-driven axis of the given kind.
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Sets explicit limits. Use infinite ends to leave a side data-driven.
    pub fn with_limits(mut self, limits: AxisRange) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the expansion.
    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = Some(expansion);
        self
    }

    /// Sets the out-of-bounds policy.
    pub fn with_oob(mut self, oob: OutOfBounds) -> Self {
        self.oob = oob;
        self
    }

    fn scale(&self, aesthetic: Aesthetic, range: AxisRange) -> Scale {
        let scale = Scale::new(aesthetic, continuous(self.kind, range)).with_oob(self.oob);
        match self.expansion {
            Some(e) => scale.with_expansion(e),
            None => scale,
        }
    }
}

/// Builds a [`ScaleGroup`] from several datasets.
#[derive(Clone, Debug, Default)]
pub struct ScaleGroupBuilder {
    x: AxisConfig,
    y: AxisConfig,
    color: Option<ColorSource>,
    color_map: Option<ColorMap>,
    category_order: Option<Categories>,
}

impl ScaleGroupBuilder {
    /// Numeric, data-driven x and y axes and no color scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the x axis.
    pub fn with_x(mut self, x: AxisConfig) -> Self {
        self.x = x;
        self
    }

    /// Configures the y axis.
    pub fn with_y(mut self, y: AxisConfig) -> Self {
        self.y = y;
        self
    }

    /// Adds a color scale driven by `source`.
    pub fn with_color(mut self, source: ColorSource) -> Self {
        self.color = Some(source);
        self
    }

    /// Overrides the color scale's palette or gradient.
    pub fn with_color_map(mut self, colors: ColorMap) -> Self {
        self.color_map = Some(colors);
        self
    }

    /// Fixes the display order of categories. Categories found in the data but missing from
    /// `order` are appended in the order they are first seen.
    pub fn with_category_order(mut self, order: Categories) -> Self {
        self.category_order = Some(order);
        self
    }

    /// Scans every dataset and publishes the shared scales.
    ///
    /// Points with a non-finite coordinate are skipped and reported with `log::warn!`. With no
    /// usable data at all, data-driven limits fall back to `[0, 1]`.
    pub fn build<D: AsRef<[Point]>>(&self, datasets: &[D]) -> ScaleGroup {
        let points = || datasets.iter().flat_map(|d| d.as_ref());
        let finite = || points().filter(|p| p.is_finite());
        let x_extent = AxisRange::from_values(finite().map(Point::x));
        let y_extent = AxisRange::from_values(finite().map(Point::y));

        let mut categories = self.category_order.clone().unwrap_or_default();
        for name in finite().filter_map(Point::category) {
            if categories.position(name).is_none() {
                categories.insert(name);
            }
        }
        let total = points().count();
        let skipped = total - finite().count();
        if skipped > 0 {
            log::warn!("removed {skipped} of {total} points containing non-finite values");
        }

        let x_range = self.x.limits.resolve(x_extent);
        let y_range = self.y.limits.resolve(y_extent);
        log::debug!(
            "synchronized {} datasets: x [{}, {}], y [{}, {}], {} categories",
            datasets.len(),
            x_range.min(),
            x_range.max(),
            y_range.min(),
            y_range.max(),
            categories.len()
        );

        let color = self.color.map(|source| {
            let domain = match source {
                ColorSource::Category => Domain::Categorical(categories),
                ColorSource::X => continuous(self.x.kind, x_range),
                ColorSource::Y => continuous(self.y.kind, y_range),
            };
            let scale = Scale::new(Aesthetic::Color, domain);
            let scale = match &self.color_map {
                Some(colors) => scale.with_colors(colors.clone()),
                None => scale,
            };
            Arc::new(scale)
        });

        ScaleGroup {
            x: Arc::new(self.x.scale(Aesthetic::X, x_range)),
            y: Arc::new(self.y.scale(Aesthetic::Y, y_range)),
            color,
            color_source: self.color,
        }
    }
}

fn continuous(kind: AxisKind, range: AxisRange) -> Domain {
    match kind {
        AxisKind::Numeric => Domain::Numeric(range),
        AxisKind::Temporal => Domain::Temporal(range),
    }
}

/// The published scales of a comparison group.
///
/// Cloning a group shares the underlying scales; it never copies them.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleGroup {
    x: Arc<Scale>,
    y: Arc<Scale>,
    color: Option<Arc<Scale>>,
    color_source: Option<ColorSource>,
}

impl ScaleGroup {
    /// The shared x scale.
    pub fn x(&self) -> &Arc<Scale> {
        &self.x
    }

    /// The shared y scale.
    pub fn y(&self) -> &Arc<Scale> {
        &self.y
    }

    /// The shared color scale, if one was configured.
    pub fn color(&self) -> Option<&Arc<Scale>> {
        self.color.as_ref()
    }

    /// Maps a data point into `plot` (pixel space, y growing downward).
    ///
    /// Returns `None` when either coordinate is censored or non-finite.
    pub fn project(&self, point: &Point, plot: kurbo::Rect) -> Option<kurbo::Point> {
        let x = self.x.map(point.x(), (plot.x0, plot.x1))?;
        let y = self.y.map(point.y(), (plot.y1, plot.y0))?;
        Some(kurbo::Point::new(x, y))
    }

    /// Color of `point` under the group's color scale, if there is one.
    pub fn color_of(&self, point: &Point) -> Option<Color> {
        let scale = self.color.as_ref()?;
        Some(match self.color_source? {
            ColorSource::Category => match point.category() {
                Some(name) => scale.color_of_category(name),
                None => scale.colors().map_or(Color::TRANSPARENT, ColorMap::na),
            },
            ColorSource::X => scale.color_of_value(point.x()),
            ColorSource::Y => scale.color_of_value(point.y()),
        })
    }

    /// Whether `other` was cloned from the same published group.
    pub fn shares_with(&self, other: &Self) -> bool {
        let color = match (&self.color, &other.color) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        Arc::ptr_eq(&self.x, &other.x) && Arc::ptr_eq(&self.y, &other.y) && color
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn xs(values: &[(f64, f64)]) -> Vec<Point> {
        values.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn union_of_x_ranges() {
        let a = xs(&[(1.0, 0.0), (3.0, 1.0)]);
        let b = xs(&[(2.0, 5.0), (7.0, 2.0)]);
        let group = ScaleGroupBuilder::new().build(&[a, b]);
        assert_eq!(
            group.x().domain().range(),
            Some(AxisRange::finite(1.0, 7.0).unwrap())
        );
        assert_eq!(
            group.y().domain().range(),
            Some(AxisRange::finite(0.0, 5.0).unwrap())
        );
    }

    #[test]
    fn empty_input_yields_unit_range() {
        let none: [Vec<Point>; 0] = [];
        let group = ScaleGroupBuilder::new().build(&none);
        assert_eq!(group.x().domain().range(), Some(AxisRange::UNIT));
        let empties = [Vec::<Point>::new(), Vec::new()];
        let group = ScaleGroupBuilder::new().build(&empties);
        assert_eq!(group.y().domain().range(), Some(AxisRange::UNIT));
    }

    #[test]
    fn explicit_limits_extend_one_side() {
        let data = [xs(&[(2.0, 2.0), (4.0, 3.0)])];
        let group = ScaleGroupBuilder::new()
            .with_y(AxisConfig::default().with_limits(AxisRange::at_least(0.0).unwrap()))
            .build(&data);
        assert_eq!(
            group.y().domain().range(),
            Some(AxisRange::finite(0.0, 3.0).unwrap())
        );
    }

    #[test]
    fn non_finite_points_are_skipped() {
        let data = [vec![
            Point::new(f64::NAN, 100.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, f64::INFINITY),
        ]];
        let group = ScaleGroupBuilder::new().build(&data);
        assert_eq!(
            group.y().domain().range(),
            Some(AxisRange::finite(1.0, 1.0).unwrap())
        );
    }

    #[test]
    fn categories_union_in_requested_order() {
        let a = vec![Point::new(0.0, 0.0).with_category("suv")];
        let b = vec![
            Point::new(1.0, 1.0).with_category("compact"),
            Point::new(2.0, 1.0).with_category("pickup"),
        ];
        let order = Categories::from_order(["pickup", "suv"]).unwrap();
        let group = ScaleGroupBuilder::new()
            .with_color(ColorSource::Category)
            .with_category_order(order)
            .build(&[a, b]);
        let Domain::Categorical(cats) = group.color().unwrap().domain() else {
            panic!("expected a categorical color scale");
        };
        assert_eq!(
            cats.iter().collect::<Vec<_>>(),
            vec!["pickup", "suv", "compact"]
        );
        let p = Point::new(0.0, 0.0).with_category("suv");
        assert_eq!(
            group.color_of(&p),
            Some(crate::Palette::default().color(1))
        );
    }

    #[test]
    fn clones_share_scale_identity() {
        let data = [xs(&[(0.0, 0.0), (1.0, 1.0)])];
        let group = ScaleGroupBuilder::new()
            .with_color(ColorSource::Y)
            .build(&data);
        let plot_a = group.clone();
        let plot_b = group.clone();
        assert!(plot_a.shares_with(&plot_b));
        assert!(Arc::ptr_eq(plot_a.x(), plot_b.x()));

        let rebuilt = ScaleGroupBuilder::new()
            .with_color(ColorSource::Y)
            .build(&data);
        assert_eq!(rebuilt, group);
        assert!(!rebuilt.shares_with(&group));
    }

    #[test]
    fn projection_inverts_y() {
        let data = [xs(&[(0.0, 0.0), (10.0, 10.0)])];
        let group = ScaleGroupBuilder::new()
            .with_x(AxisConfig::default().with_expansion(Expansion::NONE))
            .with_y(AxisConfig::default().with_expansion(Expansion::NONE))
            .build(&data);
        let plot = kurbo::Rect::new(0.0, 0.0, 100.0, 50.0);
        let p = group.project(&Point::new(10.0, 0.0), plot).unwrap();
        assert_eq!((p.x, p.y), (100.0, 50.0));
        assert_eq!(group.project(&Point::new(11.0, 0.0), plot), None);
    }

    #[test]
    fn temporal_axes_share_calendar_breaks() {
        // 2020-01-01 and 2024-01-01 UTC.
        let a = xs(&[(1_577_836_800.0, 1.0)]);
        let b = xs(&[(1_704_067_200.0, 2.0)]);
        let group = ScaleGroupBuilder::new()
            .with_x(AxisConfig::new(AxisKind::Temporal))
            .build(&[a, b]);
        let Domain::Temporal(range) = group.x().domain() else {
            panic!("expected a temporal x scale");
        };
        assert_eq!(
            *range,
            AxisRange::finite(1_577_836_800.0, 1_704_067_200.0).unwrap()
        );
        assert!(matches!(group.y().domain(), Domain::Numeric(_)));
        let breaks = group.x().breaks(5, &crate::Labels::Auto).unwrap();
        let labels: Vec<&str> = breaks.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["2020", "2021", "2022", "2023", "2024"]);
    }

    #[test]
    fn groups_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScaleGroup>();
        assert_send_sync::<Scale>();
    }
}
