// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed axis intervals.

extern crate alloc;

use alloc::format;

use crate::{Error, Result};

/// A closed interval `[min, max]` over a numeric or temporal domain.
///
/// Temporal domains use seconds since the Unix epoch (UTC).
///
/// Either end may be infinite (`-inf` for `min`, `+inf` for `max`). An infinite end is a
/// sentinel meaning "extend to the data extent" and is replaced by [`AxisRange::resolve`].
/// `min <= max` holds for every value of this type; the constructors reject anything else.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(f64, f64)", into = "(f64, f64)")
)]
pub struct AxisRange {
    min: f64,
    max: f64,
}

impl AxisRange {
    /// The unit interval `[0, 1]`, used when there is no data at all.
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    /// A fully open range: both ends come from the data.
    pub const UNBOUNDED: Self = Self {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Creates a range, allowing the unbounded sentinels.
    ///
    /// Fails if either end is `NaN`, if `min` is `+inf` or `max` is `-inf`, or if `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(Error::invalid_range("range", "ends must not be NaN"));
        }
        if min == f64::INFINITY {
            return Err(Error::invalid_range("range.min", "must not be +inf"));
        }
        if max == f64::NEG_INFINITY {
            return Err(Error::invalid_range("range.max", "must not be -inf"));
        }
        if min > max {
            return Err(Error::invalid_range(
                "range",
                format!("min ({min}) is greater than max ({max})"),
            ));
        }
        Ok(Self { min, max })
    }

    /// Creates a range that must be finite on both ends.
    pub fn finite(min: f64, max: f64) -> Result<Self> {
        Self::new(min, max)?.require_finite("range")
    }

    /// A range with a fixed lower end and an upper end taken from the data.
    pub fn at_least(min: f64) -> Result<Self> {
        Self::new(min, f64::INFINITY)
    }

    /// A range with a fixed upper end and a lower end taken from the data.
    pub fn at_most(max: f64) -> Result<Self> {
        Self::new(f64::NEG_INFINITY, max)
    }

    /// Smallest finite range covering every finite value yielded by `values`.
    ///
    /// Non-finite values are ignored. Returns `None` when no finite value is present.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            if !v.is_finite() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        (min.is_finite() && max.is_finite()).then_some(Self { min, max })
    }

    /// Lower end.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper end.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min` (infinite for unbounded ranges).
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if both ends are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns `true` if `min == max`.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Returns `true` if `v` lies in the closed interval.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Clamps `v` into the interval.
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    /// Smallest range covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Replaces unbounded ends with the matching end of `extent`.
    ///
    /// With no extent, unbounded ends fall back to [`AxisRange::UNIT`]. A resolved end that
    /// would cross the fixed end collapses onto it, so the result is always valid.
    #[must_use]
    pub fn resolve(self, extent: Option<Self>) -> Self {
        let fallback = extent.unwrap_or(Self::UNIT);
        let min = if self.min.is_finite() {
            self.min
        } else {
            fallback.min
        };
        let max = if self.max.is_finite() {
            self.max
        } else {
            fallback.max
        };
        if min <= max {
            Self { min, max }
        } else if self.min.is_finite() {
            Self { min, max: min }
        } else {
            Self { min: max, max }
        }
    }

    /// Widens the range by `mult * span` plus `add` on both sides.
    ///
    /// A degenerate range is widened by `add` only, or by `0.5` either side if `add` is zero,
    /// so that it can still be mapped onto a visual range.
    #[must_use]
    pub fn expand(self, mult: f64, add: f64) -> Self {
        let pad = self.span() * mult.max(0.0) + add.max(0.0);
        let pad = if pad == 0.0 && self.is_degenerate() {
            0.5
        } else {
            pad
        };
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Validates that both ends are finite, naming `argument` in the error.
    pub fn require_finite(self, argument: &'static str) -> Result<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(Error::invalid_range(
                argument,
                format!(
                    "expected finite ends, got [{}, {}]; resolve unbounded ends first",
                    self.min, self.max
                ),
            ))
        }
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::UNIT
    }
}

impl TryFrom<(f64, f64)> for AxisRange {
    type Error = Error;

    fn try_from((min, max): (f64, f64)) -> Result<Self> {
        Self::new(min, max)
    }
}

impl From<AxisRange> for (f64, f64) {
    fn from(range: AxisRange) -> Self {
        (range.min, range.max)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn reversed_range_is_rejected() {
        let err = AxisRange::new(3.0, 1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { argument: "range", .. }));
    }

    #[test]
    fn nan_and_inverted_sentinels_are_rejected() {
        assert!(AxisRange::new(f64::NAN, 1.0).is_err());
        assert!(AxisRange::new(f64::INFINITY, f64::INFINITY).is_err());
        assert!(AxisRange::new(0.0, f64::NEG_INFINITY).is_err());
        assert!(AxisRange::finite(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn unbounded_ends_resolve_against_extent() {
        let extent = AxisRange::new(2.0, 9.0).ok();
        let r = AxisRange::at_least(0.0).unwrap().resolve(extent);
        assert_eq!((r.min(), r.max()), (0.0, 9.0));
        let r = AxisRange::UNBOUNDED.resolve(None);
        assert_eq!(r, AxisRange::UNIT);
    }

    #[test]
    fn resolve_collapses_when_fixed_end_exceeds_data() {
        let extent = AxisRange::new(1.0, 3.0).ok();
        let r = AxisRange::at_least(5.0).unwrap().resolve(extent);
        assert_eq!((r.min(), r.max()), (5.0, 5.0));
    }

    #[test]
    fn from_values_skips_non_finite() {
        let r = AxisRange::from_values([f64::NAN, 4.0, -1.0, f64::INFINITY]).unwrap();
        assert_eq!((r.min(), r.max()), (-1.0, 4.0));
        assert!(AxisRange::from_values([f64::NAN]).is_none());
    }

    #[test]
    fn expand_pads_degenerate_ranges() {
        let r = AxisRange::new(2.0, 2.0).unwrap().expand(0.05, 0.0);
        assert_eq!((r.min(), r.max()), (1.5, 2.5));
        let r = AxisRange::new(0.0, 10.0).unwrap().expand(0.05, 0.0);
        assert!((r.min() + 0.5).abs() < 1e-12);
        assert!((r.max() - 10.5).abs() < 1e-12);
    }
}
