// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Temporal break generation.
//!
//! Time is modelled as seconds since the Unix epoch (UTC). Breaks fall on calendar unit
//! boundaries:
//! - fixed-length units (second, minute, hour, day) on multiples of `every × unit`
//!   counted from the epoch,
//! - weeks on Mondays, counted from 1970-01-05,
//! - months on the first of the month, with the month index a multiple of `every`
//!   (so `every = 3` gives quarters),
//! - years on January 1st of years divisible by `every`.
//!
//! Labels use `strftime`-style format strings (see `chrono::format::strftime`).

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
#[cfg(not(feature = "std"))]
use plotguide_core::FloatExt;
use plotguide_core::{AxisRange, Break, Error, Result};

use crate::breaks::{Labels, MAX_BREAKS, apply_labels, tick_step};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
/// 1970-01-05 00:00:00 UTC, the first Monday after the epoch.
const FIRST_MONDAY: i64 = 4 * DAY;

/// Calendar granularity of temporal breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    /// Seconds.
    Second,
    /// Minutes.
    Minute,
    /// Hours.
    Hour,
    /// Days (midnight UTC).
    Day,
    /// Weeks starting on Monday.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl TimeUnit {
    /// A default label format for breaks at this granularity.
    pub fn default_format(self) -> &'static str {
        match self {
            Self::Second => "%H:%M:%S",
            Self::Minute | Self::Hour => "%H:%M",
            Self::Day | Self::Week => "%Y-%m-%d",
            Self::Month => "%b %Y",
            Self::Year => "%Y",
        }
    }

    fn fixed_seconds(self) -> Option<i64> {
        match self {
            Self::Second => Some(1),
            Self::Minute => Some(MINUTE),
            Self::Hour => Some(HOUR),
            Self::Day => Some(DAY),
            Self::Week => Some(WEEK),
            Self::Month | Self::Year => None,
        }
    }

    /// Approximate length in seconds, used to pick an automatic granularity.
    fn approx_seconds(self) -> f64 {
        match self.fixed_seconds() {
            Some(s) => s as f64,
            None if self == Self::Month => 30.436_875 * DAY as f64,
            None => 365.2425 * DAY as f64,
        }
    }
}

/// Candidate `(unit, every)` pairs for automatic temporal breaks, finest first.
const AUTO_STEPS: &[(TimeUnit, u32)] = &[
    (TimeUnit::Second, 1),
    (TimeUnit::Second, 2),
    (TimeUnit::Second, 5),
    (TimeUnit::Second, 10),
    (TimeUnit::Second, 15),
    (TimeUnit::Second, 30),
    (TimeUnit::Minute, 1),
    (TimeUnit::Minute, 2),
    (TimeUnit::Minute, 5),
    (TimeUnit::Minute, 10),
    (TimeUnit::Minute, 15),
    (TimeUnit::Minute, 30),
    (TimeUnit::Hour, 1),
    (TimeUnit::Hour, 2),
    (TimeUnit::Hour, 3),
    (TimeUnit::Hour, 6),
    (TimeUnit::Hour, 12),
    (TimeUnit::Day, 1),
    (TimeUnit::Day, 2),
    (TimeUnit::Week, 1),
    (TimeUnit::Week, 2),
    (TimeUnit::Month, 1),
    (TimeUnit::Month, 2),
    (TimeUnit::Month, 3),
    (TimeUnit::Month, 6),
    (TimeUnit::Year, 1),
    (TimeUnit::Year, 2),
    (TimeUnit::Year, 5),
    (TimeUnit::Year, 10),
    (TimeUnit::Year, 20),
    (TimeUnit::Year, 50),
    (TimeUnit::Year, 100),
];

/// Breaks on calendar unit boundaries.
#[derive(Clone, Debug)]
pub struct TemporalBreaks {
    /// Break granularity.
    pub unit: TimeUnit,
    /// Place a break every `every` units. Must be at least 1.
    pub every: u32,
    /// `strftime`-style label format used by [`Labels::Auto`].
    pub format: String,
    /// Label policy. [`Labels::Number`] does not apply and is rejected.
    pub labels: Labels,
}

impl TemporalBreaks {
    /// One break per `unit` boundary, labelled with the unit's default format.
    pub fn new(unit: TimeUnit) -> Self {
        Self {
            unit,
            every: 1,
            format: String::from(unit.default_format()),
            labels: Labels::Auto,
        }
    }

    /// Picks the granularity whose break count over `range` is closest to `count`.
    ///
    /// Ties go to the coarser granularity. Fails like [`TemporalBreaks::generate`] on a zero
    /// count or an unbounded range.
    pub fn auto(range: AxisRange, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(Error::invalid_breaks("count", "must be at least 1"));
        }
        let range = range.require_finite("range")?;
        let span = range.span();
        let mut best = AUTO_STEPS[0];
        let mut best_d = f64::INFINITY;
        for &(unit, every) in AUTO_STEPS {
            let step = unit.approx_seconds() * f64::from(every);
            let n = (span / step).floor() + 1.0;
            let d = (n - count as f64).abs();
            if d <= best_d {
                best = (unit, every);
                best_d = d;
            }
        }
        log::debug!(
            "automatic temporal breaks over {span}s for count {count}: every {} {:?}",
            best.1,
            best.0
        );
        Ok(Self::new(best.0).with_every(best.1))
    }

    /// Sets the unit multiplier.
    pub fn with_every(mut self, every: u32) -> Self {
        self.every = every;
        self
    }

    /// Sets the label format string.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Sets the label policy.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Generates one break per boundary inside `range` (timestamps in seconds).
    pub fn generate(&self, range: AxisRange) -> Result<Vec<Break>> {
        if self.every == 0 {
            return Err(Error::invalid_breaks("every", "must be at least 1"));
        }
        if matches!(self.labels, Labels::Number(_)) {
            return Err(Error::invalid_breaks(
                "labels",
                "number formats do not apply to temporal breaks",
            ));
        }
        let items = parse_format(&self.format)?;
        let range = range.require_finite("range")?;

        let lo = seconds(range.min().ceil(), "range.min")?;
        let hi = seconds(range.max().floor(), "range.max")?;
        let stamps = match self.unit.fixed_seconds() {
            Some(unit) => fixed_boundaries(lo, hi, unit, self.every, self.unit)?,
            None if self.unit == TimeUnit::Month => month_boundaries(lo, hi, self.every)?,
            None => year_boundaries(lo, hi, self.every)?,
        };
        log::trace!(
            "{} temporal breaks every {} {:?}",
            stamps.len(),
            self.every,
            self.unit
        );

        let positions: Vec<f64> = stamps.iter().map(|&s| s as f64).collect();
        let step = tick_step(&positions);
        apply_labels(positions, step, &self.labels, |p| {
            format_timestamp(p, &items)
        })
    }
}

fn parse_format(format: &str) -> Result<Vec<Item<'_>>> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|i| matches!(i, Item::Error)) {
        return Err(Error::invalid_breaks(
            "format",
            format!("`{format}` is not a valid strftime format"),
        ));
    }
    Ok(items)
}

fn seconds(v: f64, argument: &'static str) -> Result<i64> {
    // chrono's representable range is far inside this.
    const LIMIT: f64 = 1.0e15;
    if !(-LIMIT..=LIMIT).contains(&v) {
        return Err(Error::invalid_range(
            argument,
            format!("timestamp {v} is outside the supported calendar range"),
        ));
    }
    #[allow(clippy::cast_possible_truncation, reason = "range checked above")]
    Ok(v as i64)
}

fn too_many(every: u32, unit: TimeUnit) -> Error {
    Error::invalid_breaks(
        "every",
        format!("every {every} {unit:?} would produce more than {MAX_BREAKS} breaks"),
    )
}

fn fixed_boundaries(lo: i64, hi: i64, unit: i64, every: u32, tag: TimeUnit) -> Result<Vec<i64>> {
    let step = unit * i64::from(every);
    let origin = if tag == TimeUnit::Week { FIRST_MONDAY } else { 0 };
    let mut t = origin + (lo - origin).div_euclid(step) * step;
    if t < lo {
        t += step;
    }
    let mut out = Vec::new();
    while t <= hi {
        if out.len() == MAX_BREAKS {
            return Err(too_many(every, tag));
        }
        out.push(t);
        t += step;
    }
    Ok(out)
}

fn datetime(ts: i64, argument: &'static str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0).ok_or_else(|| {
        Error::invalid_range(
            argument,
            format!("timestamp {ts} is outside the calendar range"),
        )
    })
}

fn midnight_stamp(date: NaiveDate) -> Option<i64> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}

fn month_boundaries(lo: i64, hi: i64, every: u32) -> Result<Vec<i64>> {
    let start = datetime(lo, "range.min")?;
    let Some(mut date) = NaiveDate::from_ymd_opt(start.year(), start.month(), 1) else {
        return Ok(Vec::new());
    };
    if midnight_stamp(date).is_none_or(|t| t < lo) {
        date = match date.checked_add_months(Months::new(1)) {
            Some(d) => d,
            None => return Ok(Vec::new()),
        };
    }
    // Align to month indices divisible by `every`.
    let index = i64::from(date.year()) * 12 + i64::from(date.month0());
    let skip = (i64::from(every) - index.rem_euclid(i64::from(every))) % i64::from(every);
    let mut date = match u32::try_from(skip)
        .ok()
        .and_then(|s| date.checked_add_months(Months::new(s)))
    {
        Some(d) => d,
        None => return Ok(Vec::new()),
    };

    let mut out = Vec::new();
    while let Some(t) = midnight_stamp(date) {
        if t > hi {
            break;
        }
        if out.len() == MAX_BREAKS {
            return Err(too_many(every, TimeUnit::Month));
        }
        out.push(t);
        date = match date.checked_add_months(Months::new(every)) {
            Some(d) => d,
            None => break,
        };
    }
    Ok(out)
}

fn year_boundaries(lo: i64, hi: i64, every: u32) -> Result<Vec<i64>> {
    let start = datetime(lo, "range.min")?;
    let end = datetime(hi, "range.max")?;
    let every = i32::try_from(every).map_err(|_| too_many(every, TimeUnit::Year))?;
    let mut year = start.year();
    if NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(midnight_stamp)
        .is_none_or(|t| t < lo)
    {
        year += 1;
    }
    year += (every - year.rem_euclid(every)) % every;

    let mut out = Vec::new();
    while year <= end.year() {
        let Some(t) = NaiveDate::from_ymd_opt(year, 1, 1).and_then(midnight_stamp) else {
            break;
        };
        if t > hi {
            break;
        }
        if out.len() == MAX_BREAKS {
            return Err(too_many(every.unsigned_abs(), TimeUnit::Year));
        }
        out.push(t);
        year += every;
    }
    Ok(out)
}

fn format_timestamp(position: f64, items: &[Item<'_>]) -> Result<String> {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "positions come from validated integer timestamps"
    )]
    let dt = datetime(position as i64, "range")?;
    let mut out = String::new();
    write!(out, "{}", dt.format_with_items(items.iter())).map_err(|_| {
        Error::invalid_breaks("format", "format string cannot be applied to a UTC timestamp")
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn ts(y: i32, m: u32, d: u32) -> f64 {
        midnight_stamp(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap() as f64
    }

    fn labels(breaks: &[Break]) -> Vec<&str> {
        breaks.iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn monthly_breaks_fall_on_first_of_month() {
        let range = AxisRange::finite(ts(2024, 1, 15), ts(2024, 5, 2)).unwrap();
        let breaks = TemporalBreaks::new(TimeUnit::Month)
            .with_format("%b")
            .generate(range)
            .unwrap();
        assert_eq!(labels(&breaks), vec!["Feb", "Mar", "Apr", "May"]);
        assert_eq!(breaks[0].position, ts(2024, 2, 1));
    }

    #[test]
    fn quarterly_breaks_align_to_quarter_starts() {
        let range = AxisRange::finite(ts(2023, 2, 1), ts(2024, 1, 1)).unwrap();
        let breaks = TemporalBreaks::new(TimeUnit::Month)
            .with_every(3)
            .with_format("%Y-%m")
            .generate(range)
            .unwrap();
        assert_eq!(
            labels(&breaks),
            vec!["2023-04", "2023-07", "2023-10", "2024-01"]
        );
    }

    #[test]
    fn yearly_breaks_respect_multiplier() {
        let range = AxisRange::finite(ts(1967, 6, 1), ts(2015, 1, 1)).unwrap();
        let breaks = TemporalBreaks::new(TimeUnit::Year)
            .with_every(10)
            .generate(range)
            .unwrap();
        assert_eq!(
            labels(&breaks),
            vec!["1970", "1980", "1990", "2000", "2010"]
        );
    }

    #[test]
    fn daily_breaks_include_boundary_ends() {
        let range = AxisRange::finite(ts(2024, 2, 27), ts(2024, 3, 1)).unwrap();
        let breaks = TemporalBreaks::new(TimeUnit::Day).generate(range).unwrap();
        assert_eq!(
            labels(&breaks),
            vec!["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]
        );
    }

    #[test]
    fn weekly_breaks_start_on_monday() {
        // 2024-03-06 is a Wednesday.
        let range = AxisRange::finite(ts(2024, 3, 6), ts(2024, 3, 20)).unwrap();
        let breaks = TemporalBreaks::new(TimeUnit::Week)
            .with_format("%a %d")
            .generate(range)
            .unwrap();
        assert_eq!(labels(&breaks), vec!["Mon 11", "Mon 18"]);
    }

    #[test]
    fn invalid_requests_fail_fast() {
        let range = AxisRange::finite(0.0, 10.0 * DAY as f64).unwrap();
        let err = TemporalBreaks::new(TimeUnit::Day)
            .with_every(0)
            .generate(range)
            .unwrap_err();
        assert_eq!(err.argument(), Some("every"));

        let err = TemporalBreaks::new(TimeUnit::Day)
            .with_format("%Q")
            .generate(range)
            .unwrap_err();
        assert_eq!(err.argument(), Some("format"));

        let err = TemporalBreaks::new(TimeUnit::Second)
            .generate(AxisRange::finite(0.0, 1.0e6).unwrap())
            .unwrap_err();
        assert_eq!(err.argument(), Some("every"));
    }

    #[test]
    fn label_policies_apply_to_calendar_breaks() {
        let range = AxisRange::finite(ts(2023, 2, 1), ts(2024, 1, 1)).unwrap();
        let quarters = TemporalBreaks::new(TimeUnit::Month).with_every(3);

        let breaks = quarters
            .clone()
            .with_labels(Labels::explicit(["Q2", "Q3", "Q4", "Q1"]))
            .generate(range)
            .unwrap();
        assert_eq!(labels(&breaks), vec!["Q2", "Q3", "Q4", "Q1"]);
        assert_eq!(breaks[3].position, ts(2024, 1, 1));

        let err = quarters
            .clone()
            .with_labels(Labels::explicit(["Q2", "Q3"]))
            .generate(range)
            .unwrap_err();
        assert_eq!(err.argument(), Some("labels"));

        let breaks = quarters
            .clone()
            .with_labels(Labels::Suppressed)
            .generate(range)
            .unwrap();
        assert_eq!(breaks.len(), 4);
        assert!(breaks.iter().all(Break::is_label_suppressed));

        let err = quarters
            .with_labels(Labels::Number(plotguide_core::NumberFormat::Plain))
            .generate(range)
            .unwrap_err();
        assert_eq!(err.argument(), Some("labels"));
    }

    #[test]
    fn auto_picks_a_granularity_near_the_count() {
        let range = AxisRange::finite(ts(2020, 1, 1), ts(2024, 1, 1)).unwrap();
        let chosen = TemporalBreaks::auto(range, 5).unwrap();
        assert_eq!((chosen.unit, chosen.every), (TimeUnit::Year, 1));
        let breaks = chosen.generate(range).unwrap();
        assert_eq!(
            labels(&breaks),
            vec!["2020", "2021", "2022", "2023", "2024"]
        );

        let range = AxisRange::finite(0.0, 300.0).unwrap();
        let chosen = TemporalBreaks::auto(range, 6).unwrap();
        assert_eq!((chosen.unit, chosen.every), (TimeUnit::Minute, 1));
    }
}
