// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric and categorical break generation, plus label assignment.
//!
//! Numeric breaks use "nice" steps of 1, 2 or 5 times a power of ten. Among the candidate
//! steps around `span / (count - 1)`, the one whose number of in-range breaks is closest to
//! the requested count wins; ties go to the larger step.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use plotguide_core::FloatExt;
use plotguide_core::{AxisRange, Break, Categories, Error, NumberFormat, Result};

/// Upper bound on the number of breaks any generator will produce.
pub(crate) const MAX_BREAKS: usize = 10_000;

const NICE_MULTIPLIERS: [f64; 3] = [1.0, 2.0, 5.0];

/// A custom label formatter: `(position, step) -> label`.
///
/// For categorical breaks `position` is the category index and `step` is `1`.
pub type LabelFn = Arc<dyn Fn(f64, f64) -> String + Send + Sync>;

/// How labels are attached to generated break positions.
#[derive(Clone, Default)]
pub enum Labels {
    /// The generator's natural labels: step-aware numbers, formatted dates, category names.
    #[default]
    Auto,
    /// Numbers rendered with a specific [`NumberFormat`]. Numeric breaks only.
    Number(NumberFormat),
    /// One label per break, in order. The length must match the number of breaks.
    Explicit(Vec<String>),
    /// Empty labels; the break positions are kept.
    Suppressed,
    /// A caller-provided formatter.
    Custom(LabelFn),
}

impl core::fmt::Debug for Labels {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Auto => f.write_str("Auto"),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::Explicit(v) => f.debug_tuple("Explicit").field(v).finish(),
            Self::Suppressed => f.write_str("Suppressed"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Labels {
    /// Explicit labels from any iterator of strings.
    pub fn explicit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Explicit(labels.into_iter().map(Into::into).collect())
    }

    /// A custom formatter.
    pub fn custom(f: impl Fn(f64, f64) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }
}

/// Pairs `positions` with labels according to `labels`.
///
/// `auto` produces the generator's natural label for a position.
pub(crate) fn apply_labels(
    positions: Vec<f64>,
    step: f64,
    labels: &Labels,
    auto: impl Fn(f64) -> Result<String>,
) -> Result<Vec<Break>> {
    match labels {
        Labels::Auto => positions
            .into_iter()
            .map(|p| Ok(Break::new(p, auto(p)?)))
            .collect(),
        Labels::Number(fmt) => Ok(positions
            .into_iter()
            .map(|p| Break::new(p, fmt.format(p, step)))
            .collect()),
        Labels::Explicit(text) => {
            if text.len() != positions.len() {
                return Err(Error::invalid_breaks(
                    "labels",
                    format!(
                        "{} labels supplied for {} breaks",
                        text.len(),
                        positions.len()
                    ),
                ));
            }
            Ok(positions
                .into_iter()
                .zip(text.iter())
                .map(|(p, l)| Break::new(p, l.clone()))
                .collect())
        }
        Labels::Suppressed => Ok(positions.into_iter().map(Break::unlabeled).collect()),
        Labels::Custom(f) => Ok(positions
            .into_iter()
            .map(|p| Break::new(p, f(p, step)))
            .collect()),
    }
}

/// Breaks for a continuous numeric axis.
#[derive(Clone, Debug)]
pub struct NumericBreaks {
    /// Desired number of breaks. Must be at least 1.
    pub count: usize,
    /// Explicit break positions; when set, `count` is ignored.
    pub positions: Option<Vec<f64>>,
    /// Label policy.
    pub labels: Labels,
}

impl Default for NumericBreaks {
    fn default() -> Self {
        Self::new(5)
    }
}

impl NumericBreaks {
    /// Automatic "nice" breaks aiming for `count` positions.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            positions: None,
            labels: Labels::Auto,
        }
    }

    /// Caller-chosen break positions.
    ///
    /// Positions must be finite, strictly increasing and inside the range passed to
    /// [`NumericBreaks::generate`].
    pub fn explicit(positions: impl Into<Vec<f64>>) -> Self {
        let positions = positions.into();
        Self {
            count: positions.len(),
            positions: Some(positions),
            labels: Labels::Auto,
        }
    }

    /// Sets the label policy.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Shorthand for `with_labels(Labels::Number(format))`.
    pub fn with_format(self, format: NumberFormat) -> Self {
        self.with_labels(Labels::Number(format))
    }

    /// Generates breaks inside `range`.
    pub fn generate(&self, range: AxisRange) -> Result<Vec<Break>> {
        let range = range.require_finite("range")?;
        let positions = match &self.positions {
            Some(positions) => validate_explicit(positions, range)?,
            None => nice_breaks(range, self.count)?,
        };
        let step = tick_step(&positions);
        apply_labels(positions, step, &self.labels, |p| {
            Ok(NumberFormat::Plain.format(p, step))
        })
    }
}

fn validate_explicit(positions: &[f64], range: AxisRange) -> Result<Vec<f64>> {
    if let Some(p) = positions.iter().find(|p| !p.is_finite()) {
        return Err(Error::invalid_breaks(
            "positions",
            format!("break position {p} is not finite"),
        ));
    }
    if !plotguide_core::is_strictly_increasing(positions) {
        return Err(Error::invalid_breaks(
            "positions",
            "break positions must be strictly increasing",
        ));
    }
    if let Some(p) = positions.iter().find(|p| !range.contains(**p)) {
        return Err(Error::invalid_breaks(
            "positions",
            format!(
                "break position {p} lies outside [{}, {}]",
                range.min(),
                range.max()
            ),
        ));
    }
    Ok(positions.to_vec())
}

/// Returns "nice" break positions inside `range`, aiming for `count` of them.
///
/// Positions are strictly increasing and contained in `[min, max]`. A degenerate range
/// yields its single value.
pub fn nice_breaks(range: AxisRange, count: usize) -> Result<Vec<f64>> {
    if count == 0 {
        return Err(Error::invalid_breaks("count", "must be at least 1"));
    }
    if count > MAX_BREAKS {
        return Err(Error::invalid_breaks(
            "count",
            format!("{count} exceeds the maximum of {MAX_BREAKS}"),
        ));
    }
    let range = range.require_finite("range")?;
    let (min, max) = (range.min(), range.max());
    if range.is_degenerate() {
        return Ok(alloc::vec![min]);
    }

    let intervals = count.saturating_sub(1).max(1) as f64;
    let span = max - min;
    let raw = if span.is_finite() {
        span / intervals
    } else {
        // Halve before subtracting so ranges spanning most of `f64` do not overflow.
        (max * 0.5 - min * 0.5) / intervals * 2.0
    };
    let base_exp = {
        let e = raw.log10().floor().clamp(-330.0, 330.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
        {
            e as i32
        }
    };

    let mut best: Option<(f64, usize)> = None;
    for exp in (base_exp - 1)..=(base_exp + 1) {
        let magnitude = 10.0_f64.powi(exp);
        for m in NICE_MULTIPLIERS {
            let step = m * magnitude;
            if !step.is_finite() || step <= 0.0 {
                continue;
            }
            let n = breaks_in_range(min, max, step);
            if n == 0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_step, best_n)) => {
                    let d = n.abs_diff(count);
                    let best_d = best_n.abs_diff(count);
                    d < best_d || (d == best_d && step > best_step)
                }
            };
            if better {
                best = Some((step, n));
            }
        }
    }

    let Some((step, _)) = best else {
        return Ok(alloc::vec![min, max]);
    };
    log::debug!("nice breaks over [{min}, {max}] for count {count}: step {step}");

    let first = (min / step - 1e-9).ceil();
    let last = (max / step + 1e-9).floor();
    let mut out: Vec<f64> = Vec::new();
    let mut k = first;
    while k <= last && out.len() < MAX_BREAKS {
        let p = range.clamp(k * step);
        // `-0.0` from `k == -0.0`.
        let p = if p == 0.0 { 0.0 } else { p };
        if out.last().is_none_or(|prev| p > *prev) {
            out.push(p);
        }
        k += 1.0;
    }
    Ok(out)
}

fn breaks_in_range(min: f64, max: f64, step: f64) -> usize {
    let first = (min / step - 1e-9).ceil();
    let last = (max / step + 1e-9).floor();
    let n = last - first + 1.0;
    if !n.is_finite() || n <= 0.0 {
        return 0;
    }
    let n = n.min((MAX_BREAKS + 1) as f64);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "guarded by finite/positive checks and capped"
    )]
    {
        n as usize
    }
}

/// Smallest distance between neighboring positions, or `0` for fewer than two.
pub(crate) fn tick_step(positions: &[f64]) -> f64 {
    let step = positions
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

/// One break per category, in the set's display order.
///
/// Positions are category indices. Every category gets a break, so `count` only has to be
/// non-zero. [`Labels::Number`] does not apply and is rejected.
pub fn categorical_breaks(
    categories: &Categories,
    count: usize,
    labels: &Labels,
) -> Result<Vec<Break>> {
    if count == 0 {
        return Err(Error::invalid_breaks("count", "must be at least 1"));
    }
    if matches!(labels, Labels::Number(_)) {
        return Err(Error::invalid_breaks(
            "labels",
            "number formats do not apply to categorical breaks",
        ));
    }
    let positions: Vec<f64> = (0..categories.len()).map(|i| i as f64).collect();
    apply_labels(positions, 1.0, labels, |p| {
        let name = categories.get(index_of(p)).unwrap_or_default();
        Ok(name.to_string())
    })
}

pub(crate) fn index_of(position: f64) -> usize {
    if !position.is_finite() || position < 0.0 {
        return 0;
    }
    let v = position.round().min(MAX_BREAKS as f64 * 1000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "value is clamped to a non-negative range"
    )]
    {
        v as usize
    }
}
