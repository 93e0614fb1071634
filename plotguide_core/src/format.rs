// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.
//!
//! Labels are formatted with just enough decimals to tell neighboring breaks apart: the
//! number of decimals is derived from the break step, not from the value.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

const MAX_DECIMALS: usize = 20;

/// How numeric break labels are rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberFormat {
    /// `1500`, `0.25`.
    #[default]
    Plain,
    /// Thousands separated with `,`: `1,500`.
    Thousands,
    /// Value multiplied by 100 with a `%` suffix: `0.25` → `25%`.
    Percent,
    /// Plain number wrapped in a prefix and suffix, e.g. `$` and `k`.
    Affix {
        /// Text placed before the number (after the sign).
        prefix: String,
        /// Text placed after the number.
        suffix: String,
    },
}

impl NumberFormat {
    /// Convenience for a currency-style prefix.
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self::Affix {
            prefix: prefix.into(),
            suffix: String::new(),
        }
    }

    /// Formats `v`, using `step` (the distance between neighboring breaks) to pick decimals.
    pub fn format(&self, v: f64, step: f64) -> String {
        match self {
            Self::Plain => format_with_step(v, step),
            Self::Thousands => group_thousands(&format_with_step(v, step)),
            Self::Percent => {
                let mut out = format_with_step(v * 100.0, step * 100.0);
                out.push('%');
                out
            }
            Self::Affix { prefix, suffix } => {
                let body = format_with_step(v, step);
                let (sign, digits) = match body.strip_prefix('-') {
                    Some(rest) => ("-", rest),
                    None => ("", body.as_str()),
                };
                format!("{sign}{prefix}{digits}{suffix}")
            }
        }
    }
}

/// Formats `v` with the number of decimals implied by `step`.
///
/// A zero or non-finite step, or one finer than 20 decimals, falls back to Rust's shortest
/// round-trip formatting.
pub fn format_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return format!("{}", normalize_zero(v));
    }
    let Some(decimals) = decimals_for_step(step) else {
        return format!("{}", normalize_zero(v));
    };
    let s = format!("{:.*}", decimals, v);
    // `-0`, `-0.00`, ...
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        return String::from(&s[1..]);
    }
    s
}

fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

/// Fewest decimals that represent `step` exactly, up to a relative error of 1e-6.
fn decimals_for_step(step: f64) -> Option<usize> {
    let mut scale = 1.0_f64;
    for d in 0..=MAX_DECIMALS {
        let scaled = step * scale;
        let rounded = scaled.round();
        if rounded != 0.0 && (scaled - rounded).abs() <= 1e-6 * scaled {
            return Some(d);
        }
        scale *= 10.0;
    }
    None
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    };
    let mut out = String::with_capacity(s.len() + int_part.len() / 3);
    out.push_str(sign);
    let n = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac_part);
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn decimals_follow_the_step() {
        assert_eq!(format_with_step(15.0, 5.0), "15");
        assert_eq!(format_with_step(0.5, 0.25), "0.50");
        assert_eq!(format_with_step(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_with_step(-0.0000001, 0.5), "0.0");
    }

    #[test]
    fn tiny_steps_keep_enough_decimals() {
        assert_eq!(format_with_step(2e-6, 1e-6), "0.000002");
        assert_eq!(format_with_step(3e-6, 1e-6), "0.000003");
        assert_eq!(format_with_step(4e-14, 2e-14), "0.00000000000004");
        assert_eq!(format_with_step(0.0, 1e-30), "0");
        assert_eq!(format_with_step(3e-30, 1e-30), "0.000000000000000000000000000003");
    }

    #[test]
    fn thousands_and_percent() {
        assert_eq!(NumberFormat::Thousands.format(1_234_567.0, 1000.0), "1,234,567");
        assert_eq!(NumberFormat::Thousands.format(-1500.5, 0.5), "-1,500.5");
        assert_eq!(NumberFormat::Percent.format(0.25, 0.05), "25%");
    }

    #[test]
    fn affix_keeps_sign_outside_prefix() {
        let f = NumberFormat::prefixed("$");
        assert_eq!(f.format(-20.0, 10.0), "-$20");
        assert_eq!(f.format(40.0, 10.0), "$40");
    }
}
