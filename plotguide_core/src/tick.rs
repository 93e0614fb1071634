// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis breaks.

extern crate alloc;

use alloc::string::String;

/// A tick position plus its display label.
///
/// An empty label means the label is suppressed while the tick itself is still drawn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Break {
    /// Position in the owning scale's domain units.
    pub position: f64,
    /// Display string (may be empty).
    pub label: String,
}

impl Break {
    /// Creates a break.
    pub fn new(position: f64, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }

    /// Creates a break whose label is suppressed.
    pub fn unlabeled(position: f64) -> Self {
        Self {
            position,
            label: String::new(),
        }
    }

    /// Returns `true` if the label is suppressed.
    pub fn is_label_suppressed(&self) -> bool {
        self.label.is_empty()
    }
}

/// Returns `true` if `positions` is strictly increasing (and free of `NaN`).
pub fn is_strictly_increasing(positions: &[f64]) -> bool {
    positions.iter().all(|p| !p.is_nan()) && positions.windows(2).all(|w| w[0] < w[1])
}
