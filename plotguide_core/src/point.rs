// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data-space observations.

extern crate alloc;

use alloc::sync::Arc;

/// An `(x, y)` observation in data space.
///
/// A point may carry a category (grouping / color channel) and a text label (for
/// annotation). Points are immutable once built; the builder-style `with_*` methods consume
/// and return a new value.
///
/// For temporal axes `x`/`y` hold seconds since the Unix epoch (UTC).
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    category: Option<Arc<str>>,
    label: Option<Arc<str>>,
}

impl Point {
    /// Creates an untagged point.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            category: None,
            label: None,
        }
    }

    /// Tags the point with a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<Arc<str>>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attaches a text label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Data-space x.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Data-space y.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Category tag, if any.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Text label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
