// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-overlapping text labels for data points.
//!
//! A [`LabelBox`] is the rendered bounds of one annotation, anchored to a point in output
//! coordinates (pixels, y growing downward). [`resolve`] moves boxes the smallest distance it
//! can find so that no two overlap and returns a [`Placement`]; overlaps it could not remove
//! within its budget are reported in [`Placement::residual`] rather than as an error.
//!
//! Boxes are sized by a [`TextMeasurer`]. The renderer owns real font metrics;
//! [`HeuristicTextMeasurer`] is good enough for tests and previews.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use plotguide_labels::{HeuristicTextMeasurer, LabelBox, PlacementConfig, TextStyle, resolve};
//!
//! let style = TextStyle::new(12.0);
//! let labels = [
//!     LabelBox::measured(Point::new(100.0, 100.0), "alpha", &style, &HeuristicTextMeasurer),
//!     LabelBox::measured(Point::new(102.0, 101.0), "beta", &style, &HeuristicTextMeasurer),
//! ];
//! let placement = resolve(&labels, Rect::new(0.0, 0.0, 400.0, 300.0), &PlacementConfig::default());
//! assert!(placement.is_resolved());
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod anchors;
mod grid;
mod label;
mod measure;
mod placement;

pub use anchors::{GroupAnchor, group_anchors};
pub use label::{Alignment, HAlign, LabelBox, VAlign};
pub use measure::{HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
pub use placement::{Placement, PlacementConfig, UnresolvableOverlap, resolve};
