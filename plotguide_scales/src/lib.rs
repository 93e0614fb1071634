// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scales and break generation.
//!
//! This crate covers two of the three annotation components:
//! - **Scale synchronization**: [`ScaleGroupBuilder`] unions several datasets that will be
//!   drawn as separate plots and publishes one immutable [`ScaleGroup`]. Every plot in the
//!   group holds the same `Arc<Scale>`s, so the plots stay visually comparable.
//! - **Breaks and labels**: [`NumericBreaks`] ("nice" 1/2/5 steps), [`TemporalBreaks`]
//!   (calendar unit boundaries) and [`categorical_breaks`] produce ordered [`Break`]s.
//!
//! [`Scale::breaks`] dispatches on the scale's [`Domain`] tag so callers holding a scale do
//! not need to know which generator applies.
//!
//! Nothing here renders. Scales map data to pixel or color ranges and hand back plain values.
//!
//! [`Break`]: plotguide_core::Break

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod breaks;
mod palette;
mod scale;
mod sync;
mod time;

pub use breaks::{LabelFn, Labels, NumericBreaks, categorical_breaks, nice_breaks};
pub use palette::{ColorMap, Gradient, Palette};
pub use scale::{Aesthetic, Domain, Expansion, OutOfBounds, Scale};
pub use sync::{AxisConfig, AxisKind, ColorSource, ScaleGroup, ScaleGroupBuilder};
pub use time::{TemporalBreaks, TimeUnit};
