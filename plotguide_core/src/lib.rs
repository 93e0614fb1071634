// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data model for plot annotation helpers.
//!
//! `plotguide` decides *where annotation goes* on a statistical plot and leaves
//! drawing to an external renderer. This crate holds the types every other
//! crate in the workspace speaks:
//! - [`Point`]: an immutable data-space observation, optionally tagged with a
//!   category and a text label.
//! - [`AxisRange`]: a validated closed interval, possibly with unbounded ends
//!   that mean "extend to the data extent".
//! - [`Break`]: a tick position plus its display label.
//! - [`Categories`]: an ordered, duplicate-free set of category names.
//! - [`Error`]: the input-validation taxonomy shared by all components.
//!
//! Number formatting for tick labels lives in [`format`].

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod categories;
mod error;
pub mod float;
pub mod format;
mod point;
mod range;
mod tick;

pub use categories::Categories;
pub use error::Error;
pub use float::FloatExt;
pub use format::NumberFormat;
pub use point::Point;
pub use range::AxisRange;
pub use tick::{Break, is_strictly_increasing};

/// A `Result` alias using this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
