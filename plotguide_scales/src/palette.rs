// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color ranges for the color aesthetic.

extern crate alloc;

use alloc::vec::Vec;

use peniko::Color;

/// A discrete palette. Category `i` gets `colors[i % len]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    /// Colors in assignment order.
    pub colors: Vec<Color>,
    /// Color for values outside the domain.
    pub na: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: Vec::from([
                Color::from_rgb8(0x1b, 0x9e, 0x77),
                Color::from_rgb8(0xd9, 0x5f, 0x02),
                Color::from_rgb8(0x75, 0x70, 0xb3),
                Color::from_rgb8(0xe7, 0x29, 0x8a),
                Color::from_rgb8(0x66, 0xa6, 0x1e),
                Color::from_rgb8(0xe6, 0xab, 0x02),
                Color::from_rgb8(0xa6, 0x76, 0x1d),
                Color::from_rgb8(0x66, 0x66, 0x66),
            ]),
            na: Color::from_rgb8(0x7f, 0x7f, 0x7f),
        }
    }
}

impl Palette {
    /// A palette with the given colors and the default missing-value color.
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            colors: colors.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Sets the missing-value color.
    pub fn with_na(mut self, na: Color) -> Self {
        self.na = na;
        self
    }

    /// Color for category index `index`, cycling when the palette is shorter than the domain.
    pub fn color(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return self.na;
        }
        self.colors[index % self.colors.len()]
    }
}

/// A two-stop linear gradient over `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
    /// Color at `0`.
    pub low: Color,
    /// Color at `1`.
    pub high: Color,
    /// Color for missing or censored values.
    pub na: Color,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            low: Color::from_rgb8(0x13, 0x2b, 0x43),
            high: Color::from_rgb8(0x56, 0xb1, 0xf7),
            na: Color::from_rgb8(0x7f, 0x7f, 0x7f),
        }
    }
}

impl Gradient {
    /// A gradient between two colors.
    pub fn new(low: Color, high: Color) -> Self {
        Self {
            low,
            high,
            ..Self::default()
        }
    }

    /// Interpolates component-wise in sRGB. `t` is clamped to `[0, 1]`; NaN maps to `na`.
    pub fn at(&self, t: f64) -> Color {
        if t.is_nan() {
            return self.na;
        }
        #[allow(clippy::cast_possible_truncation, reason = "t is clamped to [0, 1]")]
        let t = t.clamp(0.0, 1.0) as f32;
        let a = self.low.components;
        let b = self.high.components;
        Color::new([
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
            a[3] + (b[3] - a[3]) * t,
        ])
    }
}

/// The output range of a color scale.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorMap {
    /// Discrete colors for categorical domains.
    Palette(Palette),
    /// A continuous ramp for numeric and temporal domains.
    Gradient(Gradient),
}

impl ColorMap {
    /// Color for values that cannot be mapped.
    pub fn na(&self) -> Color {
        match self {
            Self::Palette(p) => p.na,
            Self::Gradient(g) => g.na,
        }
    }
}
