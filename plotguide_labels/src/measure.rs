// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks.
//!
//! Label boxes need a size before they can be placed. Shaping and glyph layout stay with the
//! renderer, so placement depends only on this small trait. A renderer with real font metrics
//! implements [`TextMeasurer`]; tests and previews use [`HeuristicTextMeasurer`].

/// Measures a single line of text.
pub trait TextMeasurer {
    /// Metrics for `text`, treated as one line. Callers split on `\n` themselves.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    /// Font size in the output coordinate system (typically pixels).
    pub font_size: f64,
    /// Extra space between lines of a multi-line label, as a fraction of the font size.
    pub line_gap: f64,
}

impl TextStyle {
    /// A style with the given font size and no extra line gap.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            line_gap: 0.0,
        }
    }

    /// Sets the extra line gap.
    #[must_use]
    pub fn with_line_gap(mut self, line_gap: f64) -> Self {
        self.line_gap = line_gap;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the line.
    pub advance_width: f64,
    /// Distance from the baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional spacing below the line.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// A heuristic measurer: ~0.6em per glyph, baseline at 0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        TextMetrics {
            advance_width: 0.6 * style.font_size * text.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: style.line_gap * style.font_size,
        }
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}
