// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label boxes and their alignment around an anchor.

extern crate alloc;

use alloc::sync::Arc;

use kurbo::{Point, Rect, Size, Vec2};

use crate::measure::{TextMeasurer, TextStyle};

/// Which vertical edge (or the middle) of a box sits on the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HAlign {
    /// Left edge on the anchor: the box extends to the right.
    Left,
    /// Centered on the anchor.
    #[default]
    Center,
    /// Right edge on the anchor: the box extends to the left.
    Right,
}

/// Which horizontal edge (or the middle) of a box sits on the anchor.
///
/// Coordinates grow downward, so [`VAlign::Top`] places the box below the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VAlign {
    /// Top edge on the anchor.
    Top,
    /// Centered on the anchor.
    #[default]
    Center,
    /// Bottom edge on the anchor.
    Bottom,
}

/// Placement of a box relative to its anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    /// Horizontal component.
    pub horizontal: HAlign,
    /// Vertical component.
    pub vertical: VAlign,
}

impl Alignment {
    /// Box centered on the anchor.
    pub const CENTER: Self = Self::new(HAlign::Center, VAlign::Center);
    /// Box above and to the right of the anchor.
    pub const ABOVE_RIGHT: Self = Self::new(HAlign::Left, VAlign::Bottom);
    /// Box centered above the anchor.
    pub const ABOVE: Self = Self::new(HAlign::Center, VAlign::Bottom);
    /// Box centered below the anchor.
    pub const BELOW: Self = Self::new(HAlign::Center, VAlign::Top);
    /// Box to the right of the anchor, vertically centered.
    pub const RIGHT: Self = Self::new(HAlign::Left, VAlign::Center);
    /// Box to the left of the anchor, vertically centered.
    pub const LEFT: Self = Self::new(HAlign::Right, VAlign::Center);

    /// All nine combinations, row by row from top-left.
    pub const ALL: [Self; 9] = [
        Self::new(HAlign::Left, VAlign::Top),
        Self::new(HAlign::Center, VAlign::Top),
        Self::new(HAlign::Right, VAlign::Top),
        Self::new(HAlign::Left, VAlign::Center),
        Self::new(HAlign::Center, VAlign::Center),
        Self::new(HAlign::Right, VAlign::Center),
        Self::new(HAlign::Left, VAlign::Bottom),
        Self::new(HAlign::Center, VAlign::Bottom),
        Self::new(HAlign::Right, VAlign::Bottom),
    ];

    /// Creates an alignment.
    pub const fn new(horizontal: HAlign, vertical: VAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Top-left corner of a box of `size` aligned this way on `anchor`.
    pub fn origin(self, anchor: Point, size: Size) -> Point {
        let x = match self.horizontal {
            HAlign::Left => anchor.x,
            HAlign::Center => anchor.x - size.width * 0.5,
            HAlign::Right => anchor.x - size.width,
        };
        let y = match self.vertical {
            VAlign::Top => anchor.y,
            VAlign::Center => anchor.y - size.height * 0.5,
            VAlign::Bottom => anchor.y - size.height,
        };
        Point::new(x, y)
    }
}

/// The rendered bounds of a text annotation anchored to a point.
///
/// Anchor, size and alignment are fixed at construction. Placement only changes the offset
/// from the aligned position.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelBox {
    anchor: Point,
    size: Size,
    alignment: Alignment,
    offset: Vec2,
    text: Option<Arc<str>>,
}

impl LabelBox {
    /// A box of `size`, centered on `anchor`.
    pub fn new(anchor: Point, size: Size) -> Self {
        Self {
            anchor,
            size,
            alignment: Alignment::CENTER,
            offset: Vec2::ZERO,
            text: None,
        }
    }

    /// Measures `text` and builds a box for it.
    ///
    /// Multi-line text is split on `\n`; the box is as wide as the widest line and as tall as
    /// all lines stacked.
    pub fn measured(
        anchor: Point,
        text: &str,
        style: &TextStyle,
        measurer: &impl TextMeasurer,
    ) -> Self {
        let mut width: f64 = 0.0;
        let mut height = 0.0;
        for line in text.split('\n') {
            let metrics = measurer.measure(line, style);
            width = width.max(metrics.advance_width);
            height += metrics.line_height();
        }
        Self::new(anchor, Size::new(width, height)).with_text(text)
    }

    /// Sets the alignment around the anchor.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Attaches the label text, for renderers.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// The data point this label annotates, in output coordinates.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Rendered size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Alignment around the anchor.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Offset applied by placement.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Distance between the aligned and the placed position.
    pub fn displacement(&self) -> f64 {
        self.offset.hypot()
    }

    /// The label text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Bounds before placement.
    pub fn initial_rect(&self) -> Rect {
        Rect::from_origin_size(self.alignment.origin(self.anchor, self.size), self.size)
    }

    /// Bounds after placement.
    pub fn rect(&self) -> Rect {
        self.initial_rect() + self.offset
    }

    pub(crate) fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn alignment_places_box_around_anchor() {
        let anchor = Point::new(100.0, 50.0);
        let size = Size::new(40.0, 10.0);
        assert_eq!(Alignment::CENTER.origin(anchor, size), Point::new(80.0, 45.0));
        assert_eq!(
            Alignment::ABOVE_RIGHT.origin(anchor, size),
            Point::new(100.0, 40.0)
        );
        assert_eq!(Alignment::LEFT.origin(anchor, size), Point::new(60.0, 45.0));
    }

    #[test]
    fn measured_boxes_stack_lines() {
        let style = TextStyle::new(10.0);
        let b = LabelBox::measured(Point::ZERO, "abcd\nab", &style, &HeuristicTextMeasurer);
        assert!((b.size().width - 24.0).abs() < 1e-9);
        assert!((b.size().height - 20.0).abs() < 1e-9);
        assert_eq!(b.text(), Some("abcd\nab"));
    }

    #[test]
    fn offset_moves_rect() {
        let mut b = LabelBox::new(Point::new(10.0, 10.0), Size::new(4.0, 2.0));
        b.set_offset(Vec2::new(3.0, 4.0));
        assert_eq!(b.rect(), Rect::new(11.0, 13.0, 15.0, 15.0));
        assert!((b.displacement() - 5.0).abs() < 1e-12);
    }
}
