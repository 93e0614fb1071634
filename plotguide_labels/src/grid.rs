// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid over placed rectangles for overlap queries.

extern crate alloc;

use hashbrown::{HashMap, HashSet};
use kurbo::Rect;
#[cfg(not(feature = "std"))]
use plotguide_core::FloatExt;
use smallvec::SmallVec;

const MIN_CELL: f64 = 16.0;
/// Cell coordinates are clamped to this magnitude.
const MAX_CELL_INDEX: f64 = 1.0e6;

/// Maps grid cells to the indices of the rectangles touching them.
#[derive(Debug)]
pub(crate) struct PlacedGrid {
    cell: f64,
    cells: HashMap<(i32, i32), SmallVec<[usize; 4]>>,
}

impl PlacedGrid {
    pub(crate) fn new(cell: f64) -> Self {
        let cell = if cell.is_finite() { cell.max(MIN_CELL) } else { MIN_CELL };
        Self {
            cell,
            cells: HashMap::new(),
        }
    }

    fn index(&self, v: f64) -> i32 {
        let i = (v / self.cell).floor();
        let i = if i.is_nan() {
            0.0
        } else {
            i.clamp(-MAX_CELL_INDEX, MAX_CELL_INDEX)
        };
        #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
        {
            i as i32
        }
    }

    fn span(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        (
            self.index(rect.x0),
            self.index(rect.y0),
            self.index(rect.x1),
            self.index(rect.y1),
        )
    }

    /// Registers rectangle `idx`.
    pub(crate) fn insert(&mut self, idx: usize, rect: &Rect) {
        let (x0, y0, x1, y1) = self.span(rect);
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                self.cells.entry((ix, iy)).or_default().push(idx);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Indices of rectangles that could overlap `rect`, each reported once.
    pub(crate) fn query(&self, rect: &Rect) -> impl Iterator<Item = usize> + '_ {
        let (x0, y0, x1, y1) = self.span(rect);
        let mut seen = HashSet::new();
        (x0..=x1)
            .flat_map(move |ix| (y0..=y1).map(move |iy| (ix, iy)))
            .flat_map(move |key| {
                self.cells
                    .get(&key)
                    .map(|v| v.as_slice())
                    .unwrap_or(&[])
                    .iter()
                    .copied()
            })
            .filter(move |idx| seen.insert(*idx))
    }
}
