// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy label placement.
//!
//! Labels are placed one at a time, larger labels first. Each label tries a bounded list of
//! candidate offsets ordered by distance from its aligned position and takes the first one
//! that is free: clear of every label placed so far (kept `padding` apart), of the data points
//! when `point_padding` is set, and inside the canvas when `keep_inside_canvas` is set. When no
//! candidate is free the least-overlapping one is taken and the overlap is reported in
//! [`Placement::residual`].
//!
//! The work is bounded by `labels × max_candidates` candidate checks; there is no iteration to
//! convergence.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
#[cfg(not(feature = "std"))]
use plotguide_core::FloatExt;
use smallvec::SmallVec;

use crate::grid::PlacedGrid;
use crate::label::{Alignment, LabelBox};

/// Overlaps thinner than this are treated as touching.
const TOUCH_EPSILON: f64 = 1e-6;
/// Upper bound on lattice steps per direction when generating candidates.
const MAX_LATTICE_STEPS: i32 = 64;

/// Knobs for [`resolve`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementConfig {
    /// Gap kept between any two labels.
    pub padding: f64,
    /// How far a label may move from its aligned position.
    ///
    /// `None` allows one label height plus `padding`, which is enough to stack two labels
    /// that share an anchor.
    pub max_displacement: Option<f64>,
    /// Number of candidate offsets tried per label.
    pub max_candidates: usize,
    /// When set, labels also keep this distance from every anchor point.
    pub point_padding: Option<f64>,
    /// Keep labels inside the canvas.
    pub keep_inside_canvas: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            padding: 2.0,
            max_displacement: None,
            max_candidates: 64,
            point_padding: None,
            keep_inside_canvas: true,
        }
    }
}

impl PlacementConfig {
    /// Sets the gap between labels.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the maximum displacement.
    #[must_use]
    pub fn with_max_displacement(mut self, max_displacement: f64) -> Self {
        self.max_displacement = Some(max_displacement);
        self
    }

    /// Sets the candidate budget per label.
    #[must_use]
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Keeps labels `point_padding` away from every anchor point.
    #[must_use]
    pub fn with_point_padding(mut self, point_padding: f64) -> Self {
        self.point_padding = Some(point_padding);
        self
    }

    /// Sets whether labels must stay inside the canvas.
    #[must_use]
    pub fn with_keep_inside_canvas(mut self, keep: bool) -> Self {
        self.keep_inside_canvas = keep;
        self
    }

    fn padding(&self) -> f64 {
        if self.padding.is_finite() {
            self.padding.max(0.0)
        } else {
            0.0
        }
    }

    fn max_displacement_for(&self, label: &LabelBox) -> f64 {
        match self.max_displacement {
            Some(d) if d.is_finite() => d.max(0.0),
            Some(_) => 0.0,
            None => label.size().height + self.padding(),
        }
    }
}

/// The outcome of [`resolve`].
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// The placed labels, in input order.
    pub labels: Vec<LabelBox>,
    /// Index pairs `(i, j)`, `i < j`, of labels that still overlap. Sorted.
    pub residual: Vec<(usize, usize)>,
}

impl Placement {
    /// Whether every overlap was resolved.
    pub fn is_resolved(&self) -> bool {
        self.residual.is_empty()
    }

    /// Sum of all label displacements.
    pub fn total_displacement(&self) -> f64 {
        self.labels.iter().map(LabelBox::displacement).sum()
    }

    /// The labels if every overlap was resolved, otherwise the partial placement as an error.
    pub fn into_result(self) -> Result<Vec<LabelBox>, UnresolvableOverlap> {
        if self.residual.is_empty() {
            Ok(self.labels)
        } else {
            Err(UnresolvableOverlap {
                labels: self.labels,
                residual: self.residual,
            })
        }
    }
}

/// Some labels could not be separated within the search budget.
///
/// Carries the best partial placement so callers can still render it.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{} label pairs still overlap after placement", residual.len())]
pub struct UnresolvableOverlap {
    /// The partial placement, in input order.
    pub labels: Vec<LabelBox>,
    /// Index pairs of labels that still overlap.
    pub residual: Vec<(usize, usize)>,
}

/// Places `labels` inside `canvas` so that no two overlap, moving each as little as it can.
///
/// Never fails: labels that cannot be separated keep their least-overlapping candidate and
/// are listed in [`Placement::residual`].
pub fn resolve(labels: &[LabelBox], canvas: Rect, config: &PlacementConfig) -> Placement {
    let pad = config.padding();
    let half_pad = pad * 0.5;

    let mut order: Vec<usize> = (0..labels.len()).collect();
    order.sort_by(|&a, &b| {
        let area = |i: usize| labels[i].size().area();
        area(b).total_cmp(&area(a)).then(a.cmp(&b))
    });

    let cell = labels
        .iter()
        .map(|l| l.size().width.max(l.size().height))
        .fold(0.0, f64::max)
        + pad;

    let (anchors, anchor_grid) = anchor_rects(labels, config.point_padding, cell);

    let mut placed: Vec<LabelBox> = labels.to_vec();
    // Padded rects of placed labels, indexed like `labels`.
    let mut padded: Vec<Rect> = labels.iter().map(|l| l.initial_rect()).collect();
    let mut grid = PlacedGrid::new(cell);
    let mut checks = 0_usize;

    for &i in &order {
        let label = &labels[i];
        let initial = label.initial_rect();
        let max_d = config.max_displacement_for(label);
        let candidates = candidates(label, max_d, pad, config.max_candidates);

        let mut best: Option<(f64, Vec2)> = None;
        for offset in candidates {
            checks += 1;
            let rect = (initial + offset).inflate(half_pad, half_pad);
            let cost = cost(
                &rect,
                &(initial + offset),
                &grid,
                &padded,
                &anchor_grid,
                &anchors,
                config.keep_inside_canvas.then_some(canvas),
            );
            if best.is_none_or(|(c, _)| cost < c) {
                best = Some((cost, offset));
            }
            if cost <= 0.0 {
                break;
            }
        }

        let (cost, offset) = best.unwrap_or((0.0, Vec2::ZERO));
        log::trace!("label {i}: offset ({}, {}), cost {cost}", offset.x, offset.y);
        placed[i].set_offset(offset);
        padded[i] = placed[i].rect().inflate(half_pad, half_pad);
        grid.insert(i, &padded[i]);
    }

    let residual = residual_pairs(&padded, &grid);
    if residual.is_empty() {
        log::debug!(
            "placed {} labels with {checks} candidate checks, no overlaps",
            labels.len()
        );
    } else {
        log::warn!(
            "placed {} labels with {checks} candidate checks, {} overlapping pairs remain",
            labels.len(),
            residual.len()
        );
    }
    Placement {
        labels: placed,
        residual,
    }
}

/// Keep-out squares around every anchor, indexed in a grid of their own.
///
/// The grid cell is at least as wide as a square, so each anchor touches at most four cells
/// however large `point_padding` is.
fn anchor_rects(
    labels: &[LabelBox],
    point_padding: Option<f64>,
    label_cell: f64,
) -> (Vec<Rect>, PlacedGrid) {
    let Some(pp) = point_padding.filter(|pp| pp.is_finite() && *pp >= 0.0) else {
        return (Vec::new(), PlacedGrid::new(label_cell));
    };
    let anchors: Vec<Rect> = labels.iter().map(|l| point_rect(l.anchor(), pp)).collect();
    let mut grid = PlacedGrid::new(label_cell.max(2.0 * pp));
    for (i, r) in anchors.iter().enumerate() {
        grid.insert(i, r);
    }
    (anchors, grid)
}

fn point_rect(p: Point, pad: f64) -> Rect {
    Rect::new(p.x - pad, p.y - pad, p.x + pad, p.y + pad)
}

/// Candidate offsets for `label`, nearest first, starting with no offset.
///
/// After the aligned position come the other eight alignments around the anchor, then a
/// lattice of offsets in steps of half the padded label size, sorted by distance.
fn candidates(label: &LabelBox, max_d: f64, pad: f64, budget: usize) -> SmallVec<[Vec2; 32]> {
    let mut out: SmallVec<[Vec2; 32]> = SmallVec::new();
    if budget == 0 {
        return out;
    }
    out.push(Vec2::ZERO);
    let reach = max_d + TOUCH_EPSILON;
    let size = label.size();
    let origin = label.initial_rect().origin();

    for alignment in Alignment::ALL {
        if alignment == label.alignment() {
            continue;
        }
        let offset = alignment.origin(label.anchor(), size) - origin;
        if offset.hypot() <= reach {
            out.push(offset);
        }
    }

    let step_x = ((size.width + pad) * 0.5).max(1.0);
    let step_y = ((size.height + pad) * 0.5).max(1.0);
    let steps = |step: f64| {
        let n = (max_d / step).floor();
        if n.is_finite() {
            #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
            {
                n.clamp(0.0, f64::from(MAX_LATTICE_STEPS)) as i32
            }
        } else {
            0
        }
    };
    let (nx, ny) = (steps(step_x), steps(step_y));
    let mut lattice: Vec<Vec2> = Vec::new();
    for j in -ny..=ny {
        for k in -nx..=nx {
            if j == 0 && k == 0 {
                continue;
            }
            let offset = Vec2::new(f64::from(k) * step_x, f64::from(j) * step_y);
            if offset.hypot() <= reach {
                lattice.push(offset);
            }
        }
    }
    lattice.sort_by(|a, b| a.hypot2().total_cmp(&b.hypot2()));
    out.extend(lattice);
    out.truncate(budget);
    out
}

fn overlap_area(a: &Rect, b: &Rect) -> f64 {
    let w = a.x1.min(b.x1) - a.x0.max(b.x0);
    let h = a.y1.min(b.y1) - a.y0.max(b.y0);
    if w > TOUCH_EPSILON && h > TOUCH_EPSILON {
        w * h
    } else {
        0.0
    }
}

fn outside_area(rect: &Rect, canvas: &Rect) -> f64 {
    let inside = rect.intersect(*canvas);
    let inside_area = if inside.width() > 0.0 && inside.height() > 0.0 {
        inside.area()
    } else {
        0.0
    };
    let outside = rect.area() - inside_area;
    if outside > TOUCH_EPSILON { outside } else { 0.0 }
}

/// Overlap with placed labels and anchor points, plus the area sticking out of the canvas.
fn cost(
    padded: &Rect,
    bare: &Rect,
    grid: &PlacedGrid,
    placed: &[Rect],
    anchor_grid: &PlacedGrid,
    anchors: &[Rect],
    canvas: Option<Rect>,
) -> f64 {
    let labels: f64 = grid
        .query(padded)
        .map(|j| overlap_area(padded, &placed[j]))
        .sum();
    let points: f64 = anchor_grid
        .query(bare)
        .map(|j| overlap_area(bare, &anchors[j]))
        .sum();
    let outside = canvas.map_or(0.0, |c| outside_area(bare, &c));
    labels + points + outside
}

fn residual_pairs(padded: &[Rect], grid: &PlacedGrid) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for (i, rect) in padded.iter().enumerate() {
        for j in grid.query(rect) {
            if j > i && overlap_area(rect, &padded[j]) > 0.0 {
                out.push((i, j));
            }
        }
    }
    out.sort_unstable();
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::Size;

    use super::*;

    const CANVAS: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    fn boxed(x: f64, y: f64, w: f64, h: f64) -> LabelBox {
        LabelBox::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn separated_labels_do_not_move() {
        let labels = vec![boxed(100.0, 100.0, 40.0, 12.0), boxed(300.0, 300.0, 40.0, 12.0)];
        let placement = resolve(&labels, CANVAS, &PlacementConfig::default());
        assert!(placement.is_resolved());
        assert_eq!(placement.total_displacement(), 0.0);
    }

    #[test]
    fn coincident_labels_stack_vertically() {
        let labels = vec![boxed(400.0, 300.0, 40.0, 12.0), boxed(400.0, 300.0, 40.0, 12.0)];
        let placement = resolve(&labels, CANVAS, &PlacementConfig::default());
        assert!(placement.is_resolved());
        // Equal areas: the first label keeps its spot.
        assert_eq!(placement.labels[0].offset(), Vec2::ZERO);
        let moved = placement.labels[1].offset();
        assert_eq!(moved.x, 0.0);
        assert_eq!(moved.y.abs(), 14.0);
    }

    #[test]
    fn larger_labels_are_placed_first() {
        let labels = vec![boxed(400.0, 300.0, 20.0, 10.0), boxed(400.0, 300.0, 60.0, 12.0)];
        let config = PlacementConfig::default().with_max_displacement(30.0);
        let placement = resolve(&labels, CANVAS, &config);
        assert!(placement.is_resolved());
        assert_eq!(placement.labels[1].offset(), Vec2::ZERO);
        assert_ne!(placement.labels[0].offset(), Vec2::ZERO);
    }

    #[test]
    fn labels_are_pushed_inside_the_canvas() {
        let labels = vec![boxed(5.0, 300.0, 40.0, 12.0)];
        let config = PlacementConfig::default().with_max_displacement(40.0);
        let placement = resolve(&labels, CANVAS, &config);
        let rect = placement.labels[0].rect();
        assert!(rect.x0 >= 0.0, "label left edge at {}", rect.x0);
    }

    #[test]
    fn point_padding_clears_the_anchor() {
        let labels = vec![boxed(400.0, 300.0, 40.0, 12.0)];
        let config = PlacementConfig::default()
            .with_point_padding(2.0)
            .with_max_displacement(30.0);
        let placement = resolve(&labels, CANVAS, &config);
        let anchor = point_rect(Point::new(400.0, 300.0), 2.0);
        assert_eq!(overlap_area(&placement.labels[0].rect(), &anchor), 0.0);
        assert!(placement.labels[0].displacement() > 0.0);
    }

    #[test]
    fn huge_point_padding_stays_cheap() {
        let labels = vec![boxed(400.0, 300.0, 10.0, 10.0), boxed(420.0, 300.0, 10.0, 10.0)];
        let (anchors, grid) = anchor_rects(&labels, Some(2.0e4), 12.0);
        assert_eq!(anchors.len(), 2);
        assert!(grid.occupied_cells() <= 4, "{} cells", grid.occupied_cells());

        let config = PlacementConfig::default().with_point_padding(2.0e4);
        let placement = resolve(&labels[..1], CANVAS, &config);
        assert_eq!(placement.labels.len(), 1);
        assert!(placement.is_resolved());
    }

    #[test]
    fn zero_budget_keeps_initial_positions() {
        let labels = vec![boxed(400.0, 300.0, 40.0, 12.0), boxed(400.0, 300.0, 40.0, 12.0)];
        let config = PlacementConfig::default().with_max_candidates(0);
        let placement = resolve(&labels, CANVAS, &config);
        assert_eq!(placement.residual, vec![(0, 1)]);
        let err = placement.into_result().unwrap_err();
        assert_eq!(err.labels.len(), 2);
    }

    #[test]
    fn candidates_start_at_the_aligned_position() {
        let label = boxed(0.0, 0.0, 40.0, 12.0);
        let c = candidates(&label, 14.0, 2.0, 64);
        assert_eq!(c[0], Vec2::ZERO);
        assert!(c.iter().all(|o| o.hypot() <= 14.0 + 1e-6));
        assert!(c.contains(&Vec2::new(0.0, -14.0)));
        assert_eq!(candidates(&label, 14.0, 2.0, 3).len(), 3);
    }
}
