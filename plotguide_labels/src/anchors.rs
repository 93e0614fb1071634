// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One label per group.
//!
//! Labelling every point of a crowded plot rarely works; a common alternative is to label
//! each category once, at a representative point, and drop the legend.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use plotguide_core::{Categories, Point};

/// The representative point of one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupAnchor {
    /// The category name.
    pub category: Arc<str>,
    /// Index of the chosen point in the input slice.
    pub index: usize,
}

/// Picks, per category, the point nearest to the category's coordinate-wise median.
///
/// Categories appear in first-seen order. Points without a category or with a non-finite
/// coordinate are ignored. Ties go to the earlier point.
pub fn group_anchors(points: &[Point]) -> Vec<GroupAnchor> {
    let mut categories = Categories::new();
    let mut members: Vec<Vec<usize>> = Vec::new();
    for (i, p) in points.iter().enumerate() {
        let Some(name) = p.category() else {
            continue;
        };
        if !p.is_finite() {
            continue;
        }
        let slot = match categories.position(name) {
            Some(slot) => slot,
            None => categories.insert(name),
        };
        if slot == members.len() {
            members.push(Vec::new());
        }
        members[slot].push(i);
    }

    let mut out = Vec::with_capacity(members.len());
    for (name, indices) in categories.iter().zip(&members) {
        let mx = median(indices.iter().map(|&i| points[i].x()).collect());
        let my = median(indices.iter().map(|&i| points[i].y()).collect());
        let mut best: Option<(f64, usize)> = None;
        for &i in indices {
            let dx = points[i].x() - mx;
            let dy = points[i].y() - my;
            let d = dx * dx + dy * dy;
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, i));
            }
        }
        if let Some((_, index)) = best {
            out.push(GroupAnchor {
                category: Arc::from(name),
                index,
            });
        }
    }
    log::debug!("chose {} group anchors from {} points", out.len(), points.len());
    out
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) * 0.5
    } else {
        values[mid]
    }
}
