// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property and scenario tests for label placement.

use kurbo::{Point, Rect, Size};
use plotguide_labels::{
    HeuristicTextMeasurer, LabelBox, PlacementConfig, TextStyle, UnresolvableOverlap, resolve,
};
use proptest::prelude::*;

const CANVAS: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);
const CELL: f64 = 100.0;

/// Labels on a jittered 8 × 6 grid of 100 px cells, each at most 30 × 16 px.
///
/// A cell holds zero, one or two labels; two labels in a cell share an anchor and a size, so
/// they collide and one of them has to move. Anchors sit at least 80 px apart, which leaves
/// room for every pair to stack. The total label area stays below 10% of the canvas.
fn sparse_labels() -> impl Strategy<Value = (Vec<LabelBox>, usize)> {
    let cell = (
        0..3_usize,
        -10.0..10.0_f64,
        -10.0..10.0_f64,
        10.0..30.0_f64,
        8.0..16.0_f64,
    );
    prop::collection::vec(cell, 48).prop_map(|cells| {
        let mut labels = Vec::new();
        let mut pairs = 0;
        for (i, (n, jx, jy, w, h)) in cells.into_iter().enumerate() {
            let cx = (i % 8) as f64 * CELL + CELL * 0.5 + jx;
            let cy = (i / 8) as f64 * CELL + CELL * 0.5 + jy;
            let label = LabelBox::new(Point::new(cx, cy), Size::new(w, h));
            if n == 2 {
                pairs += 1;
            }
            labels.extend(core::iter::repeat_n(label, n));
        }
        (labels, pairs)
    })
}

fn any_labels() -> impl Strategy<Value = Vec<LabelBox>> {
    prop::collection::vec(
        (0.0..800.0_f64, 0.0..600.0_f64, 1.0..80.0_f64, 1.0..30.0_f64),
        0..40,
    )
    .prop_map(|v| {
        v.into_iter()
            .map(|(x, y, w, h)| LabelBox::new(Point::new(x, y), Size::new(w, h)))
            .collect()
    })
}

proptest! {
    #[test]
    fn sparse_inputs_resolve_cleanly((labels, pairs) in sparse_labels()) {
        let area: f64 = labels.iter().map(|l| l.size().area()).sum();
        prop_assert!(area < 0.1 * CANVAS.area());
        let placement = resolve(&labels, CANVAS, &PlacementConfig::default());
        prop_assert!(placement.residual.is_empty(), "residual: {:?}", placement.residual);
        let moved = placement.labels.iter().filter(|l| l.displacement() > 0.0).count();
        prop_assert_eq!(moved, pairs);
    }

    #[test]
    fn placement_is_bounded_and_consistent(labels in any_labels(), max_d in 0.0..60.0_f64) {
        let config = PlacementConfig::default().with_max_displacement(max_d);
        let placement = resolve(&labels, CANVAS, &config);
        prop_assert_eq!(placement.labels.len(), labels.len());
        for (placed, original) in placement.labels.iter().zip(&labels) {
            prop_assert!(placed.displacement() <= max_d + 1e-6);
            prop_assert_eq!(placed.anchor(), original.anchor());
            prop_assert_eq!(placed.size(), original.size());
        }
        for &(i, j) in &placement.residual {
            prop_assert!(i < j && j < labels.len());
        }
    }

    #[test]
    fn placement_is_deterministic(labels in any_labels()) {
        let config = PlacementConfig::default();
        prop_assert_eq!(resolve(&labels, CANVAS, &config), resolve(&labels, CANVAS, &config));
    }
}

#[test]
fn clustered_labels_report_residual_overlap() {
    let style = TextStyle::new(12.0);
    let anchors = [
        (390.0, 290.0),
        (410.0, 290.0),
        (400.0, 300.0),
        (390.0, 310.0),
        (410.0, 310.0),
    ];
    let labels: Vec<LabelBox> = anchors
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            LabelBox::measured(
                Point::new(x, y),
                &format!("label {i}"),
                &style,
                &HeuristicTextMeasurer,
            )
        })
        .collect();

    let placement = resolve(&labels, CANVAS, &PlacementConfig::default());
    assert!(!placement.residual.is_empty());
    let UnresolvableOverlap { labels, residual } = placement.into_result().unwrap_err();
    assert_eq!(labels.len(), 5);
    assert!(!residual.is_empty());
}

#[test]
fn four_labels_on_one_anchor_cannot_all_separate() {
    // 0.4% of the canvas, but only two free spots lie within one label height.
    let labels = vec![LabelBox::new(Point::new(400.0, 300.0), Size::new(40.0, 12.0)); 4];
    let area: f64 = labels.iter().map(|l| l.size().area()).sum();
    assert!(area < 0.005 * CANVAS.area());

    let placement = resolve(&labels, CANVAS, &PlacementConfig::default());
    assert_eq!(placement.residual, vec![(0, 3)]);
    assert_eq!(placement.labels[3].displacement(), 0.0);
}
