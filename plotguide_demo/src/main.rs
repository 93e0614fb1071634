// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annotated scatter demo for plotguide.
//!
//! Two panels (one per model year) share their x, y and color scales, get breaks from the
//! shared scales, and label each vehicle class once with the placement resolver. The result
//! is written to `plotguide_demo.svg`, or to the path given as the first argument.
//!
//! Set `PLOTGUIDE_LOG=debug` (or `trace`) to see the libraries' diagnostics.

mod svg;

use std::error::Error;

use kurbo::{Point as PxPoint, Rect};
use peniko::Color;
use plotguide_core::{AxisRange, Break, Point};
use plotguide_labels::{
    Alignment, HeuristicTextMeasurer, LabelBox, PlacementConfig, TextStyle, group_anchors,
    resolve,
};
use plotguide_scales::{
    AxisConfig, ColorSource, Labels, ScaleGroup, ScaleGroupBuilder, TemporalBreaks, TimeUnit,
};

use crate::svg::SvgDoc;

const PANEL_WIDTH: f64 = 360.0;
const PANEL_HEIGHT: f64 = 300.0;
const PANEL_GAP: f64 = 60.0;
const MARGIN: f64 = 50.0;
const FONT_SIZE: f64 = 11.0;

const GRID: Color = Color::from_rgb8(0xe5, 0xe5, 0xe5);
const INK: Color = Color::from_rgb8(0x33, 0x33, 0x33);
const PANEL: Color = Color::from_rgb8(0xf7, 0xf7, 0xf7);

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;
    let out_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "plotguide_demo.svg".to_string());

    let panels = [("1999", cars_1999()), ("2008", cars_2008())];
    let datasets: Vec<&[Point]> = panels.iter().map(|(_, d)| d.as_slice()).collect();
    let group = ScaleGroupBuilder::new()
        .with_y(AxisConfig::default().with_limits(AxisRange::at_least(0.0)?))
        .with_color(ColorSource::Category)
        .build(&datasets);

    let x_breaks = group.x().breaks(5, &Labels::Auto)?;
    let y_breaks = group.y().breaks(5, &Labels::Auto)?;

    let width = MARGIN * 2.0 + PANEL_WIDTH * 2.0 + PANEL_GAP;
    let height = MARGIN * 2.0 + PANEL_HEIGHT;
    let mut doc = SvgDoc::new(Rect::new(0.0, 0.0, width, height));
    doc.rect(Rect::new(0.0, 0.0, width, height), Color::WHITE);

    for (i, (title, points)) in panels.iter().enumerate() {
        let x0 = MARGIN + i as f64 * (PANEL_WIDTH + PANEL_GAP);
        let plot = Rect::new(x0, MARGIN, x0 + PANEL_WIDTH, MARGIN + PANEL_HEIGHT);
        draw_panel(&mut doc, &group, plot, title, points, &x_breaks, &y_breaks);
    }

    log_quarterly_breaks()?;

    std::fs::write(&out_path, doc.to_svg_string())?;
    log::info!("wrote {out_path}");
    Ok(())
}

fn init_logging() -> Result<(), log::SetLoggerError> {
    let level = std::env::var("PLOTGUIDE_LOG")
        .ok()
        .and_then(|v| v.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

fn draw_panel(
    doc: &mut SvgDoc,
    group: &ScaleGroup,
    plot: Rect,
    title: &str,
    points: &[Point],
    x_breaks: &[Break],
    y_breaks: &[Break],
) {
    doc.rect(plot, PANEL);
    doc.text(
        PxPoint::new(plot.center().x, plot.y0 - 12.0),
        FONT_SIZE + 2.0,
        "middle",
        INK,
        title,
    );

    for b in x_breaks {
        let Some(x) = group.x().map(b.position, (plot.x0, plot.x1)) else {
            continue;
        };
        doc.line(PxPoint::new(x, plot.y0), PxPoint::new(x, plot.y1), GRID);
        doc.text(
            PxPoint::new(x, plot.y1 + FONT_SIZE + 4.0),
            FONT_SIZE,
            "middle",
            INK,
            &b.label,
        );
    }
    for b in y_breaks {
        let Some(y) = group.y().map(b.position, (plot.y1, plot.y0)) else {
            continue;
        };
        doc.line(PxPoint::new(plot.x0, y), PxPoint::new(plot.x1, y), GRID);
        doc.text(
            PxPoint::new(plot.x0 - 4.0, y + FONT_SIZE * 0.3),
            FONT_SIZE,
            "end",
            INK,
            &b.label,
        );
    }

    for p in points {
        if let Some(px) = group.project(p, plot) {
            let fill = group.color_of(p).unwrap_or(INK);
            doc.circle(px, 2.5, fill);
        }
    }

    // One label per class, at the point closest to the class median.
    let style = TextStyle::new(FONT_SIZE);
    let mut owners = Vec::new();
    let mut labels = Vec::new();
    for anchor in group_anchors(points) {
        let point = &points[anchor.index];
        let Some(px) = group.project(point, plot) else {
            continue;
        };
        owners.push(anchor.index);
        labels.push(
            LabelBox::measured(px, &anchor.category, &style, &HeuristicTextMeasurer)
                .with_alignment(Alignment::ABOVE),
        );
    }
    let config = PlacementConfig::default()
        .with_point_padding(3.0)
        .with_max_displacement(40.0);
    let placement = resolve(&labels, plot, &config);
    if !placement.is_resolved() {
        log::warn!(
            "panel {title}: {} label pairs overlap",
            placement.residual.len()
        );
    }

    for (label, &owner) in placement.labels.iter().zip(&owners) {
        let rect = label.rect();
        let fill = group.color_of(&points[owner]).unwrap_or(INK);
        if label.displacement() > 0.0 {
            doc.line(label.anchor(), rect.center(), fill.with_alpha(0.5));
        }
        doc.text(
            PxPoint::new(rect.x0, rect.y1 - 0.2 * FONT_SIZE),
            FONT_SIZE,
            "start",
            fill,
            label.text().unwrap_or_default(),
        );
    }
}

/// Calendar breaks are not drawn here; logging them shows the temporal generator at work.
fn log_quarterly_breaks() -> Result<(), Box<dyn Error>> {
    // 2024-01-01 .. 2025-01-01 UTC.
    let year = AxisRange::finite(1_704_067_200.0, 1_735_689_600.0)?;
    let breaks = TemporalBreaks::new(TimeUnit::Month)
        .with_every(3)
        .with_format("%b %Y")
        .generate(year)?;
    let labels: Vec<&str> = breaks.iter().map(|b| b.label.as_str()).collect();
    log::info!("quarterly breaks for 2024: {}", labels.join(", "));
    Ok(())
}

fn car(displ: f64, hwy: f64, class: &str) -> Point {
    Point::new(displ, hwy).with_category(class).with_label(class)
}

fn cars_1999() -> Vec<Point> {
    vec![
        car(1.8, 29.0, "compact"),
        car(2.0, 26.0, "compact"),
        car(2.8, 26.0, "midsize"),
        car(3.1, 27.0, "midsize"),
        car(2.4, 30.0, "midsize"),
        car(4.2, 17.0, "suv"),
        car(5.4, 15.0, "suv"),
        car(4.0, 17.0, "suv"),
        car(3.8, 21.0, "minivan"),
        car(3.3, 22.0, "minivan"),
        car(4.6, 17.0, "pickup"),
        car(5.9, 12.0, "pickup"),
        car(1.6, 33.0, "subcompact"),
        car(1.9, 44.0, "subcompact"),
        car(5.7, 26.0, "2seater"),
    ]
}

fn cars_2008() -> Vec<Point> {
    vec![
        car(2.0, 31.0, "compact"),
        car(2.4, 29.0, "compact"),
        car(3.5, 29.0, "midsize"),
        car(2.5, 31.0, "midsize"),
        car(3.0, 26.0, "midsize"),
        car(5.3, 20.0, "suv"),
        car(6.2, 17.0, "suv"),
        car(4.7, 19.0, "suv"),
        car(4.0, 24.0, "minivan"),
        car(3.3, 24.0, "minivan"),
        car(4.7, 17.0, "pickup"),
        car(5.7, 17.0, "pickup"),
        car(2.0, 29.0, "subcompact"),
        car(4.6, 26.0, "subcompact"),
        car(6.2, 26.0, "2seater"),
        car(7.0, 24.0, "2seater"),
    ]
}
