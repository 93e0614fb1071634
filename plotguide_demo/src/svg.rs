// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writer for `plotguide_demo`.

use std::fmt::Write as _;

use kurbo::{Point, Rect};
use peniko::Color;

#[derive(Debug)]
enum Element {
    Rect { rect: Rect, fill: Color },
    Line { from: Point, to: Point, stroke: Color },
    Circle { center: Point, radius: f64, fill: Color },
    Text {
        pos: Point,
        font_size: f64,
        anchor: &'static str,
        fill: Color,
        text: String,
    },
}

#[derive(Debug)]
pub(crate) struct SvgDoc {
    view_box: Rect,
    elements: Vec<Element>,
}

impl SvgDoc {
    pub(crate) fn new(view_box: Rect) -> Self {
        Self {
            view_box,
            elements: Vec::new(),
        }
    }

    pub(crate) fn rect(&mut self, rect: Rect, fill: Color) {
        self.elements.push(Element::Rect { rect, fill });
    }

    pub(crate) fn line(&mut self, from: Point, to: Point, stroke: Color) {
        self.elements.push(Element::Line { from, to, stroke });
    }

    pub(crate) fn circle(&mut self, center: Point, radius: f64, fill: Color) {
        self.elements.push(Element::Circle {
            center,
            radius,
            fill,
        });
    }

    /// Text with its baseline at `pos.y`.
    pub(crate) fn text(
        &mut self,
        pos: Point,
        font_size: f64,
        anchor: &'static str,
        fill: Color,
        text: &str,
    ) {
        self.elements.push(Element::Text {
            pos,
            font_size,
            anchor,
            fill,
            text: text.to_string(),
        });
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let vb = self.view_box;
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}" font-family="sans-serif">"#,
            vb.x0,
            vb.y0,
            vb.width(),
            vb.height(),
            vb.width(),
            vb.height()
        );
        for element in &self.elements {
            match element {
                Element::Rect { rect, fill } => {
                    let _ = write!(
                        out,
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height()
                    );
                    write_paint_attr(&mut out, "fill", *fill);
                    out.push_str("/>\n");
                }
                Element::Line { from, to, stroke } => {
                    let _ = write!(
                        out,
                        r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                        from.x, from.y, to.x, to.y
                    );
                    write_paint_attr(&mut out, "stroke", *stroke);
                    out.push_str("/>\n");
                }
                Element::Circle {
                    center,
                    radius,
                    fill,
                } => {
                    let _ = write!(
                        out,
                        r#"<circle cx="{}" cy="{}" r="{radius}""#,
                        center.x, center.y
                    );
                    write_paint_attr(&mut out, "fill", *fill);
                    out.push_str("/>\n");
                }
                Element::Text {
                    pos,
                    font_size,
                    anchor,
                    fill,
                    text,
                } => {
                    let _ = write!(
                        out,
                        r#"<text x="{}" y="{}" font-size="{font_size}" text-anchor="{anchor}""#,
                        pos.x, pos.y
                    );
                    write_paint_attr(&mut out, "fill", *fill);
                    out.push('>');
                    out.push_str(&escape_xml(text));
                    out.push_str("</text>\n");
                }
            }
        }
        out.push_str("</svg>\n");
        out
    }
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let rgba = color.to_rgba8();
    let _ = write!(
        out,
        r##" {name}="#{:02x}{:02x}{:02x}""##,
        rgba.r, rgba.g, rgba.b
    );
    if rgba.a != 255 {
        let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            _ => {
                out.push(c);
                continue;
            }
        };
        out.push_str(entity);
    }
    out
}
