//! SVG builder: accumulates SVG elements and produces the final string.
//!
//! Also converts a field [`DrawingPlan`] into SVG elements.

use crate::geometry::Point;
use crate::model::Color;
use crate::renderer::fonts::FontFace;
use crate::renderer::plan::{DrawOp, DrawingPlan, Stroke, TextAnchor};

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub(super) struct SvgBuilder {
    pub(super) elements: Vec<String>,
}

impl SvgBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Wrap the elements in a nested `<svg>` placed at `(x, y)` on the
    /// parent, with its own `view_w × view_h` coordinate system.
    pub(super) fn nested(&self, x: f64, y: f64, w: f64, h: f64, view_w: f64, view_h: f64) -> String {
        let mut svg = format!(
            r#"<svg x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" viewBox="0 0 {} {}" preserveAspectRatio="none">"#,
            x, y, w, h, view_w, view_h
        );
        for el in &self.elements {
            svg.push_str(el);
        }
        svg.push_str("</svg>");
        svg
    }

    pub(super) fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.elements.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {}/>"#,
            from.x, from.y, to.x, to.y, stroke_attrs(stroke)
        ));
    }

    pub(super) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: Option<Color>, stroke: Option<&Stroke>) {
        let fill = fill.map_or_else(|| "none".to_string(), |c| c.to_string());
        match stroke {
            Some(s) => self.elements.push(format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" {}/>"#,
                x, y, w, h, fill, stroke_attrs(s)
            )),
            None => self.elements.push(format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                x, y, w, h, fill
            )),
        }
    }

    pub(super) fn circle(&mut self, center: Point, r: f64, fill: Color) {
        self.elements.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
            center.x, center.y, r, fill
        ));
    }

    pub(super) fn path(&mut self, d: &str, fill: Option<Color>, stroke: Option<&Stroke>) {
        let fill = fill.map_or_else(|| "none".to_string(), |c| c.to_string());
        let stroke = stroke.map_or_else(|| r#"stroke="none""#.to_string(), stroke_attrs);
        self.elements.push(format!(r#"<path d="{}" fill="{}" {}/>"#, d, fill, stroke));
    }

    pub(super) fn text(
        &mut self,
        at: Point,
        content: &str,
        size: f64,
        face: FontFace,
        fill: Color,
        outline: Option<&Stroke>,
        anchor: TextAnchor,
    ) {
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        let outline = outline.map_or_else(String::new, |s| {
            format!(
                r#" stroke="{}" stroke-width="{:.2}" paint-order="stroke""#,
                s.color, s.width
            )
        });
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" font-weight="{}" fill="{}" text-anchor="{}"{}>{}</text>"#,
            at.x,
            at.y,
            face.family(),
            size,
            face.weight(),
            fill,
            anchor,
            outline,
            escape(content)
        ));
    }

    /// Append every operation of a drawing plan.
    pub(super) fn plan(&mut self, plan: &DrawingPlan) {
        for op in &plan.ops {
            match op {
                DrawOp::Rect { rect, fill, stroke } => {
                    self.rect(rect.x, rect.y, rect.width, rect.height, *fill, stroke.as_ref());
                }
                DrawOp::Line { from, to, stroke } => self.line(*from, *to, stroke),
                DrawOp::Polyline { points, stroke } => {
                    self.path(&polyline_d(points, false), None, Some(stroke));
                }
                DrawOp::QuadCurve { from, control, to, stroke } => {
                    let d = format!(
                        "M{:.2},{:.2} Q{:.2},{:.2} {:.2},{:.2}",
                        from.x, from.y, control.x, control.y, to.x, to.y
                    );
                    self.path(&d, None, Some(stroke));
                }
                DrawOp::Circle { center, radius, fill } => self.circle(*center, *radius, *fill),
                DrawOp::Polygon { points, fill } => {
                    self.path(&polyline_d(points, true), Some(*fill), None);
                }
                DrawOp::Text { at, text, size, bold, fill, outline, anchor } => {
                    let face = if *bold { FontFace::Bold } else { FontFace::Regular };
                    self.text(*at, text, *size, face, *fill, outline.as_ref(), *anchor);
                }
            }
        }
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        r#"stroke="{}" stroke-width="{:.2}" stroke-linecap="butt" stroke-linejoin="miter""#,
        stroke.color, stroke.width
    );
    if let Some(dash) = stroke.dash {
        attrs.push_str(&format!(r#" stroke-dasharray="{:.2}""#, dash));
    }
    attrs
}

fn polyline_d(points: &[Point], close: bool) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{}{:.2},{:.2} ", cmd, p.x, p.y));
    }
    if close {
        d.push('Z');
    }
    d.trim_end().to_string()
}

pub(super) fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
