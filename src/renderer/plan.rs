//! Drawing plan: the render-coordinate drawing commands for a field image.
//!
//! The core never produces pixels. A plan is handed to whatever rasterizes
//! the image (the SVG sink embeds it as vector elements). Render coordinates
//! are raster-style: origin top-left, y down, units are image pixels.

use serde::Serialize;

use crate::geometry::Point;
use crate::model::Color;
use super::transform::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Dash length; gaps are the same length
    pub dash: Option<f64>,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: Color, width: f64, period: f64) -> Self {
        Self { color, width, dash: Some(period) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    QuadCurve {
        from: Point,
        control: Point,
        to: Point,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
    },
    Text {
        at: Point,
        text: String,
        size: f64,
        bold: bool,
        fill: Color,
        outline: Option<Stroke>,
        anchor: TextAnchor,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DrawingPlan {
    pub ops: Vec<DrawOp>,
}

impl DrawingPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// A field image request: target pixel size plus the plan to fill it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldImage {
    pub width_px: u32,
    pub height_px: u32,
    pub plan: DrawingPlan,
}
