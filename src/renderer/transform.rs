//! Coordinate transform pipeline: field feet → render surface → page.
//!
//! The render stage is an aspect-preserving fit of the whole field (endzones
//! and sideline margins included) into a container, centered on whichever
//! axis has slack. The page stage is an affine matrix that turns landscape
//! logical content into coordinates on the physically portrait page.

use serde::{Deserialize, Serialize};

use crate::error::{DrillError, Result};
use crate::geometry::Point;
use crate::model::Field;

/// Width × height of a rectangle without a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Render stage
// ═══════════════════════════════════════════════════════════════════════

/// Uniform scale plus offset mapping field feet into a container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderTransform {
    pub scale: f64,
    pub offset: Point,
}

impl RenderTransform {
    /// Fit `field`'s total bounding box into `container`.
    pub fn fit(field: &Field, container: Size) -> Result<Self> {
        if !(container.width > 0.0 && container.height > 0.0)
            || !container.width.is_finite()
            || !container.height.is_finite()
        {
            return Err(DrillError::config(format!(
                "render container must have positive extent, got {}×{}",
                container.width, container.height
            )));
        }

        let container_ratio = container.width / container.height;
        if container_ratio > field.aspect_ratio() {
            // Wider than the field: height binds, center horizontally
            let scale = container.height / field.total_height();
            let offset_x = (container.width - scale * field.total_length()) / 2.0;
            Ok(Self { scale, offset: Point::new(offset_x, 0.0) })
        } else {
            let scale = container.width / field.total_length();
            let offset_y = (container.height - scale * field.total_height()) / 2.0;
            Ok(Self { scale, offset: Point::new(0.0, offset_y) })
        }
    }

    pub fn to_render(&self, p: Point) -> Point {
        p.multiply(self.scale).add(self.offset)
    }

    /// Scale a length (stroke width, font size) without the offset.
    pub fn length(&self, feet: f64) -> f64 {
        feet * self.scale
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Page stage
// ═══════════════════════════════════════════════════════════════════════

/// How logical content sits on the physical page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageRotation {
    Portrait,
    /// Page rotated 90° for display; content is laid out landscape
    Landscape,
}

/// 2×3 affine matrix `[a c e; b d f]`, as in a PDF `cm` operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl PageTransform {
    pub const IDENTITY: PageTransform = PageTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// The matrix for `rotation`, where `logical_height` is the height of
    /// the landscape content (the physical page's width).
    pub fn rotated(rotation: PageRotation, logical_height: f64) -> Self {
        match rotation {
            PageRotation::Portrait => Self::IDENTITY,
            PageRotation::Landscape => Self {
                a: 0.0,
                b: 1.0,
                c: -1.0,
                d: 0.0,
                e: logical_height,
                f: 0.0,
            },
        }
    }

    pub fn to_page(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn rect_to_page(&self, r: Rect) -> Rect {
        let a = self.to_page(Point::new(r.x, r.y));
        let b = self.to_page(Point::new(r.x + r.width, r.y + r.height));
        Rect::from_corners(a, b)
    }
}
