//! 2D point/vector value type shared by every coordinate frame.
//!
//! Points carry no frame tag: field feet, render pixels and page points all
//! use the same type, and keeping them apart is up to the caller.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    /// Linear interpolation: `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn interpolate(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x * (1.0 - t) + other.x * t,
            self.y * (1.0 - t) + other.y * t,
        )
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point) -> f64 {
        self.subtract(other).magnitude()
    }

    /// Unit vector in the same direction.
    pub fn normalize(self) -> Result<Point, GeometryError> {
        let len = self.magnitude();
        if len == 0.0 || !len.is_finite() {
            return Err(GeometryError::ZeroLength { x: self.x, y: self.y });
        }
        Ok(self.multiply(1.0 / len))
    }

    /// Rotate by 90°: `(x, y)` → `(-y, x)`.
    pub fn orthogonal(self) -> Point {
        Point::new(-self.y, self.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_endpoints_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, -4.0);
        assert_eq!(a.interpolate(b, 0.0), a);
        assert_eq!(a.interpolate(b, 1.0), b);
        assert_eq!(a.interpolate(b, 0.5), Point::new(5.0, -2.0));
    }

    #[test]
    fn normalize_produces_unit_length() {
        let n = Point::new(3.0, 4.0).normalize().unwrap();
        assert!((n.magnitude() - 1.0).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
        assert!((n.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn normalize_zero_vector_fails() {
        let err = Point::ORIGIN.normalize().unwrap_err();
        assert_eq!(err, GeometryError::ZeroLength { x: 0.0, y: 0.0 });
    }

    #[test]
    fn orthogonal_is_perpendicular() {
        let v = Point::new(2.0, 5.0);
        let o = v.orthogonal();
        assert_eq!(o, Point::new(-5.0, 2.0));
        assert_eq!(v.x * o.x + v.y * o.y, 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }
}
