//! 2D affine transforms in SVG `matrix(a b c d e f)` layout.
//!
//! A transform maps a point as `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
//! Composition follows SVG semantics: in a transform list the left-hand
//! operation is applied last, and an ancestor chain composes root-down as
//! `parent * local`.

use crate::geometry::Point;
use std::ops::Mul;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation about the origin, angle in degrees.
    pub fn rotate(angle_deg: f64) -> Self {
        let rad = angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation about an arbitrary center, angle in degrees.
    pub fn rotate_about(angle_deg: f64, cx: f64, cy: f64) -> Self {
        Self::translate(cx, cy) * Self::rotate(angle_deg) * Self::translate(-cx, -cy)
    }

    /// Shear along the X axis, angle in degrees.
    pub fn skew_x(angle_deg: f64) -> Self {
        Self::new(1.0, 0.0, angle_deg.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    /// Shear along the Y axis, angle in degrees.
    pub fn skew_y(angle_deg: f64) -> Self {
        Self::new(1.0, angle_deg.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// Maps a point through the transform.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    /// Matrix product. `(m * n).apply(p)` equals `m.apply(n.apply(p))`.
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }
}
