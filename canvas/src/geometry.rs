//! Geometry primitives: points, sizes, affine matrices, and fit/cover scaling.
//!
//! Matrices use the `[a, b, c, d, e, f]` layout common to 2D canvas APIs:
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in viewport, scene, or asset-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn scale(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }

    /// Linear interpolation from `self` to `to` at `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t))
    }
}

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect(self) -> f64 {
        self.width / self.height
    }

    /// Both dimensions strictly positive and finite.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[must_use]
    pub fn scaled(self, k: f64) -> Size {
        Size::new(self.width * k, self.height * k)
    }
}

/// Affine 2D transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix(pub [f64; 6]);

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Uniform scale followed by a translation.
    #[must_use]
    pub fn scale_translate(scale: f64, tx: f64, ty: f64) -> Self {
        Matrix([scale, 0.0, 0.0, scale, tx, ty])
    }

    /// Apply this transform to `p`.
    #[must_use]
    pub fn transform_point(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Apply only the linear part (no translation). Used for deltas.
    #[must_use]
    pub fn transform_vector(&self, v: Point) -> Point {
        let [a, b, c, d, _, _] = self.0;
        Point::new(a * v.x + c * v.y, b * v.x + d * v.y)
    }

    /// Inverse transform. The determinant must be non-zero.
    #[must_use]
    pub fn invert(&self) -> Matrix {
        let [a, b, c, d, e, f] = self.0;
        let r = 1.0 / (a * d - b * c);
        Matrix([
            d * r,
            -b * r,
            -c * r,
            a * r,
            (c * f - d * e) * r,
            (b * e - a * f) * r,
        ])
    }

    /// Same linear part with the translation zeroed.
    #[must_use]
    pub fn without_translation(&self) -> Matrix {
        let [a, b, c, d, _, _] = self.0;
        Matrix([a, b, c, d, 0.0, 0.0])
    }
}

/// Largest scale at which `inner` fits entirely within `outer`.
#[must_use]
pub fn find_scale_to_fit(inner: Size, outer: Size) -> f64 {
    (outer.width / inner.width).min(outer.height / inner.height)
}

/// Smallest scale at which `inner` covers `outer` entirely.
#[must_use]
pub fn find_scale_to_cover(inner: Size, outer: Size) -> f64 {
    (outer.width / inner.width).max(outer.height / inner.height)
}

#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
