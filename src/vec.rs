//! Planar vector type for cloth positions and velocities.

use crate::float::Float;
use core::ops::{Add, Neg, Sub};

/// 2D vector. The cloth lives in screen space: +x right, +y down.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    /// Zero vector.
    pub fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// Squared length (avoids sqrt).
    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Scale both components by a scalar.
    pub fn scale(self, s: F) -> Self {
        Vec2 { x: self.x * s, y: self.y * s }
    }

    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    /// Closest point to `self` on the segment `a..b`.
    ///
    /// The projection parameter is clamped to `[0, 1]`; a zero-length
    /// segment collapses to `a`.
    pub fn closest_on_segment(self, a: Self, b: Self) -> Self {
        let ab = b - a;
        let len_sq = ab.length_sq();
        if len_sq == F::zero() {
            return a;
        }
        let t = ((self - a).dot(ab) / len_sq).clamp(F::zero(), F::one());
        a + ab.scale(t)
    }

    /// Both components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}
