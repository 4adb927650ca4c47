//! Floating-point abstraction so the solver runs on `f32` or `f64`.

use core::cmp::PartialOrd;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// The arithmetic the cloth solver needs from its scalar type.
///
/// Implemented for `f32` and `f64`. Square roots go through `libm` so the
/// crate stays `no_std` and produces the same bits on every target.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + core::fmt::Debug
{
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Two (2.0).
    fn two() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Minimum of two values.
    fn min(self, other: Self) -> Self;
    /// Maximum of two values.
    fn max(self, other: Self) -> Self;
    /// Convert from f64 (grid coordinates, constants, configuration).
    fn from_f64(v: f64) -> Self;
    /// True unless the value is NaN or infinite.
    fn is_finite(self) -> bool;

    /// Clamp self to [min, max].
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// True if `self` lies in the closed unit interval.
    fn is_unit(self) -> bool {
        self >= Self::zero() && self <= Self::one()
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn two() -> Self { 2.0 }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f64(v: f64) -> Self { v as f32 }
    fn is_finite(self) -> bool { f32::is_finite(self) }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn two() -> Self { 2.0 }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f64(v: f64) -> Self { v }
    fn is_finite(self) -> bool { f64::is_finite(self) }
}
