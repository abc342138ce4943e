//! Quaternions for particle orientations.
//!
//! Orientations are unit quaternions `q = (s, v)` with scalar part `s` and
//! vector part `v`. A rotation by angle `θ` about unit axis `n` is
//! `(cos(θ/2), sin(θ/2) n)`. Composition uses the Hamilton product, so
//! `q * r` applies `r` in the body frame of `q`.

use num_traits::Float;
use std::ops::{Add, Mul, Sub};

use super::vector::Vec3;

/// A quaternion with scalar part `s` and vector part `v`.
///
/// # Examples
/// ```
/// use hpmc_core::types::{Quat, Vec3};
///
/// let q = Quat::<f64>::identity();
/// let p = Vec3::new(1.0, 2.0, 3.0);
/// assert_eq!(q.rotate(p), p);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat<T> {
    /// Scalar part
    pub s: T,
    /// Vector part
    pub v: Vec3<T>,
}

impl<T: Float> Quat<T> {
    /// Creates a quaternion from scalar and vector parts.
    #[inline]
    pub fn new(s: T, v: Vec3<T>) -> Self {
        Self { s, v }
    }

    /// Returns the identity rotation `(1, 0, 0, 0)`.
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::one(), Vec3::zero())
    }

    /// Creates the rotation by `angle` radians about `axis`.
    ///
    /// The axis is normalised; a zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3<T>, angle: T) -> Self {
        let len = axis.norm();
        if len == T::zero() {
            return Self::identity();
        }
        let half = angle / (T::one() + T::one());
        Self::new(half.cos(), axis * (half.sin() / len))
    }

    /// Squared norm `s² + |v|²`.
    #[inline]
    pub fn norm_squared(self) -> T {
        self.s * self.s + self.v.norm_squared()
    }

    /// Norm of the quaternion.
    #[inline]
    pub fn norm(self) -> T {
        self.norm_squared().sqrt()
    }

    /// Returns the quaternion scaled to unit norm.
    ///
    /// Components that are exactly zero stay exactly zero. A zero quaternion
    /// is returned unchanged.
    #[inline]
    pub fn normalized(self) -> Self {
        let n = self.norm();
        if n == T::zero() {
            return self;
        }
        self * n.recip()
    }

    /// Conjugate `(s, -v)`; the inverse for unit quaternions.
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(self.s, -self.v)
    }

    /// Rotation angle in `[0, π]` of the rotation this unit quaternion encodes.
    ///
    /// `q` and `-q` describe the same rotation and yield the same angle.
    #[inline]
    pub fn angle(self) -> T {
        let two = T::one() + T::one();
        two * self.v.norm().atan2(self.s.abs())
    }

    /// Rotates vector `p` by this unit quaternion (`q p q*`).
    pub fn rotate(self, p: Vec3<T>) -> Vec3<T> {
        let two = T::one() + T::one();
        let t = self.v.cross(p) * two;
        p + t * self.s + self.v.cross(t)
    }

    /// Returns `true` if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.s.is_finite() && self.v.is_finite()
    }
}

impl<T: Float> Default for Quat<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Float> Mul for Quat<T> {
    type Output = Self;

    /// Hamilton product.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.s * rhs.s - self.v.dot(rhs.v),
            rhs.v * self.s + self.v * rhs.s + self.v.cross(rhs.v),
        )
    }
}

impl<T: Float> Mul<T> for Quat<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.s * rhs, self.v * rhs)
    }
}

impl<T: Float> Add for Quat<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.s + rhs.s, self.v + rhs.v)
    }
}

impl<T: Float> Sub for Quat<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.s - rhs.s, self.v - rhs.v)
    }
}
