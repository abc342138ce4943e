//! Rotation moves.
//!
//! # 3D
//!
//! A uniformly random unit quaternion `r` is drawn with Marsaglia's method
//! (two points uniform in the unit disk). The candidate is `q + a·r`
//! renormalised: a step of length `a` along an isotropic direction on the
//! unit 3-sphere. `a` is therefore a length scale in quaternion space rather
//! than a literal angle; for small `a` the induced rotation angle scales
//! linearly with `a`. The proposal is symmetric because `r` and `-r` are
//! equally likely.
//!
//! # 2D
//!
//! The rotation is restricted to the `z` axis. A half-angle `α` is drawn
//! uniformly from `[-a/2, a/2]` and the candidate is
//! `q · (cos α, sin α ẑ)` renormalised, so the rotation angle `2|α|` never
//! exceeds `a`. The in-plane vector components of a planar orientation stay
//! exactly zero.
//!
//! # Reference
//!
//! - Marsaglia, G. (1972). "Choosing a Point from the Surface of a Sphere".
//!   Annals of Mathematical Statistics 43(2).

use hpmc_core::types::{Dimension, Quat, Vec3};
use rand::Rng;

use super::assert_move_size;

/// Returns `orientation` perturbed by a random rotation of size `a`.
///
/// The result has unit norm.
///
/// # Panics
///
/// Panics if `a` is negative, NaN or infinite.
///
/// # Examples
///
/// ```rust
/// use hpmc_core::types::{Dimension, Quat};
/// use hpmc_moves::moves::rotate;
/// use hpmc_moves::rng::{MoveRng, Stage, StreamKey};
///
/// let mut rng = MoveRng::from_key(StreamKey::new(1, 0, 0, Stage::ROTATE));
/// let q = rotate(Quat::identity(), &mut rng, 0.1, Dimension::Two);
///
/// assert_eq!(q.v.x, 0.0);
/// assert_eq!(q.v.y, 0.0);
/// assert!((q.norm_squared() - 1.0).abs() < 1e-12);
/// ```
pub fn rotate<R: Rng + ?Sized>(
    orientation: Quat<f64>,
    rng: &mut R,
    a: f64,
    dim: Dimension,
) -> Quat<f64> {
    assert_move_size("rotation scale", a);
    match dim {
        Dimension::Three => {
            let r = random_unit_quaternion(rng);
            (orientation + r * a).normalized()
        }
        Dimension::Two => {
            let half = a / 2.0;
            let alpha = rng.gen_range(-half..=half);
            let step = Quat::new(alpha.cos(), Vec3::new(0.0, 0.0, alpha.sin()));
            (orientation * step).normalized()
        }
    }
}

/// Draws a unit quaternion uniformly distributed on the 3-sphere.
pub fn random_unit_quaternion<R: Rng + ?Sized>(rng: &mut R) -> Quat<f64> {
    let (u1, u2, s1) = disk_point(rng);
    let (u3, u4, s2) = loop {
        let p = disk_point(rng);
        // s2 == 0 would divide by zero below
        if p.2 > 0.0 {
            break p;
        }
    };

    let k = ((1.0 - s1) / s2).sqrt();
    Quat::new(u1, Vec3::new(u2, u3 * k, u4 * k))
}

/// Rejection-samples a point uniformly in the open unit disk, returning
/// `(x, y, x² + y²)`.
#[inline]
fn disk_point<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64, f64) {
    loop {
        let x = rng.gen_range(-1.0..1.0);
        let y = rng.gen_range(-1.0..1.0);
        let s = x * x + y * y;
        if s < 1.0 {
            return (x, y, s);
        }
    }
}
