//! Translation moves.
//!
//! The displacement is drawn uniformly inside the ball (3D) or disk (2D) of
//! radius `d`: a uniform direction from `rand_distr::UnitSphere` or
//! `rand_distr::UnitCircle`, scaled by an inverse-CDF radius
//! `r = d · u^(1/dim)` so that `P(r' < r) = (r/d)^dim`.

use hpmc_core::types::{Dimension, Vec3};
use rand::Rng;
use rand_distr::{Distribution, UnitCircle, UnitSphere};

use super::assert_move_size;

/// Returns `position` displaced uniformly within distance `d`.
///
/// In 2D the `z` component of the displacement is exactly zero, so a planar
/// position stays planar bit-for-bit.
///
/// # Panics
///
/// Panics if `d` is negative, NaN or infinite.
///
/// # Examples
///
/// ```rust
/// use hpmc_core::types::{Dimension, Vec3};
/// use hpmc_moves::moves::translate;
/// use hpmc_moves::rng::{MoveRng, Stage, StreamKey};
///
/// let mut rng = MoveRng::from_key(StreamKey::new(1, 0, 0, Stage::TRANSLATE));
/// let start = Vec3::new(1.0, 2.0, 0.0);
/// let moved = translate(start, &mut rng, 0.1, Dimension::Two);
///
/// assert_eq!(moved.z, 0.0);
/// assert!((moved - start).norm() <= 0.1);
/// ```
pub fn translate<R: Rng + ?Sized>(
    position: Vec3<f64>,
    rng: &mut R,
    d: f64,
    dim: Dimension,
) -> Vec3<f64> {
    position + sample_displacement(rng, d, dim)
}

/// Samples a displacement uniformly distributed in the `dim`-ball of radius `d`.
///
/// # Panics
///
/// Panics if `d` is negative, NaN or infinite.
pub fn sample_displacement<R: Rng + ?Sized>(rng: &mut R, d: f64, dim: Dimension) -> Vec3<f64> {
    assert_move_size("maximum displacement", d);
    match dim {
        Dimension::Three => {
            let [x, y, z]: [f64; 3] = UnitSphere.sample(rng);
            let r = d * rng.gen::<f64>().cbrt();
            Vec3::new(x * r, y * r, z * r)
        }
        Dimension::Two => {
            let [x, y]: [f64; 2] = UnitCircle.sample(rng);
            let r = d * rng.gen::<f64>().sqrt();
            Vec3::new(x * r, y * r, 0.0)
        }
    }
}
