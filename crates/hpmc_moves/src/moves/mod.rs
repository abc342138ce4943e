//! Trial move generators.
//!
//! Generators are pure functions of `(pose, rng, move size, dimension)`: they
//! take the current pose by value and return a candidate, never touching
//! particle storage.
//!
//! # Architecture
//!
//! ```text
//! propose()                       (kind.rs)
//! ├── select_index  → MoveKind    (Stage::MOVE_KIND stream)
//! ├── translate()                 (translation.rs, Stage::TRANSLATE stream)
//! └── rotate()                    (rotation.rs, Stage::ROTATE stream)
//! ```
//!
//! # Measure Preservation
//!
//! Translations are uniform over the ball (3D) or disk (2D) of radius `d`,
//! not over a cube of coordinates. Rotations in 3D step an isotropic
//! distance in quaternion space; in 2D they draw a uniform angle about `z`.
//! Both proposals are symmetric, which the acceptance step relies on for
//! detailed balance.

mod kind;
mod rotation;
mod translation;

pub use kind::{propose, MoveKind, Pose, TrialMove};
pub use rotation::{random_unit_quaternion, rotate};
pub use translation::{sample_displacement, translate};

use crate::error::ConfigError;

/// Move size parameters for one tuning epoch.
///
/// # Examples
///
/// ```rust
/// use hpmc_moves::moves::MoveSize;
///
/// let size = MoveSize::new(0.1, 0.05).unwrap();
/// assert_eq!(size.max_displacement(), 0.1);
/// assert!(MoveSize::new(-1.0, 0.05).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveSize {
    max_displacement: f64,
    rotation_scale: f64,
}

impl MoveSize {
    /// Creates validated move sizes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMoveSize` if either value is negative,
    /// NaN or infinite.
    pub fn new(max_displacement: f64, rotation_scale: f64) -> Result<Self, ConfigError> {
        check_move_size("max_displacement", max_displacement)?;
        check_move_size("rotation_scale", rotation_scale)?;
        Ok(Self {
            max_displacement,
            rotation_scale,
        })
    }

    /// Wraps sizes that already passed [`check_move_size`].
    #[inline]
    pub(crate) fn from_validated(max_displacement: f64, rotation_scale: f64) -> Self {
        Self {
            max_displacement,
            rotation_scale,
        }
    }

    /// Maximum translation distance `d`.
    #[inline]
    pub fn max_displacement(&self) -> f64 {
        self.max_displacement
    }

    /// Rotation step scale `a`.
    #[inline]
    pub fn rotation_scale(&self) -> f64 {
        self.rotation_scale
    }
}

pub(crate) fn check_move_size(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMoveSize { name, value })
    }
}

/// Fail-fast guard for the hot-path generators.
#[inline]
#[track_caller]
fn assert_move_size(name: &'static str, value: f64) {
    assert!(
        value.is_finite() && value >= 0.0,
        "{} must be finite and non-negative, got {}",
        name,
        value
    );
}
