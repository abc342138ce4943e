//! Core geometric types for particle poses.
//!
//! This module provides:
//! - [`Vec3`]: particle positions and displacements
//! - [`Quat`]: particle orientations (unit quaternions)
//! - [`Dimension`]: 2D or 3D simulation flag
//! - [`DimensionError`]: rejection of unsupported dimensionalities

pub mod dimension;
pub mod error;
pub mod quaternion;
pub mod vector;

pub use dimension::Dimension;
pub use error::DimensionError;
pub use quaternion::Quat;
pub use vector::Vec3;
