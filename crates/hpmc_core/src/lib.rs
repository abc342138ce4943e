//! # hpmc_core: Geometry Foundation for Hard-Particle Monte Carlo
//!
//! ## Foundation Layer Role
//!
//! hpmc_core is the bottom layer of the workspace. It provides:
//! - Generic 3-vectors: `Vec3<T>` (`types::vector`)
//! - Generic quaternions: `Quat<T>` (`types::quaternion`)
//! - The simulation dimensionality flag: `Dimension` (`types::dimension`)
//! - Error types: `DimensionError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! This layer has no dependencies on other hpmc_* crates and only minimal
//! external dependencies:
//! - num-traits: Traits for generic floating-point computation
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use hpmc_core::types::{Dimension, Quat, Vec3};
//!
//! let position = Vec3::new(1.0_f64, 2.0, 0.0);
//! let step = Vec3::new(0.5, -0.5, 0.0);
//! assert_eq!(position + step, Vec3::new(1.5, 1.5, 0.0));
//!
//! let q = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), std::f64::consts::FRAC_PI_2);
//! # assert!((q.norm_squared() - 1.0).abs() < 1e-12);
//!
//! let dim = Dimension::try_from(2_u32).unwrap();
//! assert_eq!(dim, Dimension::Two);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Dimension, Vec3 and Quat

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
