//! Error types for the trial move kernel.
//!
//! Every error here is a construction-time validation failure. The hot-path
//! generators take already-validated inputs and have no error surface.

use hpmc_core::types::DimensionError;
use thiserror::Error;

use crate::config::MAX_PARTICLES;

/// Configuration error for trial move generation and update ordering.
///
/// These errors occur when a [`MoveConfig`](crate::config::MoveConfig) is
/// built, loaded, or overridden with invalid values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Particle count outside valid range.
    #[error("Invalid particle count {0}: must be in range [1, {max}]", max = MAX_PARTICLES)]
    InvalidParticleCount(usize),

    /// Move size that is negative, NaN or infinite.
    #[error("Invalid {name} {value}: must be finite and non-negative")]
    InvalidMoveSize {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Shuffle cadence of zero.
    #[error("Invalid shuffle cadence {0}: must be at least 1")]
    InvalidCadence(u64),

    /// No trial move kinds enabled.
    #[error("No move kinds enabled: at least one of translate, rotate is required")]
    NoMoveKinds,

    /// Unsupported dimensionality.
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    /// Configuration file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment override could not be parsed.
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Update order construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Particle count outside valid range.
    #[error("Invalid particle count {0}: must be in range [1, {max}]", max = MAX_PARTICLES)]
    InvalidParticleCount(usize),

    /// Shuffle cadence of zero.
    #[error("Invalid shuffle cadence {0}: must be at least 1")]
    InvalidCadence(u64),
}

impl From<OrderError> for ConfigError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidParticleCount(n) => ConfigError::InvalidParticleCount(n),
            OrderError::InvalidCadence(k) => ConfigError::InvalidCadence(k),
        }
    }
}

/// Sweep planning errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Number of poses does not match the configured particle count.
    #[error("Pose count mismatch: expected {expected} poses, got {actual}")]
    PoseCountMismatch {
        /// Configured particle count.
        expected: usize,
        /// Number of poses supplied.
        actual: usize,
    },
}
