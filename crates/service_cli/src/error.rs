//! CLI error types.

use hpmc_moves::{ConfigError, OrderError, PlanError};
use thiserror::Error;

/// Errors surfaced by `hpmc-moves` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or unloadable configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Update order construction failure.
    #[error("Update order error: {0}")]
    Order(#[from] OrderError),

    /// Sweep planning failure.
    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// One or more statistical self-checks failed.
    #[error("{0} self-check(s) failed")]
    ChecksFailed(usize),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
