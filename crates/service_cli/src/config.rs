//! Configuration resolution for the CLI.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Config file
//! 4. Default values

use std::path::Path;

use hpmc_core::types::Dimension;
use hpmc_moves::MoveConfig;
use tracing::{debug, info};

use crate::Result;

/// Particle count used when neither the file nor the CLI sets one.
const DEFAULT_PARTICLES: usize = 10;

/// Command-line overrides.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Seed override
    pub seed: Option<u64>,
    /// Dimensionality override
    pub dimension: Option<Dimension>,
    /// Particle count override
    pub particles: Option<usize>,
}

/// Builds the effective configuration from all sources.
pub fn resolve(path: &Path, overrides: &Overrides) -> Result<MoveConfig> {
    let mut config = if path.exists() {
        info!("Loading configuration from {}", path.display());
        MoveConfig::from_file(path)?
    } else {
        debug!("No configuration file at {}; using defaults", path.display());
        MoveConfig::builder().n_particles(DEFAULT_PARTICLES).build()?
    };

    config.apply_env()?;

    let mut builder = config.into_builder();
    if let Some(seed) = overrides.seed {
        builder = builder.seed(seed);
    }
    if let Some(dimension) = overrides.dimension {
        builder = builder.dimension(dimension);
    }
    if let Some(particles) = overrides.particles {
        builder = builder.n_particles(particles);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use hpmc_moves::ConfigError;

    #[test]
    fn test_defaults_without_file() {
        let config = resolve(Path::new("/nonexistent/hpmc.toml"), &Overrides::default()).unwrap();
        assert_eq!(config.n_particles(), DEFAULT_PARTICLES);
    }

    #[test]
    fn test_cli_overrides_apply() {
        let overrides = Overrides {
            seed: Some(5),
            dimension: Some(Dimension::Two),
            particles: Some(3),
        };
        let config = resolve(Path::new("/nonexistent/hpmc.toml"), &overrides).unwrap();
        assert_eq!(config.seed(), 5);
        assert_eq!(config.dimension(), Dimension::Two);
        assert_eq!(config.n_particles(), 3);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = Overrides {
            particles: Some(0),
            ..Overrides::default()
        };
        let err = resolve(Path::new("/nonexistent/hpmc.toml"), &overrides).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::InvalidParticleCount(0))
        ));
    }
}
