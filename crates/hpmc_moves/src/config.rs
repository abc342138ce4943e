//! Trial move and update order configuration.
//!
//! [`MoveConfig`] collects everything the move kernel needs from the outer
//! configuration layer: seed, dimensionality, move sizes, enabled move kinds,
//! particle count and update ordering. It can be built fluently with
//! [`MoveConfig::builder`] or loaded from TOML; both paths validate.
//!
//! # TOML Layout
//!
//! ```toml
//! seed = 42
//! dimension = 3
//! n_particles = 1000
//! max_displacement = 0.1
//! rotation_scale = 0.05
//! move_kinds = ["translate", "rotate"]
//! order_mode = "shuffle"
//! shuffle_every = 1
//! ```

use std::path::Path;

use hpmc_core::types::Dimension;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::moves::{check_move_size, MoveKind, MoveSize};
use crate::order::OrderMode;

/// Maximum number of particles an update order can address.
pub const MAX_PARTICLES: usize = u32::MAX as usize;

/// Environment variable overriding the seed.
pub const ENV_SEED: &str = "HPMC_SEED";

/// Environment variable overriding the dimensionality.
pub const ENV_DIMENSION: &str = "HPMC_DIMENSION";

/// Trial move configuration.
///
/// Immutable once built. Use [`MoveConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use hpmc_core::types::Dimension;
/// use hpmc_moves::config::MoveConfig;
///
/// let config = MoveConfig::builder()
///     .seed(42)
///     .dimension(Dimension::Two)
///     .n_particles(256)
///     .max_displacement(0.2)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_particles(), 256);
/// assert_eq!(config.dimension(), Dimension::Two);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoveConfig {
    /// Global simulation seed.
    seed: u64,
    /// Spatial dimensionality.
    dimension: Dimension,
    /// Number of particles.
    n_particles: usize,
    /// Maximum translation distance.
    max_displacement: f64,
    /// Rotation step scale.
    rotation_scale: f64,
    /// Enabled trial move kinds.
    move_kinds: Vec<MoveKind>,
    /// Update order strategy.
    order_mode: OrderMode,
    /// Recompute the update order every this many sweeps.
    shuffle_every: u64,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            dimension: Dimension::Three,
            n_particles: 1,
            max_displacement: 0.1,
            rotation_scale: 0.1,
            move_kinds: vec![MoveKind::Translate, MoveKind::Rotate],
            order_mode: OrderMode::Shuffle,
            shuffle_every: 1,
        }
    }
}

impl MoveConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MoveConfigBuilder {
        MoveConfigBuilder::default()
    }

    /// Parses and validates a TOML document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileError` for malformed TOML or unknown fields,
    /// or the validation error of the first invalid value.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MoveConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Applies `HPMC_SEED` and `HPMC_DIMENSION` from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides looked up by environment variable name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvError` for unparseable seeds and
    /// `ConfigError::Dimension` for unsupported dimensions.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = seed
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{}={} is not a u64", ENV_SEED, seed)))?;
        }
        if let Some(dim) = lookup(ENV_DIMENSION) {
            self.dimension = dim.parse()?;
        }
        self.validate()
    }

    /// Returns a builder pre-populated with this configuration.
    ///
    /// Used to layer command-line overrides on top of file and environment
    /// values.
    pub fn into_builder(self) -> MoveConfigBuilder {
        MoveConfigBuilder {
            seed: Some(self.seed),
            dimension: Some(self.dimension),
            n_particles: Some(self.n_particles),
            max_displacement: Some(self.max_displacement),
            rotation_scale: Some(self.rotation_scale),
            move_kinds: Some(self.move_kinds),
            order_mode: Some(self.order_mode),
            shuffle_every: Some(self.shuffle_every),
        }
    }

    /// Global simulation seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Spatial dimensionality.
    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Number of particles.
    #[inline]
    pub fn n_particles(&self) -> usize {
        self.n_particles
    }

    /// Move sizes for the current epoch.
    #[inline]
    pub fn move_size(&self) -> MoveSize {
        MoveSize::from_validated(self.max_displacement, self.rotation_scale)
    }

    /// Enabled move kinds.
    #[inline]
    pub fn move_kinds(&self) -> &[MoveKind] {
        &self.move_kinds
    }

    /// Update order strategy.
    #[inline]
    pub fn order_mode(&self) -> OrderMode {
        self.order_mode
    }

    /// Update order recompute cadence in sweeps.
    #[inline]
    pub fn shuffle_every(&self) -> u64 {
        self.shuffle_every
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_particles` is 0 or greater than [`MAX_PARTICLES`]
    /// - a move size is negative, NaN or infinite
    /// - `shuffle_every` is 0
    /// - no move kinds are enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_particles == 0 || self.n_particles > MAX_PARTICLES {
            return Err(ConfigError::InvalidParticleCount(self.n_particles));
        }
        check_move_size("max_displacement", self.max_displacement)?;
        check_move_size("rotation_scale", self.rotation_scale)?;
        if self.shuffle_every == 0 {
            return Err(ConfigError::InvalidCadence(self.shuffle_every));
        }
        if self.move_kinds.is_empty() {
            return Err(ConfigError::NoMoveKinds);
        }
        Ok(())
    }
}

/// Builder for [`MoveConfig`].
///
/// Unset fields take the [`MoveConfig::default`] values; the particle count
/// has no default and must be supplied.
#[derive(Clone, Debug, Default)]
pub struct MoveConfigBuilder {
    seed: Option<u64>,
    dimension: Option<Dimension>,
    n_particles: Option<usize>,
    max_displacement: Option<f64>,
    rotation_scale: Option<f64>,
    move_kinds: Option<Vec<MoveKind>>,
    order_mode: Option<OrderMode>,
    shuffle_every: Option<u64>,
}

impl MoveConfigBuilder {
    /// Sets the global seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the dimensionality.
    #[inline]
    pub fn dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Sets the particle count.
    #[inline]
    pub fn n_particles(mut self, n_particles: usize) -> Self {
        self.n_particles = Some(n_particles);
        self
    }

    /// Sets the maximum translation distance.
    #[inline]
    pub fn max_displacement(mut self, d: f64) -> Self {
        self.max_displacement = Some(d);
        self
    }

    /// Sets the rotation step scale.
    #[inline]
    pub fn rotation_scale(mut self, a: f64) -> Self {
        self.rotation_scale = Some(a);
        self
    }

    /// Sets the enabled move kinds.
    #[inline]
    pub fn move_kinds(mut self, kinds: impl Into<Vec<MoveKind>>) -> Self {
        self.move_kinds = Some(kinds.into());
        self
    }

    /// Sets the update order strategy.
    #[inline]
    pub fn order_mode(mut self, mode: OrderMode) -> Self {
        self.order_mode = Some(mode);
        self
    }

    /// Sets the update order recompute cadence.
    #[inline]
    pub fn shuffle_every(mut self, every: u64) -> Self {
        self.shuffle_every = Some(every);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParticleCount(0)` if the particle count
    /// was never set, or any error from [`MoveConfig::validate`].
    pub fn build(self) -> Result<MoveConfig, ConfigError> {
        let defaults = MoveConfig::default();
        let config = MoveConfig {
            seed: self.seed.unwrap_or(defaults.seed),
            dimension: self.dimension.unwrap_or(defaults.dimension),
            n_particles: self.n_particles.unwrap_or(0),
            max_displacement: self.max_displacement.unwrap_or(defaults.max_displacement),
            rotation_scale: self.rotation_scale.unwrap_or(defaults.rotation_scale),
            move_kinds: self.move_kinds.unwrap_or(defaults.move_kinds),
            order_mode: self.order_mode.unwrap_or(defaults.order_mode),
            shuffle_every: self.shuffle_every.unwrap_or(defaults.shuffle_every),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_builder_defaults() {
        let config = MoveConfig::builder().n_particles(10).build().unwrap();
        assert_eq!(config.seed(), 0);
        assert_eq!(config.dimension(), Dimension::Three);
        assert_eq!(config.move_kinds(), &[MoveKind::Translate, MoveKind::Rotate]);
        assert_eq!(config.order_mode(), OrderMode::Shuffle);
        assert_eq!(config.shuffle_every(), 1);
        assert_eq!(config.move_size().max_displacement(), 0.1);
    }

    #[test]
    fn test_builder_requires_particles() {
        assert_eq!(
            MoveConfig::builder().build().unwrap_err(),
            ConfigError::InvalidParticleCount(0)
        );
    }

    #[test]
    fn test_builder_validation() {
        let base = || MoveConfig::builder().n_particles(4);

        assert!(matches!(
            base().max_displacement(-1.0).build(),
            Err(ConfigError::InvalidMoveSize {
                name: "max_displacement",
                ..
            })
        ));
        assert!(matches!(
            base().rotation_scale(f64::NAN).build(),
            Err(ConfigError::InvalidMoveSize {
                name: "rotation_scale",
                ..
            })
        ));
        assert_eq!(
            base().shuffle_every(0).build().unwrap_err(),
            ConfigError::InvalidCadence(0)
        );
        assert_eq!(
            base().move_kinds(Vec::new()).build().unwrap_err(),
            ConfigError::NoMoveKinds
        );
    }

    #[test]
    fn test_into_builder_round_trip() {
        let config = MoveConfig::builder()
            .seed(11)
            .n_particles(20)
            .order_mode(OrderMode::Reversible)
            .build()
            .unwrap();
        let rebuilt = config.clone().into_builder().build().unwrap();
        assert_eq!(rebuilt, config);

        let overridden = config.into_builder().n_particles(5).build().unwrap();
        assert_eq!(overridden.n_particles(), 5);
        assert_eq!(overridden.seed(), 11);
    }

    #[test]
    fn test_from_toml_str() {
        let toml_str = r#"
            seed = 7
            dimension = 2
            n_particles = 64
            max_displacement = 0.25
            move_kinds = ["translate"]
            order_mode = "reversible"
            shuffle_every = 3
        "#;
        let config = MoveConfig::from_toml_str(toml_str).unwrap();

        assert_eq!(config.seed(), 7);
        assert_eq!(config.dimension(), Dimension::Two);
        assert_eq!(config.n_particles(), 64);
        assert_eq!(config.move_size().max_displacement(), 0.25);
        assert_eq!(config.move_size().rotation_scale(), 0.1);
        assert_eq!(config.move_kinds(), &[MoveKind::Translate]);
        assert_eq!(config.order_mode(), OrderMode::Reversible);
        assert_eq!(config.shuffle_every(), 3);
    }

    #[test]
    fn test_from_toml_rejects_bad_dimension() {
        let err = MoveConfig::from_toml_str("dimension = 4").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
        assert!(err.to_string().contains("Unsupported dimension 4"));
    }

    #[test]
    fn test_from_toml_rejects_unknown_field() {
        let err = MoveConfig::from_toml_str("temperature = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_from_toml_validates() {
        let err = MoveConfig::from_toml_str("n_particles = 0").unwrap_err();
        assert_eq!(err, ConfigError::InvalidParticleCount(0));
    }

    #[test]
    fn test_from_missing_file() {
        let err = MoveConfig::from_file("/nonexistent/hpmc.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_apply_overrides() {
        let vars: HashMap<&str, &str> = [(ENV_SEED, "99"), (ENV_DIMENSION, "2d")].into();
        let mut config = MoveConfig::builder().n_particles(3).build().unwrap();
        config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.seed(), 99);
        assert_eq!(config.dimension(), Dimension::Two);
    }

    #[test]
    fn test_apply_overrides_rejects_bad_values() {
        let mut config = MoveConfig::builder().n_particles(3).build().unwrap();

        let err = config
            .apply_overrides(|name| (name == ENV_SEED).then(|| "minus one".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));

        let err = config
            .apply_overrides(|name| (name == ENV_DIMENSION).then(|| "5".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Dimension(_)));
    }
}
