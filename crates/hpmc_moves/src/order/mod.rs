//! Sweep update ordering.
//!
//! [`UpdateOrder`] holds the sequence in which particles are visited during a
//! sweep. The order for sweep `t` is a pure function of `(seed, t)` and the
//! fixed configuration, so a restarted simulation reproduces it bit-for-bit.
//!
//! # State
//!
//! ```text
//! new() ──► unshuffled (identity)
//!              │ shuffle(t)
//!              ▼
//!           shuffled-for-sweep(t - t % every) ◄──┐
//!              │ shuffle(t')                     │
//!              └─────────────────────────────────┘
//! ```
//!
//! # Modes
//!
//! - [`OrderMode::Shuffle`]: Fisher–Yates permutation; every particle is
//!   equally likely at every position.
//! - [`OrderMode::Reversible`]: identity or reversed, each with probability
//!   1/2. Cheap, and sufficient for detailed balance of sequential sweeps.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{MoveConfig, MAX_PARTICLES};
use crate::error::OrderError;
use crate::rng::{select_index, select_index_usize, MoveRng, Stage, StreamKey};

/// Strategy used to derive the per-sweep order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    /// Uniformly random permutation (Fisher–Yates).
    #[default]
    Shuffle,
    /// Forward or reverse index order, chosen with equal probability.
    Reversible,
}

impl FromStr for OrderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shuffle" => Ok(OrderMode::Shuffle),
            "reversible" | "reverse" => Ok(OrderMode::Reversible),
            other => Err(format!("Unknown order mode: {}", other)),
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderMode::Shuffle => write!(f, "shuffle"),
            OrderMode::Reversible => write!(f, "reversible"),
        }
    }
}

/// Particle visitation order for Monte Carlo sweeps.
///
/// # Examples
///
/// ```rust
/// use hpmc_moves::order::UpdateOrder;
///
/// let mut order = UpdateOrder::new(42, 5).unwrap();
/// assert_eq!(order.as_slice(), &[0, 1, 2, 3, 4]);
///
/// order.shuffle(100);
/// let first = order.as_slice().to_vec();
///
/// order.shuffle(101);
/// order.shuffle(100);
/// assert_eq!(order.as_slice(), first.as_slice());
///
/// let mut sorted = first.clone();
/// sorted.sort_unstable();
/// assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct UpdateOrder {
    /// Seed shared with the rest of the simulation.
    seed: u64,
    /// Permutation strategy.
    mode: OrderMode,
    /// Recompute cadence in sweeps.
    every: u64,
    /// Current permutation of [0, N).
    order: Vec<usize>,
    /// Effective sweep the current permutation was computed for.
    computed_for: Option<u64>,
}

impl UpdateOrder {
    /// Creates an unshuffled order over `n` particles.
    ///
    /// Defaults to [`OrderMode::Shuffle`] with a new permutation every sweep.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidParticleCount` if `n` is 0 or exceeds
    /// [`MAX_PARTICLES`].
    pub fn new(seed: u64, n: usize) -> Result<Self, OrderError> {
        check_particle_count(n)?;
        Ok(Self {
            seed,
            mode: OrderMode::default(),
            every: 1,
            order: (0..n).collect(),
            computed_for: None,
        })
    }

    /// Creates an order from a validated configuration.
    pub fn from_config(config: &MoveConfig) -> Result<Self, OrderError> {
        Self::new(config.seed(), config.n_particles())?
            .with_mode(config.order_mode())
            .with_cadence(config.shuffle_every())
    }

    /// Sets the permutation strategy.
    pub fn with_mode(mut self, mode: OrderMode) -> Self {
        self.mode = mode;
        self.computed_for = None;
        self
    }

    /// Recompute the permutation only every `every` sweeps.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidCadence` if `every` is 0.
    pub fn with_cadence(mut self, every: u64) -> Result<Self, OrderError> {
        if every == 0 {
            return Err(OrderError::InvalidCadence(every));
        }
        self.every = every;
        self.computed_for = None;
        Ok(self)
    }

    /// Resets to the identity order over `n` particles.
    pub fn resize(&mut self, n: usize) -> Result<(), OrderError> {
        check_particle_count(n)?;
        self.order.clear();
        self.order.extend(0..n);
        self.computed_for = None;
        Ok(())
    }

    /// Brings the order up to date for `sweep`.
    ///
    /// The permutation is derived from the stream
    /// `(seed, t0, 0, Stage::UPDATE_ORDER)` where `t0 = sweep - sweep % every`,
    /// starting from the identity. Sweeps sharing `t0` share the order, and
    /// the same `sweep` always yields the same order.
    pub fn shuffle(&mut self, sweep: u64) {
        let effective = sweep - sweep % self.every;
        if self.computed_for == Some(effective) {
            trace!(sweep, effective, "update order unchanged");
            return;
        }

        let key = StreamKey::new(self.seed, effective, 0, Stage::UPDATE_ORDER);
        let mut rng = MoveRng::from_key(key);
        let n = self.order.len();

        for (i, slot) in self.order.iter_mut().enumerate() {
            *slot = i;
        }
        match self.mode {
            OrderMode::Shuffle => {
                for i in (1..n).rev() {
                    let j = select_index_usize(&mut rng, i);
                    self.order.swap(i, j);
                }
            }
            OrderMode::Reversible => {
                if select_index(&mut rng, 1) == 1 {
                    self.order.reverse();
                }
            }
        }

        self.computed_for = Some(effective);
        debug!(sweep, effective, n, mode = %self.mode, "update order recomputed");
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`: an order covers at least one particle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Particle visited at position `i`, if in range.
    #[inline]
    pub fn get(&self, i: usize) -> Option<usize> {
        self.order.get(i).copied()
    }

    /// The whole order.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Iterates particle indices in visitation order.
    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.order.iter().copied()
    }

    /// Effective sweep of the current permutation; `None` while unshuffled.
    #[inline]
    pub fn current_sweep(&self) -> Option<u64> {
        self.computed_for
    }

    /// Permutation strategy.
    #[inline]
    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    /// Recompute cadence in sweeps.
    #[inline]
    pub fn cadence(&self) -> u64 {
        self.every
    }

    /// Seed the order streams derive from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Index<usize> for UpdateOrder {
    type Output = usize;

    #[inline]
    fn index(&self, i: usize) -> &usize {
        &self.order[i]
    }
}

impl<'a> IntoIterator for &'a UpdateOrder {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_particle_count(n: usize) -> Result<(), OrderError> {
    if n == 0 || n > MAX_PARTICLES {
        return Err(OrderError::InvalidParticleCount(n));
    }
    Ok(())
}
