//! # hpmc_moves: Trial Moves and Update Ordering for Hard-Particle Monte Carlo
//!
//! ## Kernel Layer Role
//!
//! hpmc_moves produces the random inputs of an HPMC sweep:
//! - Keyed, reproducible random streams and bias-free index selection (`rng`)
//! - Translation and rotation trial move generators (`moves`)
//! - Per-sweep particle visitation order (`order`)
//! - Whole-sweep proposal planning with Rayon (`sweep`)
//! - Validated configuration with TOML loading (`config`)
//!
//! Overlap checks, the accept/reject decision and particle storage live in
//! the sweep driver that consumes these outputs.
//!
//! ## Reproducibility
//!
//! Every random draw comes from a stream keyed by
//! `(seed, sweep, particle, stage)`. Proposals are therefore independent of
//! thread count, evaluation order and restarts.
//!
//! ## Usage Example
//!
//! ```rust
//! use hpmc_core::types::Dimension;
//! use hpmc_moves::moves::{propose, MoveKind, MoveSize, Pose};
//! use hpmc_moves::order::UpdateOrder;
//! use hpmc_moves::rng::{Stage, StreamKey};
//!
//! let seed = 42;
//! let sweep = 7;
//! let poses = vec![Pose::default(); 4];
//! let size = MoveSize::new(0.1, 0.05).unwrap();
//! let kinds = [MoveKind::Translate, MoveKind::Rotate];
//!
//! let mut order = UpdateOrder::new(seed, poses.len()).unwrap();
//! order.shuffle(sweep);
//!
//! for particle in &order {
//!     let key = StreamKey::new(seed, sweep, particle as u64, Stage::MOVE_KIND);
//!     let trial = propose(poses[particle], key, size, Dimension::Three, &kinds);
//!     // accept or reject `trial.pose` here
//!     # let _ = trial;
//! }
//! ```

pub mod config;
pub mod error;
pub mod moves;
pub mod order;
pub mod rng;
pub mod sweep;

// Public re-exports
pub use config::{MoveConfig, MoveConfigBuilder};
pub use error::{ConfigError, OrderError, PlanError};
pub use moves::{propose, rotate, translate, MoveKind, MoveSize, Pose, TrialMove};
pub use order::{OrderMode, UpdateOrder};
pub use rng::{select_index, MoveRng, Stage, StreamKey};
pub use sweep::{Execution, SweepPlan, SweepPlanner};
