//! Whole-sweep proposal planning.
//!
//! Within one sweep each particle is visited exactly once, so the pose it is
//! perturbed from is its pose at the start of the sweep. Combined with keyed
//! random streams this means every proposal of a sweep can be generated up
//! front, in parallel, and handed to the acceptance stage in update order.
//!
//! # Example
//!
//! ```rust
//! use hpmc_moves::config::MoveConfig;
//! use hpmc_moves::moves::Pose;
//! use hpmc_moves::sweep::SweepPlanner;
//!
//! let config = MoveConfig::builder().seed(1).n_particles(8).build().unwrap();
//! let mut planner = SweepPlanner::new(config).unwrap();
//! let poses = vec![Pose::default(); 8];
//!
//! let plan = planner.plan(0, &poses).unwrap();
//! assert_eq!(plan.len(), 8);
//! for (particle, trial) in plan.iter() {
//!     assert!(*particle < 8);
//!     let _candidate = trial.pose;
//! }
//! ```

use rayon::prelude::*;
use tracing::debug;

use crate::config::MoveConfig;
use crate::error::{ConfigError, PlanError};
use crate::moves::{propose, Pose, TrialMove};
use crate::order::UpdateOrder;
use crate::rng::{Stage, StreamKey};

/// How proposals are evaluated across particles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    /// Single-threaded, in update order.
    Sequential,
    /// Rayon parallel iterator over the update order.
    #[default]
    Parallel,
}

/// Proposals for one sweep, in visitation order.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepPlan {
    /// Sweep index the plan was generated for.
    pub sweep: u64,
    /// `(particle index, trial move)` pairs in update order.
    pub proposals: Vec<(usize, TrialMove)>,
}

impl SweepPlan {
    /// Number of proposals.
    #[inline]
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    /// `true` if the plan holds no proposals.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Iterates `(particle, trial)` pairs in update order.
    pub fn iter(&self) -> std::slice::Iter<'_, (usize, TrialMove)> {
        self.proposals.iter()
    }
}

/// Drives the update order and per-particle proposals for successive sweeps.
#[derive(Clone, Debug)]
pub struct SweepPlanner {
    config: MoveConfig,
    order: UpdateOrder,
    execution: Execution,
}

impl SweepPlanner {
    /// Creates a planner from a validated configuration.
    pub fn new(config: MoveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let order = UpdateOrder::from_config(&config)?;
        Ok(Self {
            config,
            order,
            execution: Execution::default(),
        })
    }

    /// Selects sequential or parallel evaluation. Results are identical.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// The planner configuration.
    #[inline]
    pub fn config(&self) -> &MoveConfig {
        &self.config
    }

    /// The update order as of the last planned sweep.
    #[inline]
    pub fn order(&self) -> &UpdateOrder {
        &self.order
    }

    /// Generates the update order and one trial move per particle for `sweep`.
    ///
    /// Particle `i` draws from streams keyed `(seed, sweep, i, stage)`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::PoseCountMismatch` if `poses.len()` differs from
    /// the configured particle count.
    pub fn plan(&mut self, sweep: u64, poses: &[Pose]) -> Result<SweepPlan, PlanError> {
        let expected = self.config.n_particles();
        if poses.len() != expected {
            return Err(PlanError::PoseCountMismatch {
                expected,
                actual: poses.len(),
            });
        }

        self.order.shuffle(sweep);

        let base = StreamKey::new(self.config.seed(), sweep, 0, Stage::MOVE_KIND);
        let size = self.config.move_size();
        let dim = self.config.dimension();
        let kinds = self.config.move_kinds();
        let propose_for = |particle: usize| {
            let key = base.with_particle(particle as u64);
            (particle, propose(poses[particle], key, size, dim, kinds))
        };

        let proposals: Vec<(usize, TrialMove)> = match self.execution {
            Execution::Sequential => self.order.iter().map(propose_for).collect(),
            Execution::Parallel => self
                .order
                .as_slice()
                .par_iter()
                .map(|&particle| propose_for(particle))
                .collect(),
        };

        debug!(
            sweep,
            n = proposals.len(),
            execution = ?self.execution,
            "sweep planned"
        );
        Ok(SweepPlan { sweep, proposals })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveKind;
    use crate::order::OrderMode;
    use hpmc_core::types::{Dimension, Vec3};

    fn config(n: usize) -> MoveConfig {
        MoveConfig::builder()
            .seed(2024)
            .n_particles(n)
            .max_displacement(0.2)
            .rotation_scale(0.1)
            .build()
            .unwrap()
    }

    fn lattice(n: usize) -> Vec<Pose> {
        (0..n)
            .map(|i| Pose {
                position: Vec3::new(i as f64, 0.0, 0.0),
                ..Pose::default()
            })
            .collect()
    }

    #[test]
    fn test_plan_follows_update_order() {
        let mut planner = SweepPlanner::new(config(32)).unwrap();
        let plan = planner.plan(5, &lattice(32)).unwrap();

        let visited: Vec<usize> = plan.iter().map(|(p, _)| *p).collect();
        assert_eq!(visited.as_slice(), planner.order().as_slice());
        assert_eq!(plan.sweep, 5);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let poses = lattice(500);
        let mut parallel = SweepPlanner::new(config(500)).unwrap();
        let mut sequential = SweepPlanner::new(config(500))
            .unwrap()
            .with_execution(Execution::Sequential);

        for sweep in [0, 1, 17] {
            assert_eq!(
                parallel.plan(sweep, &poses).unwrap(),
                sequential.plan(sweep, &poses).unwrap()
            );
        }
    }

    #[test]
    fn test_proposal_independent_of_order_mode() {
        // Particle proposals depend on the particle key, not its position in the order
        let poses = lattice(16);
        let mut shuffled = SweepPlanner::new(config(16)).unwrap();
        let reversible_config = MoveConfig::builder()
            .seed(2024)
            .n_particles(16)
            .max_displacement(0.2)
            .rotation_scale(0.1)
            .order_mode(OrderMode::Reversible)
            .build()
            .unwrap();
        let mut reversible = SweepPlanner::new(reversible_config).unwrap();

        let mut a = shuffled.plan(3, &poses).unwrap().proposals;
        let mut b = reversible.plan(3, &poses).unwrap().proposals;
        a.sort_by_key(|(p, _)| *p);
        b.sort_by_key(|(p, _)| *p);
        assert_eq!(a, b);
    }

    #[test]
    fn test_candidates_stay_in_bounds() {
        let mut planner = SweepPlanner::new(config(64)).unwrap();
        let poses = lattice(64);
        let plan = planner.plan(9, &poses).unwrap();

        for (particle, trial) in plan.iter() {
            let start = poses[*particle];
            match trial.kind {
                MoveKind::Translate => {
                    assert!((trial.pose.position - start.position).norm() <= 0.2 + 1e-12);
                    assert_eq!(trial.pose.orientation, start.orientation);
                }
                MoveKind::Rotate => {
                    assert!((trial.pose.orientation.norm_squared() - 1.0).abs() < 1e-12);
                    assert_eq!(trial.pose.position, start.position);
                }
            }
        }
    }

    #[test]
    fn test_two_dimensional_plan_stays_planar() {
        let config = MoveConfig::builder()
            .seed(3)
            .n_particles(50)
            .dimension(Dimension::Two)
            .build()
            .unwrap();
        let mut planner = SweepPlanner::new(config).unwrap();
        let plan = planner.plan(0, &lattice(50)).unwrap();

        for (_, trial) in plan.iter() {
            assert_eq!(trial.pose.position.z, 0.0);
            assert_eq!(trial.pose.orientation.v.x, 0.0);
            assert_eq!(trial.pose.orientation.v.y, 0.0);
        }
    }

    #[test]
    fn test_pose_count_mismatch() {
        let mut planner = SweepPlanner::new(config(4)).unwrap();
        assert_eq!(
            planner.plan(0, &lattice(3)).unwrap_err(),
            PlanError::PoseCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }
}
