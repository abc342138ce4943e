//! Sample command: propose a single trial move from the identity pose.

use hpmc_moves::{propose, MoveConfig, Pose, Stage, StreamKey};
use tracing::debug;

use super::{fmt_quat, fmt_vec};
use crate::{CliError, Result};

/// Prints the trial move `particle` would receive in `sweep`.
pub fn run(config: &MoveConfig, sweep: u64, particle: usize) -> Result<()> {
    if particle >= config.n_particles() {
        return Err(CliError::InvalidArgument(format!(
            "particle {} out of range for {} particles",
            particle,
            config.n_particles()
        )));
    }

    let key = StreamKey::new(config.seed(), sweep, particle as u64, Stage::MOVE_KIND);
    debug!(?key, "Proposing trial move");

    let trial = propose(
        Pose::default(),
        key,
        config.move_size(),
        config.dimension(),
        config.move_kinds(),
    );

    println!("Trial move (sweep {}, particle {}):", sweep, particle);
    println!("  kind:        {}", trial.kind);
    println!("  position:    {}", fmt_vec(trial.pose.position));
    println!("  orientation: {}", fmt_quat(trial.pose.orientation));
    Ok(())
}
