//! Plan command: generate a whole-sweep plan and summarise it.

use hpmc_moves::{Execution, MoveConfig, MoveKind, Pose, SweepPlanner};
use tracing::info;

use super::{fmt_quat, fmt_vec};
use crate::Result;

/// Plans `sweep` from identity poses and prints per-kind statistics.
pub fn run(config: &MoveConfig, sweep: u64, sequential: bool) -> Result<()> {
    let execution = if sequential {
        Execution::Sequential
    } else {
        Execution::Parallel
    };
    let mut planner = SweepPlanner::new(config.clone())?.with_execution(execution);
    let poses = vec![Pose::default(); config.n_particles()];

    let start = std::time::Instant::now();
    let plan = planner.plan(sweep, &poses)?;
    let elapsed = start.elapsed();
    info!(
        sweep,
        proposals = plan.len(),
        ?execution,
        elapsed_us = elapsed.as_micros() as u64,
        "Sweep planned"
    );

    let mut translations = 0usize;
    let mut max_step = 0.0_f64;
    let mut max_angle = 0.0_f64;
    for (_, trial) in plan.iter() {
        match trial.kind {
            MoveKind::Translate => {
                translations += 1;
                max_step = max_step.max(trial.pose.position.norm());
            }
            MoveKind::Rotate => {
                max_angle = max_angle.max(trial.pose.orientation.angle());
            }
        }
    }

    println!("Sweep {} plan ({:?}):", sweep, execution);
    println!("  proposals:        {}", plan.len());
    println!("  translations:     {}", translations);
    println!("  rotations:        {}", plan.len() - translations);
    println!("  max displacement: {:.6}", max_step);
    println!("  max rotation:     {:.6} rad", max_angle);
    if let Some((particle, trial)) = plan.iter().next() {
        println!(
            "  first visit:      particle {} {} -> {} {}",
            particle,
            trial.kind,
            fmt_vec(trial.pose.position),
            fmt_quat(trial.pose.orientation)
        );
    }
    println!("  elapsed:          {:?}", elapsed);
    Ok(())
}
