//! Check command: statistical self-checks of the move generators.
//!
//! Reduced-size versions of the distribution tests in the `hpmc_moves`
//! test suite, run against the configured seed and dimension so an operator
//! can sanity-check a build on the target machine.

use hpmc_core::types::{Dimension, Quat, Vec3};
use hpmc_moves::{
    rotate, select_index, translate, MoveConfig, MoveRng, Stage, StreamKey, UpdateOrder,
};
use tracing::{info, warn};

use crate::{CliError, Result};

/// Relative tolerance for bucket-count checks.
const BUCKET_TOLERANCE: f64 = 0.1;

/// Absolute tolerance for fraction checks.
const FRACTION_TOLERANCE: f64 = 0.02;

/// Buckets used by the selection and ordering checks.
const BUCKETS: usize = 10;

/// Result of one self-check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Short check name.
    pub name: &'static str,
    /// Whether the check passed.
    pub passed: bool,
    /// Human-readable measurement.
    pub detail: String,
}

/// Runs every check and fails with [`CliError::ChecksFailed`] if any fail.
pub fn run(config: &MoveConfig, samples: usize) -> Result<()> {
    if samples == 0 {
        return Err(CliError::InvalidArgument(
            "samples must be positive".to_string(),
        ));
    }

    println!("========================================");
    println!("HPMC Move Self-Checks");
    println!("========================================");
    println!(
        "seed={} dimension={} samples={}",
        config.seed(),
        config.dimension(),
        samples
    );
    println!();

    let outcomes = run_checks(config, samples);
    let mut failed = 0;
    for outcome in &outcomes {
        let status = if outcome.passed { "PASS" } else { "FAIL" };
        println!("[{}] {:<24} {}", status, outcome.name, outcome.detail);
        if outcome.passed {
            info!(check = outcome.name, "Check passed");
        } else {
            warn!(check = outcome.name, detail = %outcome.detail, "Check failed");
            failed += 1;
        }
    }
    println!();

    if failed > 0 {
        return Err(CliError::ChecksFailed(failed));
    }
    println!("All {} checks passed", outcomes.len());
    Ok(())
}

/// Runs every check and returns the outcomes in a fixed order.
pub fn run_checks(config: &MoveConfig, samples: usize) -> Vec<CheckOutcome> {
    vec![
        check_select_uniform(config.seed(), samples),
        check_translate_radius(config.seed(), config.dimension(), samples),
        check_rotate_unit(config.seed(), config.dimension(), samples),
        check_shuffle_uniform(config.seed(), samples),
    ]
}

fn stream(seed: u64, stage: Stage) -> MoveRng {
    MoveRng::from_key(StreamKey::new(seed, 0, 0, stage))
}

fn worst_bucket_error(counts: &[u64], samples: usize) -> f64 {
    let expected = samples as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&c| (c as f64 - expected).abs() / expected)
        .fold(0.0, f64::max)
}

fn check_select_uniform(seed: u64, samples: usize) -> CheckOutcome {
    let mut rng = stream(seed, Stage::MOVE_KIND);
    let mut counts = [0u64; BUCKETS];
    for _ in 0..samples {
        counts[select_index(&mut rng, (BUCKETS - 1) as u32) as usize] += 1;
    }
    let worst = worst_bucket_error(&counts, samples);
    CheckOutcome {
        name: "select_index uniform",
        passed: worst < BUCKET_TOLERANCE,
        detail: format!("worst bucket deviation {:.4}", worst),
    }
}

fn check_translate_radius(seed: u64, dim: Dimension, samples: usize) -> CheckOutcome {
    let mut rng = stream(seed, Stage::TRANSLATE);
    let d = 1.0;
    let mut inner = 0usize;
    let mut escaped = 0usize;
    let mut off_plane = 0usize;
    for _ in 0..samples {
        let moved = translate(Vec3::zero(), &mut rng, d, dim);
        let r = moved.norm();
        if r > d {
            escaped += 1;
        }
        if r < d / 2.0 {
            inner += 1;
        }
        if dim.is_planar() && moved.z != 0.0 {
            off_plane += 1;
        }
    }
    // P(r < d/2) = 2^-dim for a uniform ball
    let expected = 0.5_f64.powi(dim.as_u32() as i32);
    let fraction = inner as f64 / samples as f64;
    CheckOutcome {
        name: "translate radius",
        passed: escaped == 0
            && off_plane == 0
            && (fraction - expected).abs() < FRACTION_TOLERANCE,
        detail: format!(
            "inner fraction {:.4} (expected {:.4}), escaped {}, off-plane {}",
            fraction, expected, escaped, off_plane
        ),
    }
}

fn check_rotate_unit(seed: u64, dim: Dimension, samples: usize) -> CheckOutcome {
    let mut rng = stream(seed, Stage::ROTATE);
    let mut worst = 0.0_f64;
    let mut off_axis = 0usize;
    let mut q = Quat::identity();
    for _ in 0..samples {
        q = rotate(q, &mut rng, 0.5, dim);
        worst = worst.max((q.norm() - 1.0).abs());
        if dim.is_planar() && (q.v.x != 0.0 || q.v.y != 0.0) {
            off_axis += 1;
        }
    }
    CheckOutcome {
        name: "rotate normalised",
        passed: worst < 1e-12 && off_axis == 0,
        detail: format!("worst norm error {:.2e}, off-axis {}", worst, off_axis),
    }
}

fn check_shuffle_uniform(seed: u64, samples: usize) -> CheckOutcome {
    let mut counts = [0u64; BUCKETS];
    let outcome = UpdateOrder::new(seed, BUCKETS).map(|mut order| {
        for sweep in 0..samples as u64 {
            order.shuffle(sweep);
            counts[order[0]] += 1;
        }
    });
    match outcome {
        Ok(()) => {
            let worst = worst_bucket_error(&counts, samples);
            CheckOutcome {
                name: "update order uniform",
                passed: worst < BUCKET_TOLERANCE,
                detail: format!("worst first-slot deviation {:.4}", worst),
            }
        }
        Err(e) => CheckOutcome {
            name: "update order uniform",
            passed: false,
            detail: e.to_string(),
        },
    }
}
