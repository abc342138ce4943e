//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod order;
pub mod plan;
pub mod sample;

use hpmc_core::types::{Quat, Vec3};

/// Formats a position as `(x, y, z)`.
pub(crate) fn fmt_vec(v: Vec3<f64>) -> String {
    format!("({:+.6}, {:+.6}, {:+.6})", v.x, v.y, v.z)
}

/// Formats an orientation as `[s; x, y, z]`.
pub(crate) fn fmt_quat(q: Quat<f64>) -> String {
    format!("[{:+.6}; {:+.6}, {:+.6}, {:+.6}]", q.s, q.v.x, q.v.y, q.v.z)
}
