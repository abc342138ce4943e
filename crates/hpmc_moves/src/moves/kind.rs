//! Move kind selection and single-particle trial proposals.

use std::fmt;
use std::str::FromStr;

use hpmc_core::types::{Dimension, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::{rotate, translate, MoveSize};
use crate::rng::{select_index_usize, MoveRng, Stage, StreamKey};

/// Kind of trial move attempted on a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Displace the particle position.
    Translate,
    /// Perturb the particle orientation.
    Rotate,
}

impl MoveKind {
    /// Random stream stage used for this kind's perturbation.
    #[inline]
    pub fn stage(self) -> Stage {
        match self {
            MoveKind::Translate => Stage::TRANSLATE,
            MoveKind::Rotate => Stage::ROTATE,
        }
    }
}

impl FromStr for MoveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "translate" => Ok(MoveKind::Translate),
            "rotate" => Ok(MoveKind::Rotate),
            other => Err(format!("Unknown move kind: {}", other)),
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Translate => write!(f, "translate"),
            MoveKind::Rotate => write!(f, "rotate"),
        }
    }
}

/// Position and orientation of one particle.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Particle centre.
    pub position: Vec3<f64>,
    /// Particle orientation (unit quaternion).
    pub orientation: Quat<f64>,
}

impl Pose {
    /// Creates a pose.
    #[inline]
    pub fn new(position: Vec3<f64>, orientation: Quat<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

/// A proposed trial move: the chosen kind and the candidate pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialMove {
    /// Kind of move that produced the candidate.
    pub kind: MoveKind,
    /// Candidate pose for acceptance testing.
    pub pose: Pose,
}

/// Proposes a trial move for one particle visit.
///
/// The move kind is drawn with [`select_index_usize`] from the
/// `Stage::MOVE_KIND` stream of `key`; when only one kind is enabled no draw
/// is made. The perturbation itself uses the stream for the kind's own
/// stage, so the candidate depends only on `(key, pose, size, dim, kinds)`.
/// The stage field of `key` is ignored.
///
/// # Panics
///
/// Panics if `kinds` is empty.
///
/// # Examples
///
/// ```rust
/// use hpmc_core::types::Dimension;
/// use hpmc_moves::moves::{propose, MoveKind, MoveSize, Pose};
/// use hpmc_moves::rng::{Stage, StreamKey};
///
/// let key = StreamKey::new(42, 3, 17, Stage::MOVE_KIND);
/// let size = MoveSize::new(0.1, 0.05).unwrap();
/// let kinds = [MoveKind::Translate, MoveKind::Rotate];
///
/// let a = propose(Pose::default(), key, size, Dimension::Three, &kinds);
/// let b = propose(Pose::default(), key, size, Dimension::Three, &kinds);
/// assert_eq!(a, b);
/// ```
pub fn propose(
    pose: Pose,
    key: StreamKey,
    size: MoveSize,
    dim: Dimension,
    kinds: &[MoveKind],
) -> TrialMove {
    assert!(!kinds.is_empty(), "at least one move kind must be enabled");

    let kind = if kinds.len() == 1 {
        kinds[0]
    } else {
        let mut rng = MoveRng::from_key(key.with_stage(Stage::MOVE_KIND));
        kinds[select_index_usize(&mut rng, kinds.len() - 1)]
    };

    let mut rng = MoveRng::from_key(key.with_stage(kind.stage()));
    let pose = match kind {
        MoveKind::Translate => Pose {
            position: translate(pose.position, &mut rng, size.max_displacement(), dim),
            ..pose
        },
        MoveKind::Rotate => Pose {
            orientation: rotate(pose.orientation, &mut rng, size.rotation_scale(), dim),
            ..pose
        },
    };

    TrialMove { kind, pose }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> MoveSize {
        MoveSize::new(0.1, 0.05).unwrap()
    }

    #[test]
    fn test_single_kind_is_always_chosen() {
        let key = StreamKey::new(1, 2, 3, Stage::MOVE_KIND);
        for particle in 0..100 {
            let trial = propose(
                Pose::default(),
                key.with_particle(particle),
                size(),
                Dimension::Three,
                &[MoveKind::Rotate],
            );
            assert_eq!(trial.kind, MoveKind::Rotate);
            assert_eq!(trial.pose.position, Vec3::zero());
        }
    }

    #[test]
    fn test_translate_leaves_orientation() {
        let start = Pose::new(
            Vec3::new(1.0, 2.0, 0.0),
            Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), 0.4),
        );
        let key = StreamKey::new(1, 2, 3, Stage::MOVE_KIND);
        let trial = propose(start, key, size(), Dimension::Two, &[MoveKind::Translate]);

        assert_eq!(trial.pose.orientation, start.orientation);
        assert_ne!(trial.pose.position, start.position);
        assert_eq!(trial.pose.position.z, 0.0);
    }

    #[test]
    fn test_kind_choice_is_balanced() {
        let key = StreamKey::new(9, 0, 0, Stage::MOVE_KIND);
        let kinds = [MoveKind::Translate, MoveKind::Rotate];
        let n = 20_000;
        let translations = (0..n)
            .filter(|&i| {
                propose(Pose::default(), key.with_particle(i), size(), Dimension::Three, &kinds)
                    .kind
                    == MoveKind::Translate
            })
            .count();
        let freq = translations as f64 / n as f64;
        assert!((freq - 0.5).abs() < 0.02, "translate fraction {}", freq);
    }

    #[test]
    fn test_stage_of_key_is_ignored() {
        let kinds = [MoveKind::Translate, MoveKind::Rotate];
        let a = StreamKey::new(5, 6, 7, Stage::MOVE_KIND);
        let b = a.with_stage(Stage::UPDATE_ORDER);
        assert_eq!(
            propose(Pose::default(), a, size(), Dimension::Three, &kinds),
            propose(Pose::default(), b, size(), Dimension::Three, &kinds)
        );
    }

    #[test]
    fn test_move_kind_parse_and_display() {
        assert_eq!("Translate".parse::<MoveKind>().unwrap(), MoveKind::Translate);
        assert_eq!(MoveKind::Rotate.to_string(), "rotate");
        assert!("shear".parse::<MoveKind>().is_err());
    }

    #[test]
    #[should_panic(expected = "at least one move kind")]
    fn test_empty_kinds_panics() {
        let key = StreamKey::new(1, 2, 3, Stage::MOVE_KIND);
        propose(Pose::default(), key, size(), Dimension::Three, &[]);
    }
}
