//! Simulation dimensionality.
//!
//! The dimensionality is fixed for the lifetime of a simulation and decides
//! which trial move branches are legal. Invalid dimensionalities are
//! unrepresentable once a [`Dimension`] has been constructed.

use std::fmt;
use std::str::FromStr;

use super::error::DimensionError;

/// Spatial dimensionality of a simulation.
///
/// # Examples
/// ```
/// use hpmc_core::types::Dimension;
///
/// assert_eq!(Dimension::Three.as_u32(), 3);
/// assert!(Dimension::try_from(5_u32).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub enum Dimension {
    /// Planar system; positions and rotations are confined to the xy plane.
    Two,
    /// Full three-dimensional system.
    #[default]
    Three,
}

impl Dimension {
    /// Returns the dimensionality as an integer (2 or 3).
    #[inline]
    pub fn as_u32(self) -> u32 {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }

    /// Returns `true` for two-dimensional systems.
    #[inline]
    pub fn is_planar(self) -> bool {
        matches!(self, Dimension::Two)
    }
}

impl TryFrom<u32> for Dimension {
    type Error = DimensionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            other => Err(DimensionError::Unsupported(other)),
        }
    }
}

impl From<Dimension> for u32 {
    fn from(dim: Dimension) -> Self {
        dim.as_u32()
    }
}

impl FromStr for Dimension {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "2" | "2d" => Ok(Dimension::Two),
            "3" | "3d" => Ok(Dimension::Three),
            // u32::MAX marks an unparseable value
            other => Err(DimensionError::Unsupported(
                other.parse().unwrap_or(u32::MAX),
            )),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.as_u32())
    }
}
