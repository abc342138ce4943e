//! Error types for geometry primitives.

use thiserror::Error;

/// Dimensionality errors.
///
/// Simulations are either two- or three-dimensional; any other value is
/// rejected when converting from a raw integer.
///
/// # Examples
/// ```
/// use hpmc_core::types::DimensionError;
///
/// let err = DimensionError::Unsupported(4);
/// assert_eq!(format!("{}", err), "Unsupported dimension 4: must be 2 or 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DimensionError {
    /// Dimension other than 2 or 3.
    #[error("Unsupported dimension {0}: must be 2 or 3")]
    Unsupported(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_error_display() {
        let err = DimensionError::Unsupported(1);
        assert!(err.to_string().contains("Unsupported dimension 1"));
    }
}
