//! Error types for well block and well index computation.

use crate::Point;
use thiserror::Error;

/// Errors raised while computing the well blocks of one well path.
///
/// Every variant is fatal for the path being processed; no partial result
/// is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WellIndexError {
    /// Zero-length path, non-positive radius or non-finite coordinates
    #[error("Degenerate well path: {reason}")]
    DegenerateInput { reason: String },

    /// The traversal produced more cell records than allowed
    #[error("Well path traversal exceeded {limit} intersected cells")]
    TraversalOverflow { limit: usize },

    /// The last traversed cell differs from the cell enclosing the toe
    #[error("Traversal ended in cell {found}, but the toe lies in cell {expected}")]
    GeometricConsistency { expected: usize, found: usize },

    /// Zero or negative input to the well index formula
    #[error("Invalid well index input in cell {cell}: {reason}")]
    NumericDomain { cell: usize, reason: String },

    /// The grid could not resolve the cell enclosing a point
    #[error("No grid cell encloses {point:.6}")]
    PointOutsideGrid { point: Point },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}

pub type Result<T> = std::result::Result<T, WellIndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = WellIndexError::TraversalOverflow { limit: 500 };
        assert_eq!(
            e.to_string(),
            "Well path traversal exceeded 500 intersected cells"
        );
        let e = WellIndexError::PointOutsideGrid {
            point: Point::new(1., 2., 3.),
        };
        assert_eq!(
            e.to_string(),
            "No grid cell encloses Point(1.000000, 2.000000, 3.000000)"
        );
    }
}
