//! Error types for tensor shape validation.

use itertools::Itertools;
use thiserror::Error;

/// Errors raised when tensor shapes violate the preconditions of an
/// operation. All of them are detected before any numeric work is done.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A specific axis does not have the required size.
    #[error("'{name}' must have size {expected} on axis {axis}, found shape {}", format_shape(.shape))]
    DimMismatch {
        name: String,
        axis: isize,
        expected: usize,
        shape: Vec<usize>,
    },

    /// Tensor rank is not large enough.
    #[error("'{name}' must have rank greater than {min_exclusive}, found rank {rank}")]
    RankTooSmall {
        name: String,
        rank: usize,
        min_exclusive: usize,
    },

    /// Batch dimensions are neither equal nor broadcast compatible.
    #[error("batch dimensions of {} are not compatible: {}", .names.join(", "), format_shapes(.shapes))]
    BatchMismatch {
        names: Vec<String>,
        shapes: Vec<Vec<usize>>,
    },

    /// An axis that must match exactly differs between tensors.
    #[error("{} must have equal size on axis {axis}: {}", .names.join(", "), format_shapes(.shapes))]
    DimensionMismatch {
        names: Vec<String>,
        axis: isize,
        shapes: Vec<Vec<usize>>,
    },

    /// Two shapes cannot be broadcast against each other.
    #[error("shapes {} and {} cannot be broadcast together", format_shape(.lhs), format_shape(.rhs))]
    Incompatible { lhs: Vec<usize>, rhs: Vec<usize> },

    /// Element count does not agree with the requested shape.
    #[error("shape {} holds {expected} elements but {actual} were given", format_shape(.shape))]
    ElementCount {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// Axis index outside the valid range for a rank.
    #[error("axis {axis} is out of range for rank {rank}")]
    InvalidAxis { axis: isize, rank: usize },
}

/// Result type alias for shape validated operations.
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Formats a shape as `[a, b, c]`.
fn format_shape(shape: &[usize]) -> String {
    format!("[{}]", shape.iter().join(", "))
}

/// Formats a list of shapes as `[a, b], [c]`.
fn format_shapes(shapes: &[Vec<usize>]) -> String {
    shapes.iter().map(|s| format_shape(s)).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dim_mismatch_display() {
        let e = ShapeError::DimMismatch {
            name: "samples".to_string(),
            axis: -1,
            expected: 4,
            shape: vec![4, 5, 3],
        };
        assert_eq!(
            e.to_string(),
            "'samples' must have size 4 on axis -1, found shape [4, 5, 3]"
        );
    }

    #[test]
    fn batch_mismatch_display() {
        let e = ShapeError::BatchMismatch {
            names: vec!["samples".to_string(), "distances".to_string()],
            shapes: vec![vec![5, 8, 4], vec![2, 8, 1]],
        };
        assert_eq!(
            e.to_string(),
            "batch dimensions of samples, distances are not compatible: [5, 8, 4], [2, 8, 1]"
        );
    }

    #[test]
    fn rank_display() {
        let e = ShapeError::RankTooSmall {
            name: "distances".to_string(),
            rank: 1,
            min_exclusive: 1,
        };
        assert_eq!(e.to_string(), "'distances' must have rank greater than 1, found rank 1");
    }

    #[test]
    fn scalar_shape_display() {
        let e = ShapeError::ElementCount {
            shape: vec![],
            expected: 1,
            actual: 0,
        };
        assert_eq!(e.to_string(), "shape [] holds 1 elements but 0 were given");
    }
}
