//! Problem construction errors.

use std::fmt;

/// Error returned when a [`TourProblem`](super::TourProblem) cannot be built
/// from the given data.
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// The cost matrix has no locations.
    EmptyMatrix,
    /// A cost entry is negative or NaN.
    InvalidCost { from: usize, to: usize, value: f64 },
    /// A fixed endpoint does not exist in the matrix.
    VisitOutOfRange { visit: usize, size: usize },
    /// The number of time windows differs from the number of locations.
    WindowCountMismatch { expected: usize, got: usize },
    /// The turn penalty data has the wrong length, a negative/NaN entry or
    /// is not symmetric.
    InvalidTurnPenalties,
    /// The turn penalty table covers a different number of locations.
    TurnTableSizeMismatch { expected: usize, got: usize },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemError::EmptyMatrix => write!(f, "cost matrix is empty"),
            ProblemError::InvalidCost { from, to, value } => {
                write!(f, "invalid cost {value} from {from} to {to}")
            }
            ProblemError::VisitOutOfRange { visit, size } => {
                write!(f, "visit {visit} out of range for {size} locations")
            }
            ProblemError::WindowCountMismatch { expected, got } => {
                write!(f, "expected {expected} time windows, got {got}")
            }
            ProblemError::InvalidTurnPenalties => write!(f, "invalid turn penalty table"),
            ProblemError::TurnTableSizeMismatch { expected, got } => {
                write!(f, "expected a turn table over {expected} locations, got {got}")
            }
        }
    }
}

impl std::error::Error for ProblemError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ProblemError::VisitOutOfRange { visit: 7, size: 5 };
        assert_eq!(err.to_string(), "visit 7 out of range for 5 locations");
        let err = ProblemError::WindowCountMismatch {
            expected: 5,
            got: 4,
        };
        assert_eq!(err.to_string(), "expected 5 time windows, got 4");
    }
}
