//! Turn penalties.

use super::ProblemError;

/// Symmetric penalty for passing through a visit between two others.
///
/// `get(from, via, to)` is the extra time charged when a tour arrives at
/// `via` from `from` and leaves towards `to`. The table is dense (`n³`
/// entries) and always symmetric: the turn `from → via → to` costs the same
/// as `to → via → from`, so reversing a segment leaves the turns inside it
/// unchanged and only the turns at its two ends can differ.
///
/// # Examples
///
/// ```
/// use u_tour::problem::TurnPenalties;
///
/// let mut turns = TurnPenalties::new(3);
/// turns.set(0, 1, 2, 5.0);
/// assert_eq!(turns.get(0, 1, 2), 5.0);
/// assert_eq!(turns.get(2, 1, 0), 5.0);
/// assert_eq!(turns.get(1, 0, 2), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnPenalties {
    size: usize,
    data: Vec<f64>,
}

impl TurnPenalties {
    /// Creates a table over `size` locations with every turn free.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size * size],
        }
    }

    /// Builds a table from `size³` entries in `(from, via, to)` order.
    ///
    /// Fails if the length is wrong, an entry is negative or NaN, or the
    /// entries are not symmetric in `from` and `to`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self, ProblemError> {
        if data.len() != size * size * size {
            return Err(ProblemError::InvalidTurnPenalties);
        }
        let table = Self { size, data };
        if table.data.iter().any(|p| p.is_nan() || *p < 0.0) || !table.is_symmetric() {
            return Err(ProblemError::InvalidTurnPenalties);
        }
        Ok(table)
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Penalty for `from → via → to`.
    #[inline]
    pub fn get(&self, from: usize, via: usize, to: usize) -> f64 {
        self.data[self.index(from, via, to)]
    }

    /// Sets the penalty for `from → via → to` and its mirror `to → via → from`.
    ///
    /// # Panics
    ///
    /// Panics if `penalty` is negative or NaN.
    pub fn set(&mut self, from: usize, via: usize, to: usize, penalty: f64) {
        assert!(penalty >= 0.0, "turn penalty must be non-negative, got {penalty}");
        let forward = self.index(from, via, to);
        let backward = self.index(to, via, from);
        self.data[forward] = penalty;
        self.data[backward] = penalty;
    }

    fn is_symmetric(&self) -> bool {
        let n = self.size;
        (0..n).all(|via| {
            (0..n).all(|from| {
                (from + 1..n).all(|to| self.get(from, via, to) == self.get(to, via, from))
            })
        })
    }

    #[inline]
    fn index(&self, from: usize, via: usize, to: usize) -> usize {
        (from * self.size + via) * self.size + to
    }
}
