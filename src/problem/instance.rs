//! Tour problem instance.

use super::{CostMatrix, ProblemError, TimeWindow, TurnPenalties};

/// An immutable single-vehicle tour problem.
///
/// Holds the cost matrix, the fixed start `first`, the optional fixed end
/// `last` and optional per-visit time windows. The `last` field encodes the
/// tour shape:
///
/// - `None`: open tour, may end anywhere
/// - `Some(first)`: closed tour, returns to `first`
/// - `Some(x)` with `x != first`: fixed end at `x`
///
/// # Examples
///
/// ```
/// use u_tour::problem::{CostMatrix, TimeWindow, TourProblem};
///
/// let problem = TourProblem::closed(CostMatrix::uniform(4, 2.0), 0)
///     .unwrap()
///     .with_time_windows(vec![TimeWindow::unlimited(); 4])
///     .unwrap();
/// assert!(problem.is_closed());
/// assert!(problem.has_time_windows());
/// assert_eq!(problem.cost(0, 3), 2.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TourProblem {
    costs: CostMatrix,
    windows: Option<Vec<TimeWindow>>,
    first: usize,
    last: Option<usize>,
    turn_penalties: Option<TurnPenalties>,
}

impl TourProblem {
    /// Creates a problem with explicit endpoints.
    pub fn new(costs: CostMatrix, first: usize, last: Option<usize>) -> Result<Self, ProblemError> {
        let size = costs.size();
        if size == 0 {
            return Err(ProblemError::EmptyMatrix);
        }
        if let Some((from, to, value)) = costs.first_invalid() {
            return Err(ProblemError::InvalidCost { from, to, value });
        }
        for visit in std::iter::once(first).chain(last) {
            if visit >= size {
                return Err(ProblemError::VisitOutOfRange { visit, size });
            }
        }
        Ok(Self {
            costs,
            windows: None,
            first,
            last,
            turn_penalties: None,
        })
    }

    /// Creates a closed problem returning to `first`.
    pub fn closed(costs: CostMatrix, first: usize) -> Result<Self, ProblemError> {
        Self::new(costs, first, Some(first))
    }

    /// Creates an open problem starting at `first`.
    pub fn open(costs: CostMatrix, first: usize) -> Result<Self, ProblemError> {
        Self::new(costs, first, None)
    }

    /// Attaches one time window per location.
    pub fn with_time_windows(mut self, windows: Vec<TimeWindow>) -> Result<Self, ProblemError> {
        if windows.len() != self.size() {
            return Err(ProblemError::WindowCountMismatch {
                expected: self.size(),
                got: windows.len(),
            });
        }
        self.windows = Some(windows);
        Ok(self)
    }

    /// Attaches a turn penalty table over the same locations as the matrix.
    ///
    /// Every turn a tour makes at an intermediate visit adds its penalty to
    /// the tour's time. A closed tour also turns at its last visit on the
    /// way back; the start is never charged.
    pub fn with_turn_penalties(mut self, penalties: TurnPenalties) -> Result<Self, ProblemError> {
        if penalties.size() != self.size() {
            return Err(ProblemError::TurnTableSizeMismatch {
                expected: self.size(),
                got: penalties.size(),
            });
        }
        self.turn_penalties = Some(penalties);
        Ok(self)
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.costs.size()
    }

    /// The cost matrix.
    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    /// Cost of travelling from `from` to `to`.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs.get(from, to)
    }

    /// Time window at `visit`, if windows are attached.
    #[inline]
    pub fn window(&self, visit: usize) -> Option<&TimeWindow> {
        self.windows.as_ref().map(|w| &w[visit])
    }

    /// All time windows, if attached.
    pub fn windows(&self) -> Option<&[TimeWindow]> {
        self.windows.as_deref()
    }

    /// Returns `true` if at least one attached window constrains arrival.
    pub fn has_time_windows(&self) -> bool {
        self.windows
            .as_ref()
            .is_some_and(|w| w.iter().any(|tw| !tw.is_unlimited()))
    }

    /// Turn penalty table, if attached.
    pub fn turn_penalties(&self) -> Option<&TurnPenalties> {
        self.turn_penalties.as_ref()
    }

    /// Penalty for `from → via → to`; zero without a table.
    #[inline]
    pub fn turn_penalty(&self, from: usize, via: usize, to: usize) -> f64 {
        self.turn_penalties
            .as_ref()
            .map_or(0.0, |t| t.get(from, via, to))
    }

    /// Fixed start.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Fixed end: `None` (open), `Some(first)` (closed) or another visit.
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// Returns `true` if the tour returns to `first`.
    pub fn is_closed(&self) -> bool {
        self.last == Some(self.first)
    }

    /// Returns `true` if the tour may end anywhere.
    pub fn is_open(&self) -> bool {
        self.last.is_none()
    }

    /// Cost of `from → to` in the closed equivalent of this problem.
    ///
    /// Identical to [`cost`](Self::cost) for closed problems. Otherwise the
    /// edge into `first` stands in for "end of tour": it is free from
    /// anywhere for open problems, and for a fixed `last` it is free from
    /// `last` and costs `cost(from, last)` from any other visit.
    #[inline]
    pub fn closed_cost(&self, from: usize, to: usize) -> f64 {
        if to != self.first || self.is_closed() {
            return self.cost(from, to);
        }
        match self.last {
            None => 0.0,
            Some(last) if from == last => 0.0,
            Some(last) => self.cost(from, last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes() {
        let closed = TourProblem::closed(CostMatrix::uniform(3, 1.0), 0).expect("valid");
        assert!(closed.is_closed());
        assert!(!closed.is_open());
        let open = TourProblem::open(CostMatrix::uniform(3, 1.0), 1).expect("valid");
        assert!(open.is_open());
        assert_eq!(open.first(), 1);
        let fixed = TourProblem::new(CostMatrix::uniform(3, 1.0), 0, Some(2)).expect("valid");
        assert!(!fixed.is_closed());
        assert!(!fixed.is_open());
        assert_eq!(fixed.last(), Some(2));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            TourProblem::closed(CostMatrix::new(0), 0).unwrap_err(),
            ProblemError::EmptyMatrix
        );
        assert_eq!(
            TourProblem::new(CostMatrix::uniform(3, 1.0), 0, Some(3)).unwrap_err(),
            ProblemError::VisitOutOfRange { visit: 3, size: 3 }
        );
        let mut costs = CostMatrix::uniform(3, 1.0);
        costs.set(1, 2, -4.0);
        assert!(matches!(
            TourProblem::closed(costs, 0),
            Err(ProblemError::InvalidCost { from: 1, to: 2, .. })
        ));
    }

    #[test]
    fn test_unreachable_is_allowed() {
        let mut costs = CostMatrix::uniform(3, 1.0);
        costs.set(1, 2, f64::INFINITY);
        assert!(TourProblem::closed(costs, 0).is_ok());
    }

    #[test]
    fn test_window_count_mismatch() {
        let problem = TourProblem::closed(CostMatrix::uniform(3, 1.0), 0).expect("valid");
        let err = problem
            .with_time_windows(vec![TimeWindow::unlimited(); 2])
            .unwrap_err();
        assert_eq!(
            err,
            ProblemError::WindowCountMismatch {
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn test_unlimited_windows_do_not_count() {
        let problem = TourProblem::closed(CostMatrix::uniform(3, 1.0), 0)
            .expect("valid")
            .with_time_windows(vec![TimeWindow::unlimited(); 3])
            .expect("valid");
        assert!(!problem.has_time_windows());
        assert!(problem.window(1).is_some());
    }

    #[test]
    fn test_turn_penalties() {
        let problem = TourProblem::closed(CostMatrix::uniform(3, 1.0), 0).expect("valid");
        assert!(problem.turn_penalties().is_none());
        assert_eq!(problem.turn_penalty(0, 1, 2), 0.0);

        let mut turns = TurnPenalties::new(3);
        turns.set(0, 1, 2, 10.0);
        let problem = problem.with_turn_penalties(turns).expect("valid");
        assert_eq!(problem.turn_penalty(0, 1, 2), 10.0);
        assert_eq!(problem.turn_penalty(2, 1, 0), 10.0);
        assert_eq!(problem.turn_penalty(1, 2, 0), 0.0);
        assert_eq!(
            problem.with_turn_penalties(TurnPenalties::new(4)).unwrap_err(),
            ProblemError::TurnTableSizeMismatch {
                expected: 3,
                got: 4
            }
        );
    }

    #[test]
    fn test_closed_cost() {
        let costs = CostMatrix::from_rows(&[
            vec![0.0, 1.0, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ])
        .expect("valid");

        let closed = TourProblem::closed(costs.clone(), 0).expect("valid");
        assert_eq!(closed.closed_cost(1, 0), 3.0);

        let open = TourProblem::open(costs.clone(), 0).expect("valid");
        assert_eq!(open.closed_cost(1, 0), 0.0);
        assert_eq!(open.closed_cost(1, 2), 4.0);

        let fixed = TourProblem::new(costs, 0, Some(2)).expect("valid");
        assert_eq!(fixed.closed_cost(2, 0), 0.0);
        assert_eq!(fixed.closed_cost(1, 0), 4.0);
        assert_eq!(fixed.closed_cost(0, 1), 1.0);
    }
}
