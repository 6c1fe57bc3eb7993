//! The objective contract between tours and the search.

use super::{Fitness, RouteProfile};
use crate::problem::TourProblem;
use crate::tour::Tour;

/// Scores tours of a [`TourProblem`].
///
/// Implementations only map a [`RouteProfile`] to a fitness; the single
/// O(n) walk over the tour is shared. Operators that evaluate tentative
/// moves build the profile themselves and call [`evaluate`](Self::evaluate)
/// directly.
///
/// # Thread Safety
///
/// `Objective` must be `Send + Sync` because offspring may be scored in
/// parallel.
pub trait Objective: Send + Sync {
    /// The fitness type produced by this objective.
    type Fitness: Fitness;

    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Maps a completed profile to a fitness.
    fn evaluate(&self, problem: &TourProblem, profile: &RouteProfile) -> Self::Fitness;

    /// Scores a whole tour.
    fn calculate(&self, problem: &TourProblem, tour: &Tour) -> Self::Fitness {
        self.evaluate(problem, &RouteProfile::of_tour(problem, tour))
    }

    /// Returns `true` when a local change can shift every later arrival,
    /// so a fitness accumulated from move deltas must not be trusted.
    /// [`Vnd`](crate::local_search::Vnd) then rescores the final tour
    /// instead of subtracting deltas.
    ///
    /// True whenever the problem carries constraining time windows.
    fn is_non_continuous(&self, problem: &TourProblem) -> bool {
        problem.has_time_windows()
    }
}
