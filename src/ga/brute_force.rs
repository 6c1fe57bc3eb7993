//! Exhaustive search for tiny instances.

use super::types::Candidate;
use crate::objective::{Fitness, Objective};
use crate::problem::TourProblem;
use crate::tour::Tour;

/// Enumerates every ordering of the free visits and keeps the best.
///
/// `first` and a fixed `last` stay in place, so a problem of `n` visits
/// costs `(n - 1)!` (or `(n - 2)!`) evaluations. The GA hands problems with
/// fewer than five visits to this solver.
///
/// # Examples
///
/// ```
/// use u_tour::ga::BruteForceSolver;
/// use u_tour::objective::WeightObjective;
/// use u_tour::problem::{CostMatrix, TourProblem};
///
/// let costs = CostMatrix::from_rows(&[
///     vec![0.0, 1.0, 9.0, 9.0],
///     vec![9.0, 0.0, 9.0, 1.0],
///     vec![1.0, 9.0, 0.0, 9.0],
///     vec![9.0, 9.0, 1.0, 0.0],
/// ]).unwrap();
/// let problem = TourProblem::closed(costs, 0).unwrap();
/// let best = BruteForceSolver::solve(&problem, &WeightObjective::default());
/// assert_eq!(best.tour.to_vec(), vec![0, 1, 3, 2]);
/// assert_eq!(best.fitness, 4.0);
/// ```
pub struct BruteForceSolver;

impl BruteForceSolver {
    /// Returns an optimal candidate; ties keep the lexicographically
    /// smallest order.
    pub fn solve<O: Objective>(problem: &TourProblem, objective: &O) -> Candidate<O::Fitness> {
        let first = problem.first();
        let fixed_last = problem.last().filter(|&l| l != first);
        let mut free: Vec<usize> = (0..problem.size())
            .filter(|&v| v != first && Some(v) != fixed_last)
            .collect();

        let mut best: Option<Candidate<O::Fitness>> = None;
        loop {
            let mut visits = Vec::with_capacity(problem.size());
            visits.push(first);
            visits.extend_from_slice(&free);
            visits.extend(fixed_last);
            let tour = Tour::from_visits_with_capacity(problem.size(), &visits, problem.last());
            let candidate = Candidate::evaluate(problem, objective, tour);
            if best
                .as_ref()
                .is_none_or(|b| candidate.fitness.is_better_than(&b.fitness))
            {
                best = Some(candidate);
            }
            if !next_permutation(&mut free) {
                break;
            }
        }
        best.unwrap_or_else(|| unreachable!("at least one ordering is evaluated"))
    }
}

/// Advances `items` to the next lexicographic permutation.
///
/// Returns `false` (leaving `items` sorted descending) after the last one.
fn next_permutation(items: &mut [usize]) -> bool {
    let Some(pivot) = items.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let swap = items
        .iter()
        .rposition(|&x| x > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, swap);
    items[pivot + 1..].reverse();
    true
}
