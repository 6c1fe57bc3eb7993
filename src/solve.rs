//! One-call tour optimization.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::eax::EaxOperator;
use crate::ga::{GaConfig, GaResult, GaSolver, GreedyGenerator};
use crate::local_search::{Vnd, VnsMutation};
use crate::neighbours::{NearestNeighbours, NeighbourDirection};
use crate::objective::Objective;
use crate::problem::TourProblem;
use crate::tour::Tour;

/// Nearest-neighbour list size used by [`solve`].
pub const DEFAULT_NEIGHBOURS: usize = 10;

/// Optimizes a tour of `problem` under `objective`.
///
/// Builds a forward nearest-neighbour index, seeds the population with
/// randomized greedy tours improved by [`Vnd`], and evolves it with EAX and
/// [`VnsMutation`]. Deterministic when `config.seed` is set.
///
/// # Panics
///
/// Panics if `config` is invalid.
///
/// # Examples
///
/// ```
/// use u_tour::ga::GaConfig;
/// use u_tour::objective::WeightObjective;
/// use u_tour::problem::{CostMatrix, TourProblem};
/// use u_tour::solve;
///
/// let mut costs = CostMatrix::uniform(10, 10.0);
/// for i in 0..10 {
///     costs.set(i, (i + 1) % 10, 1.0);
/// }
/// let problem = TourProblem::closed(costs, 0).unwrap();
///
/// let (tour, fitness) = solve(&problem, &WeightObjective::default(), &GaConfig::fast().with_seed(7));
/// assert_eq!(fitness, 10.0);
/// assert_eq!(tour.to_vec(), (0..10).collect::<Vec<_>>());
/// ```
pub fn solve<O: Objective>(
    problem: &TourProblem,
    objective: &O,
    config: &GaConfig,
) -> (Tour, O::Fitness) {
    let result = solve_with_cancel(problem, objective, config, None);
    (result.best.tour, result.best.fitness)
}

/// Like [`solve`], observing `cancel` between generations and returning
/// the full [`GaResult`].
pub fn solve_with_cancel<O: Objective>(
    problem: &TourProblem,
    objective: &O,
    config: &GaConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> GaResult<O::Fitness> {
    let k = DEFAULT_NEIGHBOURS.min(problem.size().saturating_sub(1));
    let neighbours = Arc::new(NearestNeighbours::build(
        problem,
        k,
        NeighbourDirection::Forward,
    ));
    let vnd = Vnd::new().with_neighbours(Arc::clone(&neighbours));

    let solver = GaSolver::new(
        config.clone(),
        GreedyGenerator::new().with_vnd(vnd.clone()),
        EaxOperator::default().with_neighbours(neighbours),
        VnsMutation::new(vnd),
    );
    solver.run_with_cancel(problem, objective, cancel)
}
