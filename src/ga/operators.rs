//! Built-in population generators and mutations.
//!
//! # Generators
//!
//! - [`RandomGenerator`]: uniformly shuffled tours
//! - [`GreedyGenerator`]: randomized nearest-neighbour construction
//!   (restricted candidate list of the `rcl_size` cheapest next visits)
//!
//! Both can descend every new tour with a [`Vnd`] before scoring it.
//!
//! # Mutations
//!
//! - [`ShiftMutation`]: relocates random visits, always accepted
//! - [`VnsMutation`](crate::local_search::VnsMutation): shake and descend,
//!   never worse
//!
//! # References
//!
//! - Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures"

use rand::Rng;

use super::types::{Candidate, Generator, Mutation};
use crate::local_search::{Local1Shift, Vnd};
use crate::objective::Objective;
use crate::problem::TourProblem;
use crate::random::shuffle;
use crate::tour::Tour;

/// Visits other than the fixed endpoints, in id order.
fn free_visits(problem: &TourProblem) -> Vec<usize> {
    let first = problem.first();
    (0..problem.size())
        .filter(|&v| v != first && Some(v) != problem.last())
        .collect()
}

/// Closes a visiting order with the fixed `last`, if any, and scores it.
fn finish<O: Objective>(
    problem: &TourProblem,
    objective: &O,
    vnd: Option<&Vnd>,
    mut visits: Vec<usize>,
) -> Candidate<O::Fitness> {
    if let Some(last) = problem.last().filter(|&l| l != problem.first()) {
        visits.push(last);
    }
    let mut tour = Tour::from_visits_with_capacity(problem.size(), &visits, problem.last());
    match vnd {
        Some(vnd) => {
            let fitness = vnd.improve(problem, objective, &mut tour);
            Candidate::new(tour, fitness)
        }
        None => Candidate::evaluate(problem, objective, tour),
    }
}

/// Uniformly random tours.
#[derive(Debug, Clone, Default)]
pub struct RandomGenerator {
    vnd: Option<Vnd>,
}

impl RandomGenerator {
    /// Creates a generator without local search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Descends every generated tour with `vnd`.
    pub fn with_vnd(mut self, vnd: Vnd) -> Self {
        self.vnd = Some(vnd);
        self
    }
}

impl<O: Objective> Generator<O> for RandomGenerator {
    fn generate<R: Rng>(
        &self,
        problem: &TourProblem,
        objective: &O,
        rng: &mut R,
    ) -> Candidate<O::Fitness> {
        let mut free = free_visits(problem);
        shuffle(&mut free, rng);
        let mut visits = Vec::with_capacity(problem.size());
        visits.push(problem.first());
        visits.extend(free);
        finish(problem, objective, self.vnd.as_ref(), visits)
    }
}

/// Default restricted candidate list size of [`GreedyGenerator`].
pub const DEFAULT_RCL_SIZE: usize = 3;

/// Randomized nearest-neighbour tours.
///
/// From the current visit, the next one is drawn uniformly among the
/// `rcl_size` cheapest unvisited visits. With `rcl_size == 1` this is plain
/// nearest neighbour.
///
/// # Examples
///
/// ```
/// use u_tour::ga::{Generator, GreedyGenerator};
/// use u_tour::objective::WeightObjective;
/// use u_tour::problem::{CostMatrix, TourProblem};
/// use u_tour::random::create_rng;
///
/// let mut costs = CostMatrix::uniform(5, 10.0);
/// for i in 0..5 {
///     costs.set(i, (i + 1) % 5, 1.0);
/// }
/// let problem = TourProblem::closed(costs, 0).unwrap();
/// let greedy = GreedyGenerator::new().with_rcl_size(1);
/// let c = greedy.generate(&problem, &WeightObjective::default(), &mut create_rng(42));
/// assert_eq!(c.tour.to_vec(), vec![0, 1, 2, 3, 4]);
/// assert_eq!(c.fitness, 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyGenerator {
    rcl_size: usize,
    vnd: Option<Vnd>,
}

impl Default for GreedyGenerator {
    fn default() -> Self {
        Self {
            rcl_size: DEFAULT_RCL_SIZE,
            vnd: None,
        }
    }
}

impl GreedyGenerator {
    /// Creates a generator with the default candidate list size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the restricted candidate list size (at least 1).
    pub fn with_rcl_size(mut self, size: usize) -> Self {
        self.rcl_size = size.max(1);
        self
    }

    /// Descends every generated tour with `vnd`.
    pub fn with_vnd(mut self, vnd: Vnd) -> Self {
        self.vnd = Some(vnd);
        self
    }
}

impl<O: Objective> Generator<O> for GreedyGenerator {
    fn generate<R: Rng>(
        &self,
        problem: &TourProblem,
        objective: &O,
        rng: &mut R,
    ) -> Candidate<O::Fitness> {
        let mut remaining = free_visits(problem);
        let mut visits = Vec::with_capacity(problem.size());
        let mut current = problem.first();
        visits.push(current);

        while !remaining.is_empty() {
            remaining.sort_by(|&a, &b| {
                problem
                    .cost(current, a)
                    .total_cmp(&problem.cost(current, b))
                    .then(a.cmp(&b))
            });
            let pick = rng.random_range(0..self.rcl_size.min(remaining.len()));
            current = remaining.remove(pick);
            visits.push(current);
        }
        finish(problem, objective, self.vnd.as_ref(), visits)
    }
}

/// Relocates `level` random visits and rescores; always accepted.
#[derive(Debug, Clone, Copy)]
pub struct ShiftMutation {
    level: usize,
}

impl Default for ShiftMutation {
    fn default() -> Self {
        Self { level: 1 }
    }
}

impl ShiftMutation {
    /// Creates a mutation relocating `level` visits (at least 1).
    pub fn new(level: usize) -> Self {
        Self {
            level: level.max(1),
        }
    }
}

impl<O: Objective> Mutation<O> for ShiftMutation {
    fn mutate<R: Rng>(
        &self,
        problem: &TourProblem,
        objective: &O,
        candidate: &mut Candidate<O::Fitness>,
        rng: &mut R,
    ) {
        Local1Shift.perturb(&mut candidate.tour, self.level, rng);
        candidate.fitness = objective.calculate(problem, &candidate.tour);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::WeightObjective;
    use crate::problem::CostMatrix;
    use crate::random::create_rng;

    fn ring(n: usize, last: Option<usize>) -> TourProblem {
        let mut costs = CostMatrix::uniform(n, 10.0);
        for i in 0..n {
            costs.set(i, (i + 1) % n, 1.0);
        }
        TourProblem::new(costs, 0, last).expect("valid")
    }

    #[test]
    fn test_random_generator_shapes() {
        let objective = WeightObjective::default();
        let mut rng = create_rng(42);
        for last in [Some(0), None, Some(7)] {
            let problem = ring(8, last);
            for _ in 0..10 {
                let c = RandomGenerator::new().generate(&problem, &objective, &mut rng);
                assert!(c.tour.is_permutation_of(8));
                assert_eq!(c.tour.last(), last);
                assert_eq!(c.fitness, objective.calculate(&problem, &c.tour));
                if last == Some(7) {
                    assert_eq!(c.tour.tail(), 7);
                }
            }
        }
    }

    #[test]
    fn test_random_generator_with_vnd() {
        let problem = ring(8, Some(0));
        let objective = WeightObjective::default();
        let mut rng = create_rng(42);
        let plain = RandomGenerator::new().generate(&problem, &objective, &mut create_rng(9));
        let improved = RandomGenerator::new()
            .with_vnd(Vnd::new())
            .generate(&problem, &objective, &mut create_rng(9));
        assert!(improved.fitness <= plain.fitness);
        let c = RandomGenerator::new()
            .with_vnd(Vnd::new())
            .generate(&problem, &objective, &mut rng);
        assert_eq!(c.fitness, objective.calculate(&problem, &c.tour));
    }

    #[test]
    fn test_greedy_randomized() {
        let problem = ring(10, Some(0));
        let objective = WeightObjective::default();
        let mut rng = create_rng(42);
        let greedy = GreedyGenerator::new().with_rcl_size(3);
        for _ in 0..10 {
            let c = greedy.generate(&problem, &objective, &mut rng);
            assert!(c.tour.is_permutation_of(10));
            assert_eq!(c.tour.first(), 0);
        }
    }

    #[test]
    fn test_greedy_fixed_last() {
        let problem = ring(6, Some(3));
        let c = GreedyGenerator::new().with_rcl_size(1).generate(
            &problem,
            &WeightObjective::default(),
            &mut create_rng(1),
        );
        assert_eq!(c.tour.tail(), 3);
        assert!(c.tour.is_permutation_of(6));
    }

    #[test]
    fn test_shift_mutation_rescores() {
        let problem = ring(8, Some(0));
        let objective = WeightObjective::default();
        let mut c = Candidate::evaluate(
            &problem,
            &objective,
            Tour::from_visits(&[0, 1, 2, 3, 4, 5, 6, 7], Some(0)),
        );
        let mut rng = create_rng(42);
        for _ in 0..5 {
            ShiftMutation::new(2).mutate(&problem, &objective, &mut c, &mut rng);
            assert!(c.tour.is_permutation_of(8));
            assert_eq!(c.fitness, objective.calculate(&problem, &c.tour));
        }
    }
}
