//! The EAX crossover operator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::warn;
use rand::Rng;

use super::ab_cycle;
use super::config::{EaxConfig, EaxStrategy, MULTIPLE_RANDOM_PROBABILITY};
use crate::ga::{Candidate, Crossover};
use crate::neighbours::NearestNeighbours;
use crate::objective::{Fitness, Objective};
use crate::problem::TourProblem;
use crate::tour::{Tour, END};

/// Edge Assembly Crossover.
///
/// # Algorithm
///
/// 1. Decompose the directed symmetric difference of parents A and B into
///    AB-cycles
/// 2. Pick cycles per [`EaxStrategy`] and swap their A-edges for B-edges
///    on a copy of A (the E-set)
/// 3. Merge the resulting sub-cycles greedily into one Hamiltonian cycle
/// 4. Repeat up to `max_offspring` times and keep the fittest child
///
/// Open problems and problems with a fixed `last` are handled through their
/// closed equivalent (see [`TourProblem::closed_cost`]) and converted back
/// afterwards.
///
/// # Reference
///
/// Nagata, Y. & Kobayashi, S. (2013). "A powerful genetic algorithm using
/// edge assembly crossover for the traveling salesman problem",
/// *INFORMS Journal on Computing* 25(2), 346-363.
///
/// # Examples
///
/// ```
/// use u_tour::eax::EaxOperator;
/// use u_tour::problem::{CostMatrix, TourProblem};
/// use u_tour::random::create_rng;
/// use u_tour::tour::Tour;
///
/// let problem = TourProblem::closed(CostMatrix::uniform(6, 1.0), 0).unwrap();
/// let a = Tour::from_visits(&[0, 1, 2, 3, 4, 5], Some(0));
/// let b = Tour::from_visits(&[0, 2, 1, 3, 5, 4], Some(0));
///
/// let eax = EaxOperator::default();
/// let children = eax.offspring(&problem, &a, &b, &mut create_rng(42));
/// assert!(children.iter().all(|c| c.is_permutation_of(6)));
/// ```
#[derive(Debug, Default)]
pub struct EaxOperator {
    config: EaxConfig,
    neighbours: Option<Arc<NearestNeighbours>>,
    warned: AtomicBool,
}

impl EaxOperator {
    /// Creates an operator.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn new(config: EaxConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid EaxConfig: {e}");
        }
        Self {
            config,
            neighbours: None,
            warned: AtomicBool::new(false),
        }
    }

    /// Restricts sub-cycle repair to nearest-neighbour edges.
    pub fn with_neighbours(mut self, neighbours: Arc<NearestNeighbours>) -> Self {
        self.neighbours = Some(neighbours);
        self
    }

    /// The configuration.
    pub fn config(&self) -> &EaxConfig {
        &self.config
    }

    /// Builds up to `max_offspring` unscored children of `a` and `b`.
    ///
    /// Returns an empty vector when the parents have the same edges.
    ///
    /// # Panics
    ///
    /// Panics if a parent does not hold every visit of `problem`, or its
    /// endpoints differ from the problem's.
    pub fn offspring<R: Rng>(
        &self,
        problem: &TourProblem,
        a: &Tour,
        b: &Tour,
        rng: &mut R,
    ) -> Vec<Tour> {
        let next_a = self.closed_successors(problem, a);
        let next_b = self.closed_successors(problem, b);
        let cycles = ab_cycle::ab_cycles(&next_a, &next_b);
        if cycles.is_empty() {
            return Vec::new();
        }

        let neighbours = self.neighbours.as_deref();
        (0..self.config.max_offspring)
            .map(|_| {
                let mut next = next_a.clone();
                for index in self.pick(cycles.len(), rng) {
                    ab_cycle::apply(&mut next, &cycles[index], &next_b);
                }
                ab_cycle::repair(&mut next, problem, neighbours);
                assert_eq!(
                    ab_cycle::sub_cycles(&next).len(),
                    1,
                    "EAX repair left more than one cycle"
                );
                reopen(next, problem)
            })
            .collect()
    }

    fn pick<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<usize> {
        match self.config.strategy {
            EaxStrategy::SingleRandom => vec![rng.random_range(0..count)],
            EaxStrategy::MultipleRandom => {
                let picked: Vec<usize> = (0..count)
                    .filter(|_| rng.random_bool(MULTIPLE_RANDOM_PROBABILITY))
                    .collect();
                if picked.is_empty() {
                    vec![rng.random_range(0..count)]
                } else {
                    picked
                }
            }
        }
    }

    /// Successor array of the closed equivalent of `tour`.
    fn closed_successors(&self, problem: &TourProblem, tour: &Tour) -> Vec<usize> {
        let n = problem.size();
        assert!(
            tour.len() == n && tour.capacity() == n,
            "EAX parent must hold all {n} visits"
        );
        assert!(
            tour.first() == problem.first() && tour.last() == problem.last(),
            "EAX parent endpoints differ from the problem's"
        );
        if !problem.is_closed() && !self.warned.swap(true, Ordering::Relaxed) {
            warn!(
                "EAX on a non-closed problem (first {}, last {:?}): using its closed equivalent",
                problem.first(),
                problem.last()
            );
        }
        tour.successors()
            .iter()
            .map(|&v| if v == END { problem.first() } else { v })
            .collect()
    }
}

/// Turns a closed successor array back into a tour of `problem`'s shape.
fn reopen(mut next: Vec<usize>, problem: &TourProblem) -> Tour {
    let first = problem.first();
    match problem.last() {
        Some(last) if last == first => {}
        None => {
            let tail = predecessor(&next, first);
            next[tail] = END;
        }
        Some(last) => {
            let tail = predecessor(&next, first);
            if tail != last {
                let before_last = predecessor(&next, last);
                next[before_last] = next[last];
                next[tail] = last;
            }
            next[last] = END;
        }
    }
    Tour::from_successors(next, first, problem.last())
}

fn predecessor(next: &[usize], visit: usize) -> usize {
    next.iter()
        .position(|&v| v == visit)
        .unwrap_or_else(|| panic!("visit {visit} has no predecessor"))
}

impl<O: Objective> Crossover<O> for EaxOperator {
    fn crossover<R: Rng>(
        &self,
        problem: &TourProblem,
        objective: &O,
        parent_a: &Candidate<O::Fitness>,
        parent_b: &Candidate<O::Fitness>,
        rng: &mut R,
    ) -> Candidate<O::Fitness> {
        let mut best: Option<Candidate<O::Fitness>> = None;
        for tour in self.offspring(problem, &parent_a.tour, &parent_b.tour, rng) {
            let child = Candidate::evaluate(problem, objective, tour);
            if best
                .as_ref()
                .is_none_or(|b| child.fitness.is_better_than(&b.fitness))
            {
                best = Some(child);
            }
        }
        best.unwrap_or_else(|| parent_a.clone())
    }
}
