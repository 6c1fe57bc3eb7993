//! Core trait definitions for the tour GA.
//!
//! The engine only knows three pluggable roles, each generic over the
//! [`Objective`] that scores tours:
//!
//! - [`Generator`]: builds scored candidates for the initial population
//! - [`Crossover`]: recombines two parents into one scored child
//! - [`Mutation`]: perturbs a candidate in place and rescores it
//!
//! Every method receives the random generator explicitly, so a run is
//! reproducible from its seed.

use rand::Rng;

use crate::objective::{Fitness, Objective};
use crate::problem::TourProblem;
use crate::tour::Tour;

/// A tour together with its fitness under the active objective.
///
/// Owned by exactly one population slot; operators that need to try a
/// tentative change work on a clone.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<F> {
    /// The visiting order.
    pub tour: Tour,
    /// Fitness of `tour`.
    pub fitness: F,
}

impl<F: Fitness> Candidate<F> {
    /// Pairs a tour with an already known fitness.
    pub fn new(tour: Tour, fitness: F) -> Self {
        Self { tour, fitness }
    }

    /// Scores `tour` under `objective`.
    pub fn evaluate<O>(problem: &TourProblem, objective: &O, tour: Tour) -> Self
    where
        O: Objective<Fitness = F>,
    {
        let fitness = objective.calculate(problem, &tour);
        Self { tour, fitness }
    }

    /// Returns `true` if `self` is strictly better than `other`.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.fitness.is_better_than(&other.fitness)
    }
}

/// Builds members of the initial population.
///
/// # Thread Safety
///
/// Operators must be `Send + Sync` because offspring may be produced in
/// parallel.
pub trait Generator<O: Objective>: Send + Sync {
    /// Creates one scored candidate containing every visit of `problem`.
    fn generate<R: Rng>(
        &self,
        problem: &TourProblem,
        objective: &O,
        rng: &mut R,
    ) -> Candidate<O::Fitness>;
}

/// Recombines two parents.
pub trait Crossover<O: Objective>: Send + Sync {
    /// Produces one scored child of `parent_a` and `parent_b`.
    fn crossover<R: Rng>(
        &self,
        problem: &TourProblem,
        objective: &O,
        parent_a: &Candidate<O::Fitness>,
        parent_b: &Candidate<O::Fitness>,
        rng: &mut R,
    ) -> Candidate<O::Fitness>;
}

/// Perturbs a candidate.
pub trait Mutation<O: Objective>: Send + Sync {
    /// Mutates `candidate` in place; its fitness must match its tour
    /// afterwards.
    fn mutate<R: Rng>(
        &self,
        problem: &TourProblem,
        objective: &O,
        candidate: &mut Candidate<O::Fitness>,
        rng: &mut R,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::WeightObjective;
    use crate::problem::CostMatrix;

    #[test]
    fn test_candidate_evaluate() {
        let problem = TourProblem::closed(CostMatrix::uniform(4, 3.0), 0).expect("valid");
        let tour = Tour::from_visits(&[0, 1, 2, 3], Some(0));
        let c = Candidate::evaluate(&problem, &WeightObjective::default(), tour);
        assert_eq!(c.fitness, 12.0);
    }

    #[test]
    fn test_candidate_order() {
        let tour = Tour::from_visits(&[0, 1, 2], Some(0));
        let a = Candidate::new(tour.clone(), 5.0);
        let b = Candidate::new(tour, 7.0);
        assert!(a.is_better_than(&b));
        assert!(!b.is_better_than(&a));
    }
}
