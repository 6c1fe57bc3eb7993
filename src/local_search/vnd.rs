//! Variable neighbourhood descent and the VNS mutation built on it.
//!
//! # Algorithm (VND)
//!
//! 1. Apply 2-opt moves until none improves
//! 2. Apply one 1-shift move; if it improved, go back to 1
//! 3. Stop when neither neighbourhood improves (or the iteration cap hits)
//!
//! # Algorithm (VNS shaking)
//!
//! Starting at level 1: relocate `level` random visits of a copy, descend
//! with VND, and keep the copy if it is strictly better (back to level 1);
//! otherwise increase the level until `max_level` is exhausted.
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use std::sync::Arc;

use rand::Rng;

use super::{Local1Shift, Local2Opt};
use crate::ga::{Candidate, Mutation};
use crate::neighbours::NearestNeighbours;
use crate::objective::{Fitness, Objective};
use crate::problem::TourProblem;
use crate::tour::Tour;

/// Default cap on VND steps per descent.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// 2-opt then 1-shift descent.
///
/// # Examples
///
/// ```
/// use u_tour::local_search::Vnd;
/// use u_tour::objective::WeightObjective;
/// use u_tour::problem::{CostMatrix, TourProblem};
/// use u_tour::tour::Tour;
///
/// let mut costs = CostMatrix::uniform(6, 10.0);
/// for i in 0..6 {
///     costs.set(i, (i + 1) % 6, 1.0);
/// }
/// let problem = TourProblem::closed(costs, 0).unwrap();
/// let mut tour = Tour::from_visits(&[0, 2, 1, 3, 5, 4], Some(0));
///
/// let fitness = Vnd::new().improve(&problem, &WeightObjective::default(), &mut tour);
/// assert!(fitness < 60.0);
/// ```
#[derive(Debug, Clone)]
pub struct Vnd {
    two_opt: Local2Opt,
    one_shift: Local1Shift,
    max_iterations: usize,
}

impl Default for Vnd {
    fn default() -> Self {
        Self {
            two_opt: Local2Opt::new(),
            one_shift: Local1Shift,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl Vnd {
    /// Creates a descent with unrestricted 2-opt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts 2-opt to nearest-neighbour edges.
    pub fn with_neighbours(mut self, neighbours: Arc<NearestNeighbours>) -> Self {
        self.two_opt = self.two_opt.with_neighbours(neighbours);
        self
    }

    /// Sets the step cap.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n.max(1);
        self
    }

    /// Step cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Descends from `tour` and returns its final fitness.
    ///
    /// For continuous objectives the fitness is tracked by subtracting each
    /// reported move delta; otherwise the final tour is rescored in full.
    pub fn improve<O: Objective>(
        &self,
        problem: &TourProblem,
        objective: &O,
        tour: &mut Tour,
    ) -> O::Fitness {
        let rescore = objective.is_non_continuous(problem);
        let mut fitness = objective.calculate(problem, tour);
        for _ in 0..self.max_iterations {
            let delta = match self.two_opt.apply(problem, objective, tour) {
                Some(delta) => delta,
                None => match self.one_shift.apply(problem, objective, tour) {
                    Some(delta) => delta,
                    None => break,
                },
            };
            if !rescore {
                fitness = fitness.subtract(delta);
            }
        }
        if rescore {
            fitness = objective.calculate(problem, tour);
        }
        fitness
    }
}

/// Default largest shaking level of [`VnsMutation`].
pub const DEFAULT_MAX_LEVEL: usize = 3;

/// Mutation that shakes with random 1-shifts and descends with [`Vnd`].
///
/// Never makes a candidate worse.
#[derive(Debug, Clone)]
pub struct VnsMutation {
    vnd: Vnd,
    max_level: usize,
}

impl Default for VnsMutation {
    fn default() -> Self {
        Self::new(Vnd::default())
    }
}

impl VnsMutation {
    /// Creates the mutation around a descent.
    pub fn new(vnd: Vnd) -> Self {
        Self {
            vnd,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }

    /// Sets the largest number of visits relocated in one shake.
    pub fn with_max_level(mut self, level: usize) -> Self {
        self.max_level = level.max(1);
        self
    }
}

impl<O: Objective> Mutation<O> for VnsMutation {
    fn mutate<R: Rng>(
        &self,
        problem: &TourProblem,
        objective: &O,
        candidate: &mut Candidate<O::Fitness>,
        rng: &mut R,
    ) {
        let mut level = 1;
        while level <= self.max_level {
            let mut tour = candidate.tour.clone();
            Local1Shift.perturb(&mut tour, level, rng);
            let fitness = self.vnd.improve(problem, objective, &mut tour);
            if fitness.improves_on(&candidate.fitness) {
                candidate.tour = tour;
                candidate.fitness = fitness;
                level = 1;
            } else {
                level += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{FeasibilityObjective, WeightObjective};
    use crate::problem::{CostMatrix, TimeWindow, TurnPenalties};
    use crate::random::create_rng;

    fn ring(n: usize) -> TourProblem {
        let mut costs = CostMatrix::uniform(n, 10.0);
        for i in 0..n {
            costs.set(i, (i + 1) % n, 1.0);
        }
        TourProblem::closed(costs, 0).expect("valid")
    }

    #[test]
    fn test_vnd_never_worsens() {
        let problem = ring(8);
        let objective = WeightObjective::default();
        let mut tour = Tour::from_visits(&[0, 5, 2, 7, 1, 4, 3, 6], Some(0));
        let before = objective.calculate(&problem, &tour);
        let after = Vnd::new().improve(&problem, &objective, &mut tour);
        assert!(after <= before);
        assert_eq!(after, objective.calculate(&problem, &tour));
        assert!(tour.is_permutation_of(8));
    }

    #[test]
    fn test_vnd_repairs_windows() {
        let mut windows = vec![TimeWindow::unlimited(); 5];
        windows[2] = TimeWindow::new(1.0, 3.0).expect("valid");
        let problem = TourProblem::closed(CostMatrix::uniform(5, 2.0), 0)
            .expect("valid")
            .with_time_windows(windows)
            .expect("valid");
        let mut tour = Tour::from_visits(&[0, 1, 3, 4, 2], Some(0));
        let violated = Vnd::new().improve(&problem, &FeasibilityObjective, &mut tour);
        assert_eq!(violated, 0.0);
    }

    #[test]
    fn test_vnd_iteration_cap() {
        let problem = ring(8);
        let objective = WeightObjective::default();
        let mut tour = Tour::from_visits(&[0, 5, 2, 7, 1, 4, 3, 6], Some(0));
        let before = objective.calculate(&problem, &tour);
        let vnd = Vnd::new().with_max_iterations(1);
        assert_eq!(vnd.max_iterations(), 1);
        let after = vnd.improve(&problem, &objective, &mut tour);
        assert!(after < before);
    }

    #[test]
    fn test_vnd_tracked_fitness_matches_rescore() {
        let mut turns = TurnPenalties::new(8);
        turns.set(1, 2, 3, 4.0);
        turns.set(5, 6, 7, 2.0);
        let objective = WeightObjective::default();
        for problem in [ring(8), ring(8).with_turn_penalties(turns).expect("valid")] {
            assert!(!objective.is_non_continuous(&problem));
            let mut tour = Tour::from_visits(&[0, 5, 2, 7, 1, 4, 3, 6], Some(0));
            let fitness = Vnd::new().improve(&problem, &objective, &mut tour);
            assert_eq!(fitness, objective.calculate(&problem, &tour));
        }
    }

    #[test]
    fn test_vnd_rescores_with_windows() {
        let mut windows = vec![TimeWindow::unlimited(); 8];
        windows[3] = TimeWindow::new(20.0, 40.0).expect("valid");
        windows[6] = TimeWindow::new(0.0, 5.0).expect("valid");
        let problem = ring(8).with_time_windows(windows).expect("valid");
        let objective = WeightObjective::new(100.0);
        assert!(objective.is_non_continuous(&problem));
        let mut tour = Tour::from_visits(&[0, 5, 2, 7, 1, 4, 3, 6], Some(0));
        let before = objective.calculate(&problem, &tour);
        let fitness = Vnd::new().improve(&problem, &objective, &mut tour);
        assert!(fitness < before);
        assert_eq!(fitness, objective.calculate(&problem, &tour));
    }

    #[test]
    fn test_vns_mutation_never_worsens() {
        let problem = ring(10);
        let objective = WeightObjective::default();
        let tour = Tour::from_visits(&[0, 3, 6, 9, 2, 5, 8, 1, 4, 7], Some(0));
        let mut candidate = Candidate::evaluate(&problem, &objective, tour);
        let before = candidate.fitness;
        let mut rng = create_rng(42);

        VnsMutation::default()
            .with_max_level(2)
            .mutate(&problem, &objective, &mut candidate, &mut rng);

        assert!(candidate.fitness <= before);
        assert_eq!(candidate.fitness, objective.calculate(&problem, &candidate.tour));
        assert!(candidate.tour.is_permutation_of(10));
    }
}
