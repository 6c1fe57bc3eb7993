//! 2-opt edge exchange under time windows.
//!
//! # Algorithm
//!
//! For each pair of non-adjacent edges `(s_i, s_i+1)` and `(s_j, s_j+1)`,
//! two reconnections are scored:
//!
//! ```text
//! A: s_0 .. s_i, s_j, s_j-1, .. s_i+1, s_j+1 .. s_n-1      (reverse interior)
//! B: s_0, s_n-1, .. s_j+1, s_i+1 .. s_j, s_i, .. s_1         (reverse complement, closed only)
//! ```
//!
//! Arrival times are re-propagated from the first changed position, since
//! waiting at the new start of a reversed segment shifts every later
//! arrival. The replay resumes from the profile snapshot at `s_i`, which
//! remembers `s_i-1`, so the turns at both cut points (`s_i-1, s_i, s_j`
//! and `s_i+1, s_j+1, s_j+2`) are charged like in a full pass. The first move that improves the objective without adding
//! lateness is applied (first improvement).
//!
//! # Complexity
//!
//! O(n) per move evaluation, O(n³) per full scan; O(n²·k) with a
//! nearest-neighbour index of size k.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::sync::Arc;

use crate::neighbours::NearestNeighbours;
use crate::objective::{Fitness, Objective, RouteProfile};
use crate::problem::TourProblem;
use crate::tour::{Tour, END};

/// First-improvement 2-opt.
///
/// # Examples
///
/// ```
/// use u_tour::local_search::Local2Opt;
/// use u_tour::objective::WeightObjective;
/// use u_tour::problem::{CostMatrix, TourProblem};
/// use u_tour::tour::Tour;
///
/// let mut costs = CostMatrix::uniform(5, 10.0);
/// for i in 0..5 {
///     costs.set(i, (i + 1) % 5, 1.0);
/// }
/// let problem = TourProblem::closed(costs, 0).unwrap();
/// let mut tour = Tour::from_visits(&[0, 3, 2, 1, 4], Some(0));
///
/// let delta = Local2Opt::new().apply(&problem, &WeightObjective::default(), &mut tour);
/// assert!(delta.is_some());
/// assert!(tour.is_permutation_of(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Local2Opt {
    neighbours: Option<Arc<NearestNeighbours>>,
}

impl Local2Opt {
    /// Creates an operator that scans every edge pair.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only tries moves whose new edge `s_i → s_j` (A) or `s_j → s_i` (B)
    /// joins forward nearest neighbours.
    pub fn with_neighbours(mut self, neighbours: Arc<NearestNeighbours>) -> Self {
        self.neighbours = Some(neighbours);
        self
    }

    /// Applies the first improving move.
    ///
    /// Returns `Some(before - after)` under `objective`, or `None` if no
    /// improving move exists (the tour is then unchanged).
    pub fn apply<O: Objective>(
        &self,
        problem: &TourProblem,
        objective: &O,
        tour: &mut Tour,
    ) -> Option<O::Fitness> {
        let seq = tour.to_vec();
        let n = seq.len();
        let closed = tour.is_closed();
        if n < 3 || (closed && n < 4) {
            return None;
        }

        // profile snapshots after each position
        let mut prefix = Vec::with_capacity(n);
        let mut running = RouteProfile::start(seq[0]);
        prefix.push(running);
        for &v in &seq[1..] {
            running.visit(problem, v);
            prefix.push(running);
        }
        let current_profile = running.finish(problem, seq[0], closed);
        let current = objective.evaluate(problem, &current_profile);

        // edge p joins seq[p] to its successor; an open tour without a fixed
        // last may also cut its tail edge (seq[n-1], END)
        let edge_count = if closed || tour.last().is_none() {
            n
        } else {
            n - 1
        };

        let accept = |fitness: &O::Fitness, profile: &RouteProfile| {
            fitness.improves_on(&current) && profile.violated_time <= current_profile.violated_time
        };

        for i in 0..edge_count {
            for j in (i + 2)..edge_count {
                if closed && i == 0 && j == n - 1 {
                    continue;
                }

                if self.allows(seq[i], seq[j]) {
                    let mut profile = prefix[i];
                    for k in (i + 1..=j).rev() {
                        profile.visit(problem, seq[k]);
                    }
                    for &v in &seq[j + 1..] {
                        profile.visit(problem, v);
                    }
                    let profile = profile.finish(problem, seq[0], closed);
                    let fitness = objective.evaluate(problem, &profile);
                    if accept(&fitness, &profile) {
                        reverse_interior(tour, &seq, i, j, closed);
                        return Some(current.subtract(fitness));
                    }
                }

                if closed && self.allows(seq[j], seq[i]) {
                    let order = complement_order(&seq, i, j);
                    let profile = RouteProfile::of_visits(problem, order.iter().copied(), true);
                    let fitness = objective.evaluate(problem, &profile);
                    if accept(&fitness, &profile) {
                        relink(tour, &order);
                        return Some(current.subtract(fitness));
                    }
                }
            }
        }
        None
    }

    /// Repeats [`apply`](Self::apply) until no improving move remains.
    ///
    /// Returns the number of moves applied.
    pub fn improve<O: Objective>(&self, problem: &TourProblem, objective: &O, tour: &mut Tour) -> usize {
        let mut moves = 0;
        while self.apply(problem, objective, tour).is_some() {
            moves += 1;
        }
        moves
    }

    fn allows(&self, from: usize, to: usize) -> bool {
        self.neighbours
            .as_ref()
            .is_none_or(|nn| nn.contains(from, to))
    }
}

/// Reverses `seq[i+1..=j]` in place: cut edges first, then every interior
/// edge flipped from the back.
fn reverse_interior(tour: &mut Tour, seq: &[usize], i: usize, j: usize, closed: bool) {
    let after = match seq.get(j + 1) {
        Some(&v) => v,
        None if closed => seq[0],
        None => END,
    };
    tour.replace_edge_from(seq[i], seq[j]);
    for k in (i + 2..=j).rev() {
        tour.replace_edge_from(seq[k], seq[k - 1]);
    }
    tour.replace_edge_from(seq[i + 1], after);
}

/// Visiting order of a closed tour after reversing the segment that wraps
/// around `first`, read from `first`.
fn complement_order(seq: &[usize], i: usize, j: usize) -> Vec<usize> {
    let n = seq.len();
    let mut order = Vec::with_capacity(n);
    order.push(seq[0]);
    order.extend(seq[j + 1..].iter().rev());
    order.extend(&seq[i + 1..=j]);
    order.extend(seq[1..=i].iter().rev());
    order
}

/// Rewrites every successor of a closed tour to follow `order`.
fn relink(tour: &mut Tour, order: &[usize]) {
    for pair in order.windows(2) {
        tour.replace_edge_from(pair[0], pair[1]);
    }
    tour.replace_edge_from(order[order.len() - 1], order[0]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbours::NeighbourDirection;
    use crate::objective::{FeasibilityObjective, WeightObjective};
    use crate::problem::{CostMatrix, TimeWindow, TurnPenalties};

    fn ring_problem(default: f64) -> TourProblem {
        let mut costs = CostMatrix::uniform(5, default);
        for i in 0..5 {
            costs.set(i, (i + 1) % 5, 1.0);
        }
        costs.set(3, 1, 100.0);
        TourProblem::closed(costs, 0).expect("valid")
    }

    #[test]
    fn test_reverses_disruptive_segment() {
        let problem = ring_problem(11.5);
        let objective = WeightObjective::default();
        let mut tour = Tour::from_visits(&[0, 3, 2, 1, 4], Some(0));
        assert_eq!(objective.calculate(&problem, &tour), 47.0);

        let delta = Local2Opt::new().apply(&problem, &objective, &mut tour);

        assert_eq!(delta, Some(42.0));
        assert_eq!(tour.to_vec(), vec![0, 1, 2, 3, 4]);
        assert_eq!(objective.calculate(&problem, &tour), 5.0);
    }

    #[test]
    fn test_no_move_on_optimal_tour() {
        let problem = ring_problem(10.0);
        let mut tour = Tour::from_visits(&[0, 1, 2, 3, 4], Some(0));
        let delta = Local2Opt::new().apply(&problem, &WeightObjective::default(), &mut tour);
        assert!(delta.is_none());
        assert_eq!(tour.to_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_open_tour_can_reverse_tail() {
        // line 0-1-2-3 where position equals cost
        let mut costs = CostMatrix::new(4);
        for i in 0..4 {
            for j in 0..4 {
                costs.set(i, j, (i as f64 - j as f64).abs());
            }
        }
        let problem = TourProblem::open(costs, 0).expect("valid");
        let mut tour = Tour::from_visits(&[0, 3, 2, 1], None);
        let objective = WeightObjective::default();
        let before = objective.calculate(&problem, &tour);

        let delta = Local2Opt::new()
            .apply(&problem, &objective, &mut tour)
            .expect("improving move");

        assert_eq!(tour.to_vec(), vec![0, 1, 2, 3]);
        assert_eq!(before - objective.calculate(&problem, &tour), delta);
    }

    #[test]
    fn test_fixed_last_never_moves() {
        let mut costs = CostMatrix::uniform(5, 10.0);
        for i in 0..4 {
            costs.set(i, i + 1, 1.0);
        }
        let problem = TourProblem::new(costs, 0, Some(4)).expect("valid");
        let objective = WeightObjective::default();
        let mut tour = Tour::from_visits(&[0, 3, 2, 1, 4], Some(4));
        let moves = Local2Opt::new().improve(&problem, &objective, &mut tour);
        assert!(moves > 0);
        assert!(objective.calculate(&problem, &tour) < 40.0);
        assert_eq!(tour.visit_at(0), Some(0));
        assert_eq!(tour.tail(), 4);
        assert!(tour.is_permutation_of(5));
    }

    #[test]
    fn test_asymmetric_complement_orientation() {
        // cheap cycle is 0 -> 4 -> 3 -> 2 -> 1 -> 0
        let mut costs = CostMatrix::uniform(5, 10.0);
        for i in 0..5 {
            costs.set((i + 1) % 5, i, 1.0);
        }
        let problem = TourProblem::closed(costs, 0).expect("valid");
        let objective = WeightObjective::default();
        let mut tour = Tour::from_visits(&[0, 1, 2, 3, 4], Some(0));
        let moves = Local2Opt::new().improve(&problem, &objective, &mut tour);
        assert!(moves > 0);
        assert!(tour.is_permutation_of(5));
        assert!(objective.calculate(&problem, &tour) < 50.0);
    }

    #[test]
    fn test_delta_matches_recalculation_with_windows() {
        let mut windows = vec![TimeWindow::unlimited(); 6];
        windows[2] = TimeWindow::new(0.0, 4.0).expect("valid");
        windows[4] = TimeWindow::new(6.0, 30.0).expect("valid");
        let mut costs = CostMatrix::uniform(6, 3.0);
        costs.set(0, 2, 1.0);
        costs.set(2, 0, 1.0);
        let problem = TourProblem::closed(costs, 0)
            .expect("valid")
            .with_time_windows(windows)
            .expect("valid");
        let objective = WeightObjective::new(100.0);
        let mut tour = Tour::from_visits(&[0, 1, 3, 5, 4, 2], Some(0));

        loop {
            let before = objective.calculate(&problem, &tour);
            match Local2Opt::new().apply(&problem, &objective, &mut tour) {
                Some(delta) => {
                    let after = objective.calculate(&problem, &tour);
                    assert!((before - after - delta).abs() < 1e-9);
                    assert!(tour.is_permutation_of(6));
                }
                None => break,
            }
        }
        assert_eq!(FeasibilityObjective.calculate(&problem, &tour), 0.0);
    }

    #[test]
    fn test_neighbour_pruning_keeps_ring_move() {
        let problem = ring_problem(11.5);
        // one forward neighbour per visit: only ring edges qualify
        let nn = Arc::new(NearestNeighbours::build(&problem, 1, NeighbourDirection::Forward));
        let mut tour = Tour::from_visits(&[0, 3, 2, 1, 4], Some(0));
        let op = Local2Opt::new().with_neighbours(nn);
        let delta = op.apply(&problem, &WeightObjective::default(), &mut tour);
        // 0 -> 1 is a forward neighbour, so the full reversal is still found
        assert_eq!(delta, Some(42.0));
    }

    #[test]
    fn test_neighbour_pruning_blocks_moves() {
        let problem = ring_problem(11.5);
        let objective = WeightObjective::default();
        // every cost is at least 1, so no visit has a neighbour within 0.5
        let nn = Arc::new(NearestNeighbours::within(&problem, 0.5, NeighbourDirection::Forward));
        let mut tour = Tour::from_visits(&[0, 3, 2, 1, 4], Some(0));

        let pruned = Local2Opt::new().with_neighbours(nn);
        assert_eq!(pruned.apply(&problem, &objective, &mut tour), None);
        assert_eq!(tour.to_vec(), vec![0, 3, 2, 1, 4]);

        assert_eq!(Local2Opt::new().apply(&problem, &objective, &mut tour), Some(42.0));
    }

    #[test]
    fn test_turn_penalty_blocks_reversal() {
        let mut turns = TurnPenalties::new(5);
        turns.set(0, 1, 2, 1000.0);
        let problem = ring_problem(11.5).with_turn_penalties(turns).expect("valid");
        let objective = WeightObjective::default();
        let mut tour = Tour::from_visits(&[0, 3, 2, 1, 4], Some(0));
        assert_eq!(objective.calculate(&problem, &tour), 47.0);

        let mut moves = 0;
        loop {
            let before = objective.calculate(&problem, &tour);
            let Some(delta) = Local2Opt::new().apply(&problem, &objective, &mut tour) else {
                break;
            };
            assert_ne!(delta, 42.0);
            assert!((before - objective.calculate(&problem, &tour) - delta).abs() < 1e-9);
            moves += 1;
            assert!(moves < 100);
        }
        assert!(RouteProfile::of_tour(&problem, &tour).turn < 1000.0);
        assert!(objective.calculate(&problem, &tour) <= 47.0);
    }

    #[test]
    fn test_delta_matches_recalculation_with_turns() {
        let mut costs = CostMatrix::uniform(7, 4.0);
        for i in 0..7 {
            costs.set(i, (i + 3) % 7, 1.0);
        }
        let mut turns = TurnPenalties::new(7);
        for via in 0..7 {
            for from in 0..7 {
                for to in from + 1..7 {
                    turns.set(from, via, to, ((from * 5 + via * 3 + to) % 4) as f64);
                }
            }
        }
        for last in [Some(0), None, Some(6)] {
            let problem = TourProblem::new(costs.clone(), 0, last)
                .expect("valid")
                .with_turn_penalties(turns.clone())
                .expect("valid");
            let objective = WeightObjective::default();
            let mut tour = Tour::from_visits(&[0, 1, 2, 3, 4, 5, 6], last);
            let mut moves = 0;
            loop {
                let before = objective.calculate(&problem, &tour);
                let Some(delta) = Local2Opt::new().apply(&problem, &objective, &mut tour) else {
                    break;
                };
                let after = objective.calculate(&problem, &tour);
                assert!((before - after - delta).abs() < 1e-9, "last {last:?}");
                assert!(tour.is_permutation_of(7));
                moves += 1;
                assert!(moves < 500);
            }
        }
    }
}
