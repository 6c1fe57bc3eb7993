//! 1-shift relocation under time windows.
//!
//! Moves a single visit to another position. Visits that arrive late are
//! tried first, pulled earlier before being pushed later; the remaining
//! visits are then tried later before earlier, which mostly trades waiting
//! time. The first strictly improving relocation is applied.
//!
//! Moves are scored by resuming a [`RouteProfile`] snapshot taken just
//! before the first changed position, so a reported delta always equals the
//! difference of two full recalculations.

use rand::Rng;

use crate::objective::{Fitness, Objective, RouteProfile};
use crate::problem::TourProblem;
use crate::tour::Tour;

/// First-improvement 1-shift, plus random relocation for shaking.
///
/// # Examples
///
/// ```
/// use u_tour::local_search::Local1Shift;
/// use u_tour::objective::WeightObjective;
/// use u_tour::problem::{CostMatrix, TourProblem};
/// use u_tour::tour::Tour;
///
/// let mut costs = CostMatrix::uniform(5, 10.0);
/// for i in 0..5 {
///     costs.set(i, (i + 1) % 5, 1.0);
/// }
/// let problem = TourProblem::closed(costs, 0).unwrap();
/// let mut tour = Tour::from_visits(&[0, 2, 1, 3, 4], Some(0));
///
/// let delta = Local1Shift.apply(&problem, &WeightObjective::default(), &mut tour);
/// assert_eq!(delta, Some(27.0));
/// assert_eq!(tour.to_vec(), vec![0, 1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Local1Shift;

impl Local1Shift {
    /// Applies the first improving relocation.
    ///
    /// Returns `Some(before - after)`, or `None` (tour unchanged) when no
    /// relocation improves the objective.
    pub fn apply<O: Objective>(
        &self,
        problem: &TourProblem,
        objective: &O,
        tour: &mut Tour,
    ) -> Option<O::Fitness> {
        let seq = tour.to_vec();
        let n = seq.len();
        let closed = tour.is_closed();
        let end = movable_end(tour, n);
        if end < 3 {
            return None;
        }

        let mut prefix = Vec::with_capacity(n);
        let mut running = RouteProfile::start(seq[0]);
        prefix.push(running);
        for &v in &seq[1..] {
            running.visit(problem, v);
            prefix.push(running);
        }
        let current = objective.evaluate(problem, &running.finish(problem, seq[0], closed));

        let late: Vec<bool> = (0..n)
            .map(|p| p > 0 && prefix[p].violations > prefix[p - 1].violations)
            .collect();

        let score = |p: usize, q: usize| -> O::Fitness {
            let mut profile;
            if q < p {
                profile = prefix[q];
                profile.visit(problem, seq[p]);
                for &v in &seq[q + 1..p] {
                    profile.visit(problem, v);
                }
            } else {
                profile = prefix[p - 1];
                for &v in &seq[p + 1..=q] {
                    profile.visit(problem, v);
                }
                profile.visit(problem, seq[p]);
            }
            let resume = q.max(p) + 1;
            for &v in &seq[resume..] {
                profile.visit(problem, v);
            }
            objective.evaluate(problem, &profile.finish(problem, seq[0], closed))
        };

        // late visits: earlier, then later
        for p in (1..end).filter(|&p| late[p]) {
            for q in earlier(p).chain(later(p, end)) {
                let fitness = score(p, q);
                if fitness.improves_on(&current) {
                    tour.shift_after(seq[p], seq[q]);
                    return Some(current.subtract(fitness));
                }
            }
        }

        // punctual visits: later, then earlier
        for p in (1..end).filter(|&p| !late[p]) {
            for q in later(p, end).chain(earlier(p)) {
                let fitness = score(p, q);
                if fitness.improves_on(&current) {
                    tour.shift_after(seq[p], seq[q]);
                    return Some(current.subtract(fitness));
                }
            }
        }
        None
    }

    /// Repeats [`apply`](Self::apply) until no improving relocation remains.
    ///
    /// Returns the number of moves applied.
    pub fn improve<O: Objective>(&self, problem: &TourProblem, objective: &O, tour: &mut Tour) -> usize {
        let mut moves = 0;
        while self.apply(problem, objective, tour).is_some() {
            moves += 1;
        }
        moves
    }

    /// Relocates `level` randomly chosen visits to random positions.
    ///
    /// `first` and a fixed `last` never move. Relocations are not scored.
    pub fn perturb<R: Rng>(&self, tour: &mut Tour, level: usize, rng: &mut R) {
        for _ in 0..level {
            let seq = tour.to_vec();
            let end = movable_end(tour, seq.len());
            if end < 3 {
                return;
            }
            let p = rng.random_range(1..end);
            let mut q = rng.random_range(0..end - 1);
            if q >= p {
                q += 1;
            }
            tour.shift_after(seq[p], seq[q]);
        }
    }
}

/// One past the last position that may be moved or used as an anchor.
fn movable_end(tour: &Tour, n: usize) -> usize {
    match tour.last() {
        Some(last) if last != tour.first() => n - 1,
        _ => n,
    }
}

/// Anchors before `p`, nearest first; `p - 1` is skipped as a no-op.
fn earlier(p: usize) -> impl Iterator<Item = usize> {
    (0..p.saturating_sub(1)).rev()
}

/// Anchors after `p`, nearest first.
fn later(p: usize, end: usize) -> impl Iterator<Item = usize> {
    p + 1..end
}
