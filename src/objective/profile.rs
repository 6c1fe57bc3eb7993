//! Arrival-time propagation along a tour.

use crate::problem::TourProblem;
use crate::tour::Tour;

/// Running totals of a single pass over a visit sequence.
///
/// Time starts at zero when leaving `first`. At every visit the travel cost
/// is added to the clock; arriving before the window opens waits until
/// `min`, arriving after `max` adds the lateness to `violated_time`. For
/// closed tours the return edge to `first` is added without a window check.
///
/// With a turn table attached, passing through a visit charges
/// `turn_penalty(previous, visit, next)` to `turn` and to the clock before
/// the next edge is travelled. The start is never charged; a closed tour is
/// charged for the turn at its last visit on the way back.
///
/// Because the profile is `Copy`, a pass can be snapshotted after every
/// visit and resumed with a different continuation. Local search uses this
/// to score a move without re-walking the unchanged prefix, while
/// performing exactly the same arithmetic as a full pass.
///
/// # Examples
///
/// ```
/// use u_tour::objective::RouteProfile;
/// use u_tour::problem::{CostMatrix, TourProblem};
/// use u_tour::tour::Tour;
///
/// let problem = TourProblem::closed(CostMatrix::uniform(4, 2.0), 0).unwrap();
/// let profile = RouteProfile::of_tour(&problem, &Tour::from_visits(&[0, 1, 2, 3], Some(0)));
/// assert_eq!(profile.travel, 8.0);
/// assert_eq!(profile.time, 8.0);
/// assert_eq!(profile.violations, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteProfile {
    /// Sum of travel costs.
    pub travel: f64,
    /// Sum of waiting times.
    pub wait: f64,
    /// Departure time from the current visit (travel plus waiting so far).
    pub time: f64,
    /// Sum of lateness over all violated windows.
    pub violated_time: f64,
    /// Number of visits reached after their window closed.
    pub violations: usize,
    /// Sum of turn penalties (already included in `time`).
    pub turn: f64,
    previous: Option<usize>,
    current: usize,
}

impl RouteProfile {
    /// Starts a pass at `first`, at time zero.
    pub fn start(first: usize) -> Self {
        Self {
            travel: 0.0,
            wait: 0.0,
            time: 0.0,
            violated_time: 0.0,
            violations: 0,
            turn: 0.0,
            previous: None,
            current: first,
        }
    }

    /// The visit the pass currently stands at.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Travels from the current visit to `visit`.
    #[inline]
    pub fn visit(&mut self, problem: &TourProblem, visit: usize) {
        self.turn_towards(problem, visit);
        let cost = problem.cost(self.current, visit);
        self.travel += cost;
        self.time += cost;
        if let Some(tw) = problem.window(visit) {
            if tw.is_violated(self.time) {
                self.violated_time += tw.violation(self.time);
                self.violations += 1;
            } else {
                let wait = tw.waiting_time(self.time);
                self.wait += wait;
                self.time += wait;
            }
        }
        self.previous = Some(self.current);
        self.current = visit;
    }

    /// Ends the pass, travelling back to `first` when `closed`.
    #[inline]
    pub fn finish(mut self, problem: &TourProblem, first: usize, closed: bool) -> Self {
        if closed {
            self.turn_towards(problem, first);
            let cost = problem.cost(self.current, first);
            self.travel += cost;
            self.time += cost;
            self.previous = Some(self.current);
            self.current = first;
        }
        self
    }

    #[inline]
    fn turn_towards(&mut self, problem: &TourProblem, next: usize) {
        if let Some(previous) = self.previous {
            let penalty = problem.turn_penalty(previous, self.current, next);
            self.turn += penalty;
            self.time += penalty;
        }
    }

    /// Profiles a visit sequence starting at its first element.
    ///
    /// An empty sequence yields an all-zero profile at `problem.first()`.
    pub fn of_visits<I>(problem: &TourProblem, visits: I, closed: bool) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut iter = visits.into_iter();
        let Some(first) = iter.next() else {
            return Self::start(problem.first());
        };
        let mut profile = Self::start(first);
        for visit in iter {
            profile.visit(problem, visit);
        }
        profile.finish(problem, first, closed)
    }

    /// Profiles a tour.
    pub fn of_tour(problem: &TourProblem, tour: &Tour) -> Self {
        Self::of_visits(problem, tour.iter(), tour.is_closed())
    }

    /// Returns `true` if no window was violated.
    pub fn is_feasible(&self) -> bool {
        self.violations == 0
    }
}
