//! Standard tour objectives.

use super::{Lexicographic, Objective, RouteProfile};
use crate::problem::TourProblem;

/// Default weight of one unit of lateness in [`WeightObjective`].
pub const DEFAULT_VIOLATION_PENALTY: f64 = 1_000_000.0;

/// Tour duration plus a large penalty per unit of lateness.
///
/// `fitness = time + violated_time * penalty`, where `time` includes
/// travel and waiting. Once a tour is feasible this is its duration.
///
/// # Examples
///
/// ```
/// use u_tour::objective::{Objective, WeightObjective};
/// use u_tour::problem::{CostMatrix, TourProblem};
/// use u_tour::tour::Tour;
///
/// let problem = TourProblem::closed(CostMatrix::uniform(3, 4.0), 0).unwrap();
/// let tour = Tour::from_visits(&[0, 1, 2], Some(0));
/// assert_eq!(WeightObjective::default().calculate(&problem, &tour), 12.0);
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightObjective {
    /// Weight of one unit of lateness.
    pub penalty: f64,
}

impl WeightObjective {
    /// Creates the objective with a custom lateness penalty.
    pub fn new(penalty: f64) -> Self {
        Self { penalty }
    }
}

impl Default for WeightObjective {
    fn default() -> Self {
        Self::new(DEFAULT_VIOLATION_PENALTY)
    }
}

impl Objective for WeightObjective {
    type Fitness = f64;

    fn name(&self) -> &'static str {
        "weight"
    }

    fn evaluate(&self, _problem: &TourProblem, profile: &RouteProfile) -> f64 {
        if profile.violated_time == 0.0 {
            profile.time
        } else {
            profile.time + profile.violated_time * self.penalty
        }
    }
}

/// Total lateness only; zero for every feasible tour.
///
/// A cheap inner objective for reaching feasibility before optimizing cost.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeasibilityObjective;

impl Objective for FeasibilityObjective {
    type Fitness = f64;

    fn name(&self) -> &'static str {
        "feasibility"
    }

    fn evaluate(&self, _problem: &TourProblem, profile: &RouteProfile) -> f64 {
        profile.violated_time
    }
}

/// Lateness first, duration second.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LexicographicObjective;

impl Objective for LexicographicObjective {
    type Fitness = Lexicographic;

    fn name(&self) -> &'static str {
        "lexicographic"
    }

    fn evaluate(&self, _problem: &TourProblem, profile: &RouteProfile) -> Lexicographic {
        Lexicographic::new(profile.violated_time, profile.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::Fitness;
    use crate::problem::{CostMatrix, TimeWindow};
    use crate::tour::Tour;

    fn problem_with_window(visit: usize, min: f64, max: f64) -> TourProblem {
        let mut windows = vec![TimeWindow::unlimited(); 5];
        windows[visit] = TimeWindow::new(min, max).expect("valid");
        TourProblem::closed(CostMatrix::uniform(5, 2.0), 0)
            .expect("valid")
            .with_time_windows(windows)
            .expect("valid")
    }

    #[test]
    fn test_feasible_tour_has_no_penalty() {
        let problem = problem_with_window(2, 1.0, 3.0);
        let tour = Tour::from_visits(&[0, 2, 1, 3, 4], Some(0));
        assert_eq!(FeasibilityObjective.calculate(&problem, &tour), 0.0);
        assert_eq!(WeightObjective::default().calculate(&problem, &tour), 10.0);
    }

    #[test]
    fn test_late_visit_is_penalized() {
        let problem = problem_with_window(2, 1.0, 3.0);
        let tour = Tour::from_visits(&[0, 1, 3, 2, 4], Some(0));
        assert_eq!(FeasibilityObjective.calculate(&problem, &tour), 3.0);
        let weight = WeightObjective::new(100.0).calculate(&problem, &tour);
        assert_eq!(weight, 10.0 + 3.0 * 100.0);
    }

    #[test]
    fn test_weight_includes_waiting() {
        let problem = problem_with_window(2, 5.0, 8.0);
        let tour = Tour::from_visits(&[0, 2, 1, 3, 4], Some(0));
        assert_eq!(FeasibilityObjective.calculate(&problem, &tour), 0.0);
        // travel 10 + wait 3
        assert_eq!(WeightObjective::default().calculate(&problem, &tour), 13.0);
    }

    #[test]
    fn test_lexicographic() {
        let problem = problem_with_window(2, 1.0, 3.0);
        let feasible = Tour::from_visits(&[0, 2, 1, 3, 4], Some(0));
        let late = Tour::from_visits(&[0, 1, 3, 2, 4], Some(0));
        let a = LexicographicObjective.calculate(&problem, &feasible);
        let b = LexicographicObjective.calculate(&problem, &late);
        assert_eq!(a, Lexicographic::new(0.0, 10.0));
        assert!(a.is_better_than(&b));
    }

    #[test]
    fn test_non_continuous_follows_windows() {
        let plain = TourProblem::closed(CostMatrix::uniform(5, 2.0), 0).expect("valid");
        assert!(!WeightObjective::default().is_non_continuous(&plain));
        let windowed = problem_with_window(2, 1.0, 3.0);
        assert!(WeightObjective::default().is_non_continuous(&windowed));
        assert!(FeasibilityObjective.is_non_continuous(&windowed));
    }

    #[test]
    fn test_names() {
        assert_eq!(WeightObjective::default().name(), "weight");
        assert_eq!(FeasibilityObjective.name(), "feasibility");
        assert_eq!(LexicographicObjective.name(), "lexicographic");
    }
}
