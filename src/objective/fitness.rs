//! Fitness algebra.

use std::cmp::Ordering;

/// A comparable fitness value. Lower is better (minimization).
///
/// Operators never assume fitness is a plain number: they only combine and
/// compare values through this trait, so objectives can rank feasibility
/// before cost.
///
/// Built-in implementations exist for `f64` and [`Lexicographic`].
pub trait Fitness: Copy + Send + Sync + std::fmt::Debug + 'static {
    /// The neutral value.
    fn zero() -> Self;

    /// A value worse than any reachable fitness.
    ///
    /// Used for unscored candidates.
    fn infinite() -> Self;

    /// Returns `true` for the neutral value.
    fn is_zero(&self) -> bool;

    /// Combines two values.
    fn add(self, other: Self) -> Self;

    /// Difference `self - other`.
    fn subtract(self, other: Self) -> Self;

    /// Total order; `Less` means `self` is better.
    fn compare(&self, other: &Self) -> Ordering;

    /// Scalar view for logging and statistics.
    fn to_f64(self) -> f64;

    /// Returns `true` if `self` is strictly better than `other`.
    fn is_better_than(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// Returns `true` if `self` is better than `other` by more than
    /// floating-point noise. Local search only accepts such moves.
    fn improves_on(&self, other: &Self) -> bool {
        self.is_better_than(other)
    }
}

const IMPROVEMENT_EPS: f64 = 1e-10;

impl Fitness for f64 {
    fn zero() -> Self {
        0.0
    }

    fn infinite() -> Self {
        f64::INFINITY
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn add(self, other: Self) -> Self {
        self + other
    }

    fn subtract(self, other: Self) -> Self {
        self - other
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn improves_on(&self, other: &Self) -> bool {
        *self < *other - IMPROVEMENT_EPS
    }
}

/// Feasibility-first fitness: `violated` is compared before `weight`.
///
/// # Examples
///
/// ```
/// use u_tour::objective::{Fitness, Lexicographic};
///
/// let feasible = Lexicographic::new(0.0, 100.0);
/// let late = Lexicographic::new(1.0, 10.0);
/// assert!(feasible.is_better_than(&late));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lexicographic {
    /// Total lateness over all visits.
    pub violated: f64,
    /// Tour weight (travel plus waiting).
    pub weight: f64,
}

impl Lexicographic {
    /// Creates a new value.
    pub fn new(violated: f64, weight: f64) -> Self {
        Self { violated, weight }
    }

    /// Returns `true` if no time window is violated.
    pub fn is_feasible(&self) -> bool {
        self.violated == 0.0
    }
}

impl Fitness for Lexicographic {
    fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    fn infinite() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY)
    }

    fn is_zero(&self) -> bool {
        self.violated == 0.0 && self.weight == 0.0
    }

    fn add(self, other: Self) -> Self {
        Self::new(self.violated + other.violated, self.weight + other.weight)
    }

    fn subtract(self, other: Self) -> Self {
        Self::new(self.violated - other.violated, self.weight - other.weight)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.violated
            .total_cmp(&other.violated)
            .then_with(|| self.weight.total_cmp(&other.weight))
    }

    fn to_f64(self) -> f64 {
        self.weight
    }

    fn improves_on(&self, other: &Self) -> bool {
        if self.violated < other.violated - IMPROVEMENT_EPS {
            return true;
        }
        (self.violated - other.violated).abs() <= IMPROVEMENT_EPS
            && self.weight < other.weight - IMPROVEMENT_EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_algebra() {
        assert!(<f64 as Fitness>::zero().is_zero());
        assert_eq!(Fitness::add(2.0_f64, 3.0), 5.0);
        assert_eq!(2.0_f64.subtract(3.0), -1.0);
        assert_eq!(1.0_f64.compare(&2.0), Ordering::Less);
        assert!(1.0_f64.is_better_than(&<f64 as Fitness>::infinite()));
        assert!(1.0_f64.improves_on(&2.0));
        assert!(!(1.0_f64 - 1e-13).improves_on(&1.0));
    }

    #[test]
    fn test_lexicographic_order() {
        let a = Lexicographic::new(0.0, 50.0);
        let b = Lexicographic::new(0.0, 40.0);
        let c = Lexicographic::new(2.0, 1.0);
        assert!(b.is_better_than(&a));
        assert!(a.is_better_than(&c));
        assert_eq!(a.compare(&a), Ordering::Equal);
        assert!(a.is_feasible());
        assert!(!c.is_feasible());
    }

    #[test]
    fn test_lexicographic_algebra() {
        let a = Lexicographic::new(1.0, 10.0);
        let b = Lexicographic::new(0.5, 4.0);
        assert_eq!(a.add(b), Lexicographic::new(1.5, 14.0));
        assert_eq!(a.subtract(b), Lexicographic::new(0.5, 6.0));
        assert!(Lexicographic::zero().is_zero());
        assert!(b.is_better_than(&Lexicographic::infinite()));
        assert_eq!(a.to_f64(), 10.0);
        assert!(b.improves_on(&a));
        assert!(!Lexicographic::new(1.0, 10.0 - 1e-13).improves_on(&a));
    }
}
