//! Tournament selection for the crossover pool.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use std::collections::HashSet;

use rand::Rng;

use super::types::Candidate;
use crate::objective::Fitness;

/// Probabilistic tournament over a population.
///
/// # Algorithm
///
/// 1. Sample `ceil(size × population)` distinct indices that are not
///    excluded (capped at the number of eligible indices)
/// 2. Order the sample best-first
/// 3. Walk it, accepting each member with probability `probability`
///
/// The walk may reject every member, in which case no index is returned
/// and the caller retries.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use u_tour::ga::{Candidate, TournamentSelector};
/// use u_tour::random::create_rng;
/// use u_tour::tour::Tour;
///
/// let tour = Tour::from_visits(&[0, 1, 2], Some(0));
/// let population: Vec<Candidate<f64>> =
///     (0..4).map(|i| Candidate::new(tour.clone(), i as f64)).collect();
///
/// // full tournament, always accepting: the best eligible index wins
/// let selector = TournamentSelector::new(1.0, 1.0);
/// let excluded = HashSet::from([0]);
/// assert_eq!(selector.select(&population, &excluded, &mut create_rng(1)), Some(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TournamentSelector {
    size: f64,
    probability: f64,
}

impl TournamentSelector {
    /// Creates a selector sampling `size` (fraction of the population) and
    /// accepting with `probability`. Both are clamped into `[0, 1]`.
    pub fn new(size: f64, probability: f64) -> Self {
        Self {
            size: size.clamp(0.0, 1.0),
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// Sample size as a fraction of the population.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Acceptance probability of each walked member.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Number of indices sampled from a population of `population` with
    /// `eligible` non-excluded members.
    pub fn sample_size(&self, population: usize, eligible: usize) -> usize {
        ((self.size * population as f64).ceil() as usize)
            .max(1)
            .min(eligible)
    }

    /// Selects an index not in `excluded`, or `None` if the walk rejected
    /// every sampled member (or nothing is eligible).
    pub fn select<F: Fitness, R: Rng>(
        &self,
        population: &[Candidate<F>],
        excluded: &HashSet<usize>,
        rng: &mut R,
    ) -> Option<usize> {
        let n = population.len();
        let eligible = n - excluded.iter().filter(|&&i| i < n).count();
        let wanted = self.sample_size(n, eligible);
        if wanted == 0 {
            return None;
        }

        let mut sample = Vec::with_capacity(wanted);
        while sample.len() < wanted {
            let index = rng.random_range(0..n);
            if !excluded.contains(&index) && !sample.contains(&index) {
                sample.push(index);
            }
        }
        sample.sort_by(|&a, &b| population[a].fitness.compare(&population[b].fitness));

        sample
            .into_iter()
            .find(|_| rng.random_bool(self.probability))
    }
}

impl Default for TournamentSelector {
    fn default() -> Self {
        Self::new(0.1, 0.9)
    }
}
