//! Edge Assembly Crossover (EAX) for directed tours.
//!
//! # Key Types
//!
//! - [`EaxOperator`]: the crossover, usable directly or as a GA [`Crossover`](crate::ga::Crossover)
//! - [`EaxConfig`]: offspring count and AB-cycle selection strategy
//! - [`EaxStrategy`]: `SingleRandom` or `MultipleRandom`
//!
//! Every child is checked to be a single Hamiltonian cycle over the same
//! visits as its parents before it is returned.

mod ab_cycle;
mod config;
mod operator;

pub use config::{EaxConfig, EaxStrategy, MULTIPLE_RANDOM_PROBABILITY};
pub use operator::EaxOperator;
