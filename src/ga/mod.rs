//! Genetic Algorithm over tours.
//!
//! The engine evolves a population of scored tours. Pluggable roles are
//! expressed as traits generic over the active [`Objective`](crate::objective::Objective).
//!
//! # Core Traits
//!
//! - [`Generator`]: builds members of the initial population
//! - [`Crossover`]: recombines two parents (see [`EaxOperator`](crate::eax::EaxOperator))
//! - [`Mutation`]: perturbs a member in place
//!
//! # Key Types
//!
//! - [`GaConfig`]: algorithm parameters (population size, ratios, presets)
//! - [`GaSolver`]: executes the evolutionary loop
//! - [`GaResult`]: final result with statistics and the terminal [`SolverState`]
//! - [`TournamentSelector`]: probabilistic tournament for the crossover pool
//! - [`BruteForceSolver`]: exhaustive search used for tiny problems
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Nagata & Kobayashi (2013), "A powerful genetic algorithm using edge
//!   assembly crossover for the traveling salesman problem"

mod brute_force;
mod config;
mod operators;
mod runner;
mod selection;
mod types;

pub use brute_force::BruteForceSolver;
pub use config::GaConfig;
pub use operators::{GreedyGenerator, RandomGenerator, ShiftMutation, DEFAULT_RCL_SIZE};
pub use runner::{GaResult, GaSolver, SolverState, BRUTE_FORCE_LIMIT};
pub use selection::TournamentSelector;
pub use types::{Candidate, Crossover, Generator, Mutation};
