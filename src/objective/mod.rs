//! Objectives and the fitness algebra.
//!
//! # Core Traits
//!
//! - [`Fitness`]: comparable, combinable fitness values (lower is better)
//! - [`Objective`]: maps a tour of a problem to a fitness
//!
//! # Objectives
//!
//! - [`WeightObjective`]: duration plus a large lateness penalty
//! - [`FeasibilityObjective`]: lateness only
//! - [`LexicographicObjective`]: lateness first, then duration

mod fitness;
mod objectives;
mod profile;
mod types;

pub use fitness::{Fitness, Lexicographic};
pub use objectives::{
    FeasibilityObjective, LexicographicObjective, WeightObjective, DEFAULT_VIOLATION_PENALTY,
};
pub use profile::RouteProfile;
pub use types::Objective;
