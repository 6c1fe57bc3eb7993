//! Single-vehicle tour optimization.
//!
//! Finds a visiting order over a set of visits that minimizes a pluggable
//! objective. Supports closed tours (TSP), open tours, tours ending at a
//! fixed visit, asymmetric costs and per-visit time windows (TSP-TW).
//!
//! - **Problem model**: [`problem::TourProblem`] over a dense
//!   [`problem::CostMatrix`] with optional [`problem::TimeWindow`]s.
//! - **Tour**: [`tour::Tour`], a successor-linked ordering with O(1)
//!   insertion, removal and edge rewiring.
//! - **Objectives**: [`objective::Objective`] implementations scoring a
//!   tour through an accumulated [`objective::RouteProfile`].
//! - **Local search**: 2-opt and 1-shift descents combined by
//!   [`local_search::Vnd`].
//! - **Edge Assembly Crossover (EAX)**: [`eax::EaxOperator`] recombines two
//!   parent tours through alternating cycles of their edge difference.
//! - **Genetic Algorithm**: [`ga::GaSolver`] with tournament selection,
//!   elitism and stagnation-based termination.
//!
//! [`solve`] wires the pieces together.
//!
//! # Quick Start
//!
//! ```
//! use u_tour::ga::GaConfig;
//! use u_tour::objective::WeightObjective;
//! use u_tour::problem::{CostMatrix, TourProblem};
//!
//! let costs = CostMatrix::from_rows(&[
//!     vec![0.0, 2.0, 9.0, 10.0],
//!     vec![1.0, 0.0, 6.0, 4.0],
//!     vec![15.0, 7.0, 0.0, 8.0],
//!     vec![6.0, 3.0, 12.0, 0.0],
//! ]).unwrap();
//! let problem = TourProblem::closed(costs, 0).unwrap();
//!
//! let (tour, cost) = u_tour::solve(&problem, &WeightObjective::default(), &GaConfig::fast());
//! assert!(tour.is_permutation_of(4));
//! assert_eq!(cost, 21.0);
//! ```

pub mod eax;
pub mod ga;
pub mod local_search;
pub mod neighbours;
pub mod objective;
pub mod problem;
pub mod random;
mod solve;
pub mod tour;

pub use solve::{solve, solve_with_cancel, DEFAULT_NEIGHBOURS};
