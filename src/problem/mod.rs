//! Problem data: cost matrix, time windows, turn penalties and the tour
//! problem instance.
//!
//! Everything here is immutable once built and can be shared freely across
//! threads. Costs and windows are supplied by the caller; computing them
//! from a road network is outside this crate.

mod error;
mod instance;
mod matrix;
mod turn;
mod window;

pub use error::ProblemError;
pub use instance::TourProblem;
pub use matrix::CostMatrix;
pub use turn::TurnPenalties;
pub use window::TimeWindow;
