//! Single-move improvement operators over a [`Tour`](crate::tour::Tour).
//!
//! # Operators
//!
//! - [`Local2Opt`]: edge exchange with segment reversal
//! - [`Local1Shift`]: single-visit relocation, plus random shaking
//! - [`Vnd`]: descent alternating the two
//! - [`VnsMutation`]: GA mutation shaking with 1-shift and descending with [`Vnd`]
//!
//! All operators are first-improvement and re-propagate arrival times, so
//! they stay exact under time windows. A reported delta always equals the
//! difference of full recalculations before and after the move.

mod one_shift;
mod two_opt;
mod vnd;

pub use one_shift::Local1Shift;
pub use two_opt::Local2Opt;
pub use vnd::{Vnd, VnsMutation, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_LEVEL};
