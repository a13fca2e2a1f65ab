//! Local search improvers
//!
//! Improvers take a complete tour and rearrange it in place, accepting only
//! strictly improving moves, until their neighborhood is exhausted:
//! - [`TwoOpt`]: reverses one of two segments
//! - [`ThreeOpt`]: best reversal pattern over three segments
//! - [`NodeSwap`]: swaps adjacent nodes until no swap helps

mod node_swap;
mod three_opt;
mod two_opt;

#[cfg(test)]
mod tests;

use std::fmt::Debug;

use tourforge_core::{DistanceMatrix, Tour};

pub use node_swap::NodeSwap;
pub use three_opt::ThreeOpt;
pub use two_opt::TwoOpt;

/// A local search neighborhood applied to a complete tour.
///
/// Improvers never fail and never increase the tour weight.
pub trait Improver: Send + Sync + Debug {
    /// Improves `tour` in place.
    ///
    /// # Panics
    ///
    /// May panic if `tour` does not cover every node of `matrix`;
    /// [`crate::TourSolver::improve`] checks this and returns an error.
    fn improve(&self, matrix: &DistanceMatrix, tour: &mut Tour) -> LocalSearchOutcome;

    /// Returns the display name of this improver.
    fn name(&self) -> &'static str;
}

/// Counters and weights of one improver run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSearchOutcome {
    /// Weight of the tour handed to the improver.
    pub starting_weight: f64,
    /// Weight of the tour after the improver returned.
    pub weight: f64,
    /// Number of candidate tours evaluated.
    pub moves_evaluated: u64,
    /// Number of candidates adopted.
    pub moves_accepted: u64,
}

impl LocalSearchOutcome {
    fn new(starting_weight: f64) -> Self {
        Self {
            starting_weight,
            weight: starting_weight,
            moves_evaluated: 0,
            moves_accepted: 0,
        }
    }

    /// Returns true if at least one move was adopted.
    pub fn improved(&self) -> bool {
        self.moves_accepted > 0
    }
}
