//! Construction heuristics
//!
//! Constructors build a complete tour from scratch:
//! - [`MultiFragment`]: greedy edge merging into path fragments
//! - [`NearestNeighbor`]: grows a path from node 0 at its front
//! - [`DoubleEndedNearestNeighbor`]: grows a path at both ends alternately

mod multi_fragment;
mod nearest_neighbor;

#[cfg(test)]
mod tests;

use std::fmt::Debug;

use tourforge_core::{DistanceMatrix, Result, Tour};

pub use multi_fragment::MultiFragment;
pub use nearest_neighbor::{DoubleEndedNearestNeighbor, NearestNeighbor};

/// A construction heuristic.
///
/// Implementations are deterministic: the same matrix always yields the same
/// tour.
pub trait Constructor: Send + Sync + Debug {
    /// Builds a tour covering every node of `matrix`.
    ///
    /// # Errors
    ///
    /// [`TourForgeError::IncompleteTour`](tourforge_core::TourForgeError::IncompleteTour)
    /// if the heuristic ends without covering every node.
    fn construct(&self, matrix: &DistanceMatrix) -> Result<Tour>;

    /// Returns the display name of this heuristic.
    fn name(&self) -> &'static str;
}
