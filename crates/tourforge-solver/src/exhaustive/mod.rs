//! Exhaustive tour enumeration.
//!
//! Visits every tour starting at node 0: the remaining nodes `1..n` are
//! permuted in lexicographic order and each cyclic weight is recorded.
//! There are `(n-1)!` such tours, so a size limit guards the search.
//!
//! # Example
//!
//! ```
//! use tourforge_core::DistanceMatrix;
//! use tourforge_solver::exhaustive::ExhaustiveSearch;
//!
//! let matrix = DistanceMatrix::from_fn(4, |i, j| (i + j) as f64).unwrap();
//! let result = ExhaustiveSearch::default().enumerate(&matrix).unwrap();
//!
//! assert_eq!(result.weights.len(), 6);
//! assert_eq!(result.best_weight, result.weights.iter().copied().fold(f64::INFINITY, f64::min));
//! ```


use std::time::Instant;

use tracing::{debug, info};

use tourforge_config::ExhaustiveConfig;
use tourforge_core::{DistanceMatrix, Result, Tour, TourForgeError};

/// Default largest instance enumerated.
pub const DEFAULT_SIZE_LIMIT: usize = 10;

/// Brute-force enumerator over all tours of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustiveSearch {
    size_limit: usize,
}

impl Default for ExhaustiveSearch {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE_LIMIT)
    }
}

impl ExhaustiveSearch {
    /// Creates an enumerator refusing instances above `size_limit` nodes.
    pub fn new(size_limit: usize) -> Self {
        Self { size_limit }
    }

    pub fn from_config(config: &ExhaustiveConfig) -> Self {
        Self::new(config.size_limit)
    }

    pub fn size_limit(&self) -> usize {
        self.size_limit
    }

    /// Enumerates every tour of `matrix` that starts at node 0.
    ///
    /// # Errors
    ///
    /// [`TourForgeError::InstanceTooLarge`] if the matrix has more nodes than
    /// the size limit.
    pub fn enumerate(&self, matrix: &DistanceMatrix) -> Result<ExhaustiveResult> {
        let n = matrix.size();
        if n > self.size_limit {
            return Err(TourForgeError::InstanceTooLarge {
                size: n,
                limit: self.size_limit,
            });
        }

        info!(
            event = "phase_start",
            phase = "Exhaustive Search",
            phase_index = 0,
        );
        let start = Instant::now();

        let mut nodes: Vec<usize> = (0..n).collect();
        let mut weights = Vec::new();
        let mut best_weight = f64::INFINITY;
        let mut best_nodes = nodes.clone();

        loop {
            let weight = matrix.tour_weight(&nodes);
            weights.push(weight);
            if weight < best_weight {
                best_weight = weight;
                best_nodes.copy_from_slice(&nodes);
                debug!(event = "best_tour", weight = weight, tours = weights.len());
            }
            if !next_permutation(&mut nodes[1..]) {
                break;
            }
        }

        let duration = start.elapsed();
        info!(
            event = "phase_end",
            phase = "Exhaustive Search",
            phase_index = 0,
            duration_ms = duration.as_millis() as u64,
            steps = weights.len() as u64,
            weight = best_weight,
        );

        Ok(ExhaustiveResult {
            weights,
            best_tour: Tour::for_matrix(best_nodes, matrix)?,
            best_weight,
        })
    }
}

/// Every enumerated weight plus the first lightest tour.
#[derive(Debug, Clone, PartialEq)]
pub struct ExhaustiveResult {
    /// Cyclic weights in lexicographic permutation order.
    pub weights: Vec<f64>,
    pub best_tour: Tour,
    pub best_weight: f64,
}

impl ExhaustiveResult {
    pub fn tour_count(&self) -> usize {
        self.weights.len()
    }
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns false (leaving `items` untouched) when `items` is already the last
/// permutation.
fn next_permutation(items: &mut [usize]) -> bool {
    let Some(pivot) = items.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };
    let Some(successor) = items.iter().rposition(|&item| item > items[pivot]) else {
        return false;
    };
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
