//! Reproducible random instances.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tourforge_core::DistanceMatrix;

/// Symmetric matrix of `n` nodes with weights uniform in `[1, 1000)`.
///
/// The same `(n, seed)` always yields the same matrix.
///
/// # Panics
///
/// Panics if `n < 2`.
pub fn random_matrix(n: usize, seed: u64) -> DistanceMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    DistanceMatrix::from_fn(n, |_, _| rng.random_range(1.0..1000.0))
        .expect("random matrix needs at least 2 nodes")
}

/// Returns true if `nodes` holds every value of `0..n` exactly once.
pub fn is_permutation(nodes: &[usize], n: usize) -> bool {
    if nodes.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    nodes.iter().all(|&node| {
        node < n && !std::mem::replace(&mut seen[node], true)
    })
}
