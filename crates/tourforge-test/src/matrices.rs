//! Hand-built matrices with known tours.

use tourforge_core::DistanceMatrix;

const INF: f64 = f64::INFINITY;

/// Four nodes on a path `0-1-2-3` of unit edges; every other edge weighs 9.
///
/// Optimal cycle weight is 12 (three unit edges plus one closing edge of 9).
/// Enumeration of `[0] ++ perm(1, 2, 3)` yields `[12, 20, 28, 20, 28, 12]`.
pub fn square_cycle_matrix() -> DistanceMatrix {
    DistanceMatrix::new(vec![
        vec![INF, 1.0, 9.0, 9.0],
        vec![1.0, INF, 1.0, 9.0],
        vec![9.0, 1.0, INF, 1.0],
        vec![9.0, 9.0, 1.0, INF],
    ])
    .expect("square cycle matrix is valid")
}

/// Four nodes with pairwise distinct weights:
/// `d01=2, d02=3, d03=5, d12=7, d13=11, d23=13`.
///
/// Enumeration yields `[27, 29, 26, 29, 26, 27]`, optimum 26 at `0-2-1-3`.
pub fn distinct_four_matrix() -> DistanceMatrix {
    DistanceMatrix::new(vec![
        vec![INF, 2.0, 3.0, 5.0],
        vec![2.0, INF, 7.0, 11.0],
        vec![3.0, 7.0, INF, 13.0],
        vec![5.0, 11.0, 13.0, INF],
    ])
    .expect("distinct four matrix is valid")
}

/// Five nodes where Multi-Fragment builds `[0, 1]` and `[2, 3]` first and then
/// has to join two fragments that share an endpoint.
///
/// Edge order: `01=1, 23=2, 12=3, 34=4, 04=5`, all other edges weigh 20+.
/// The constructed tour is `0-1-2-3-4` with weight 15.
pub fn join_five_matrix() -> DistanceMatrix {
    DistanceMatrix::new(vec![
        vec![INF, 1.0, 20.0, 21.0, 5.0],
        vec![1.0, INF, 3.0, 22.0, 23.0],
        vec![20.0, 3.0, INF, 2.0, 24.0],
        vec![21.0, 22.0, 2.0, INF, 4.0],
        vec![5.0, 23.0, 24.0, 4.0, INF],
    ])
    .expect("join five matrix is valid")
}

/// Ring of `n` nodes: consecutive nodes (and `n-1` to `0`) are 1 apart,
/// every other pair is 10 apart. The optimal tour `0-1-..-(n-1)` weighs `n`.
///
/// # Panics
///
/// Panics if `n < 2`.
pub fn ring_matrix(n: usize) -> DistanceMatrix {
    DistanceMatrix::from_fn(n, |i, j| {
        if j == i + 1 || (i == 0 && j == n - 1) {
            1.0
        } else {
            10.0
        }
    })
    .expect("ring matrix needs at least 2 nodes")
}
