//! Edges of the complete graph and the weight-ordered edge catalog.

use std::slice;

use crate::matrix::DistanceMatrix;

/// Undirected edge between two distinct nodes, stored with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    /// Creates an edge, ordering the endpoints so that `a < b`.
    pub const fn new(x: usize, y: usize) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// Returns the weight of this edge in `matrix`.
    #[inline]
    pub fn weight(&self, matrix: &DistanceMatrix) -> f64 {
        matrix.weight(self.a, self.b)
    }

    /// Returns true if `node` is one of the endpoints.
    #[inline]
    pub fn touches(&self, node: usize) -> bool {
        self.a == node || self.b == node
    }
}

/// All `n*(n-1)/2` edges of an instance, sorted ascending by weight.
///
/// Edges are generated with `i` ascending, then `j` ascending (for `i < j`),
/// and sorted with a stable sort, so equal weights keep generation order.
///
/// ```
/// use tourforge_core::{DistanceMatrix, Edge, EdgeCatalog};
///
/// let matrix = DistanceMatrix::from_fn(3, |i, j| if i == 0 { 5.0 } else { 1.0 }).unwrap();
/// let catalog = EdgeCatalog::new(&matrix);
///
/// let order: Vec<Edge> = catalog.iter().copied().collect();
/// assert_eq!(order, vec![Edge::new(1, 2), Edge::new(0, 1), Edge::new(0, 2)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeCatalog {
    edges: Vec<Edge>,
}

impl EdgeCatalog {
    pub fn new(matrix: &DistanceMatrix) -> Self {
        let n = matrix.size();
        let mut edges = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in i + 1..n {
                edges.push(Edge { a: i, b: j });
            }
        }
        // `sort_by` is stable; weights are finite, so total_cmp matches `<`.
        edges.sort_by(|x, y| x.weight(matrix).total_cmp(&y.weight(matrix)));
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }
}

impl<'a> IntoIterator for &'a EdgeCatalog {
    type Item = &'a Edge;
    type IntoIter = slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
