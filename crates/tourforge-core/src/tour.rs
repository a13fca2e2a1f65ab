//! Closed tours over every node of an instance.

use std::fmt;

use crate::error::{Result, TourForgeError};
use crate::matrix::DistanceMatrix;

/// A Hamiltonian cycle, stored as a permutation of `0..len`.
///
/// The sequence is read cyclically: the last node connects back to the
/// first. Rotations and reversals describe the same cycle but are distinct
/// values, since improvers operate on positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    /// Creates a tour from a node sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TourForgeError::InvalidTour`] unless `nodes` is a permutation
    /// of `0..nodes.len()`.
    pub fn new(nodes: Vec<usize>) -> Result<Self> {
        let n = nodes.len();
        if n == 0 {
            return Err(TourForgeError::InvalidTour("tour is empty".to_string()));
        }
        let mut seen = vec![false; n];
        for &node in &nodes {
            if node >= n {
                return Err(TourForgeError::InvalidTour(format!(
                    "node {node} is out of range for a tour of {n} nodes"
                )));
            }
            if seen[node] {
                return Err(TourForgeError::InvalidTour(format!(
                    "node {node} is visited more than once"
                )));
            }
            seen[node] = true;
        }
        Ok(Self { nodes })
    }

    /// Creates a tour that must cover every node of `matrix`.
    ///
    /// # Errors
    ///
    /// [`TourForgeError::IncompleteTour`] if the length differs from the
    /// matrix size, otherwise the errors of [`Tour::new`].
    pub fn for_matrix(nodes: Vec<usize>, matrix: &DistanceMatrix) -> Result<Self> {
        if nodes.len() != matrix.size() {
            return Err(TourForgeError::IncompleteTour {
                expected: matrix.size(),
                found: nodes.len(),
            });
        }
        Self::new(nodes)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; an empty tour cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Mutable access to the node order for in-place moves.
    ///
    /// The slice has a fixed length; callers must only permute it.
    #[inline]
    pub fn nodes_mut(&mut self) -> &mut [usize] {
        &mut self.nodes
    }

    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }

    /// Returns the cyclic weight of this tour.
    pub fn weight(&self, matrix: &DistanceMatrix) -> f64 {
        matrix.tour_weight(&self.nodes)
    }

    /// Returns true if this tour visits exactly the nodes of `matrix`.
    pub fn fits(&self, matrix: &DistanceMatrix) -> bool {
        self.nodes.len() == matrix.size()
    }

    /// Iterates over the edges of the cycle as `(from, to)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.nodes.len();
        (0..n).map(move |k| (self.nodes[k], self.nodes[(k + 1) % n]))
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = TourForgeError;

    fn try_from(nodes: Vec<usize>) -> Result<Self> {
        Self::new(nodes)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.nodes
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, node) in self.nodes.iter().enumerate() {
            if k > 0 {
                write!(f, "-")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
