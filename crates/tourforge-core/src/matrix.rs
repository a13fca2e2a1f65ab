//! Distance model: a validated symmetric weight matrix.
//!
//! The matrix describes a complete undirected graph. Self-loops are
//! unreachable, so every diagonal entry holds `f64::INFINITY` and no
//! algorithm ever selects it as an edge.
//!
//! # Example
//!
//! ```
//! use tourforge_core::DistanceMatrix;
//!
//! let inf = f64::INFINITY;
//! let matrix = DistanceMatrix::new(vec![
//!     vec![inf, 2.0, 3.0],
//!     vec![2.0, inf, 4.0],
//!     vec![3.0, 4.0, inf],
//! ]).unwrap();
//!
//! assert_eq!(matrix.size(), 3);
//! assert_eq!(matrix.weight(1, 2), 4.0);
//! assert_eq!(matrix.tour_weight(&[0, 1, 2]), 9.0);
//! ```

use crate::error::{Result, TourForgeError};

/// Symmetric distance matrix over nodes `0..size`.
///
/// Immutable once constructed. Weights are stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<Option<f64>>>", into = "Vec<Vec<Option<f64>>>")
)]
pub struct DistanceMatrix {
    size: usize,
    weights: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from full rows.
    ///
    /// # Errors
    ///
    /// Returns [`TourForgeError::InvalidInstance`] if there are fewer than two
    /// nodes, a row has the wrong length, a diagonal entry is not infinite,
    /// an off-diagonal weight is negative or not finite, or the matrix is not
    /// symmetric.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size < 2 {
            return Err(TourForgeError::InvalidInstance(format!(
                "at least 2 nodes are required, got {size}"
            )));
        }

        let mut weights = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(TourForgeError::InvalidInstance(format!(
                    "matrix is not square: row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            weights.extend_from_slice(row);
        }

        let matrix = Self { size, weights };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Builds a symmetric matrix by evaluating `weight` once per unordered pair.
    ///
    /// `weight(i, j)` is called for `i < j` in row order; the value is mirrored
    /// to `(j, i)` and the diagonal is set to infinity.
    ///
    /// ```
    /// use tourforge_core::DistanceMatrix;
    ///
    /// let matrix = DistanceMatrix::from_fn(4, |i, j| (i + j) as f64).unwrap();
    /// assert_eq!(matrix.weight(3, 1), 4.0);
    /// assert!(matrix.weight(2, 2).is_infinite());
    /// ```
    pub fn from_fn(size: usize, mut weight: impl FnMut(usize, usize) -> f64) -> Result<Self> {
        if size < 2 {
            return Err(TourForgeError::InvalidInstance(format!(
                "at least 2 nodes are required, got {size}"
            )));
        }
        let mut weights = vec![f64::INFINITY; size * size];
        for i in 0..size {
            for j in i + 1..size {
                let w = weight(i, j);
                weights[i * size + j] = w;
                weights[j * size + i] = w;
            }
        }
        let matrix = Self { size, weights };
        matrix.validate()?;
        Ok(matrix)
    }

    fn validate(&self) -> Result<()> {
        let n = self.size;
        for i in 0..n {
            let diagonal = self.weight(i, i);
            if diagonal != f64::INFINITY {
                return Err(TourForgeError::InvalidInstance(format!(
                    "diagonal entry ({i}, {i}) is {diagonal}; self-loops must be unreachable"
                )));
            }
            for j in i + 1..n {
                let w = self.weight(i, j);
                if !(w.is_finite() && w >= 0.0) {
                    return Err(TourForgeError::InvalidInstance(format!(
                        "weight ({i}, {j}) must be finite and non-negative, got {w}"
                    )));
                }
                if w != self.weight(j, i) {
                    return Err(TourForgeError::InvalidInstance(format!(
                        "matrix is not symmetric at ({i}, {j}): {w} != {}",
                        self.weight(j, i)
                    )));
                }
            }
        }
        Ok(())
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the weight of the edge between `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        self.weights[a * self.size + b]
    }

    /// Returns row `i` (weights from node `i` to every node).
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.weights[i * self.size..(i + 1) * self.size]
    }

    /// Iterates over all rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.weights.chunks_exact(self.size)
    }

    /// Returns the cyclic weight of a full tour.
    ///
    /// Sums `d[seq[k]][seq[(k + 1) % m]]` for `k` in `0..m`, in sequence
    /// order. Only meaningful for sequences covering every node; open
    /// fragments must not be evaluated with it.
    pub fn tour_weight(&self, nodes: &[usize]) -> f64 {
        let m = nodes.len();
        (0..m).fold(0.0, |total, k| {
            total + self.weight(nodes[k], nodes[(k + 1) % m])
        })
    }

    /// Copies the matrix into owned rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<Option<f64>>>> for DistanceMatrix {
    type Error = TourForgeError;

    /// Missing entries (`None`, serialized as `null`) are read as infinity.
    fn try_from(rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|w| w.unwrap_or(f64::INFINITY))
                    .collect()
            })
            .collect();
        Self::new(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<Option<f64>>> {
    /// Infinite entries become `None`.
    fn from(matrix: DistanceMatrix) -> Self {
        matrix
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&w| if w.is_finite() { Some(w) } else { None })
                    .collect()
            })
            .collect()
    }
}
