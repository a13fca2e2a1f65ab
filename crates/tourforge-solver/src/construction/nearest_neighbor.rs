//! Nearest-neighbor constructions.

use std::collections::VecDeque;

use tourforge_core::{DistanceMatrix, Result, Tour, TourForgeError};

use super::Constructor;

/// Grows a path from node 0 by prepending the nearest unvisited node to the
/// current front.
///
/// Ties go to the lowest node index.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbor;

impl Constructor for NearestNeighbor {
    fn construct(&self, matrix: &DistanceMatrix) -> Result<Tour> {
        let mut path = Path::new(matrix);
        while !path.is_full() {
            path.grow_front()?;
        }
        path.into_tour()
    }

    fn name(&self) -> &'static str {
        "Nearest Neighbor"
    }
}

/// Nearest neighbor growing both ends of the path, front first.
///
/// A front step prepends the node nearest to the first node; a back step
/// appends the node nearest to the last node.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleEndedNearestNeighbor;

impl Constructor for DoubleEndedNearestNeighbor {
    fn construct(&self, matrix: &DistanceMatrix) -> Result<Tour> {
        let mut path = Path::new(matrix);
        let mut front = true;
        while !path.is_full() {
            if front {
                path.grow_front()?;
            } else {
                path.grow_back()?;
            }
            front = !front;
        }
        path.into_tour()
    }

    fn name(&self) -> &'static str {
        "Double-Ended Nearest Neighbor"
    }
}

/// Open path under construction, starting at node 0.
struct Path<'a> {
    matrix: &'a DistanceMatrix,
    nodes: VecDeque<usize>,
    visited: Vec<bool>,
}

impl<'a> Path<'a> {
    fn new(matrix: &'a DistanceMatrix) -> Self {
        let n = matrix.size();
        let mut visited = vec![false; n];
        visited[0] = true;
        let mut nodes = VecDeque::with_capacity(n);
        nodes.push_back(0);
        Self {
            matrix,
            nodes,
            visited,
        }
    }

    fn is_full(&self) -> bool {
        self.nodes.len() == self.matrix.size()
    }

    fn grow_front(&mut self) -> Result<()> {
        let from = self.nodes.front().copied().unwrap_or(0);
        let next = self.nearest_unvisited(from)?;
        self.nodes.push_front(next);
        Ok(())
    }

    fn grow_back(&mut self) -> Result<()> {
        let from = self.nodes.back().copied().unwrap_or(0);
        let next = self.nearest_unvisited(from)?;
        self.nodes.push_back(next);
        Ok(())
    }

    /// Marks and returns the closest unvisited node; strict `<` keeps the
    /// lowest index on ties.
    fn nearest_unvisited(&mut self, from: usize) -> Result<usize> {
        let mut closest = None;
        let mut best = f64::INFINITY;
        for (node, &weight) in self.matrix.row(from).iter().enumerate() {
            if self.visited[node] {
                continue;
            }
            if weight < best {
                best = weight;
                closest = Some(node);
            }
        }
        let node = closest.ok_or(TourForgeError::IncompleteTour {
            expected: self.matrix.size(),
            found: self.nodes.len(),
        })?;
        self.visited[node] = true;
        Ok(node)
    }

    fn into_tour(self) -> Result<Tour> {
        Tour::for_matrix(self.nodes.into(), self.matrix)
    }
}
