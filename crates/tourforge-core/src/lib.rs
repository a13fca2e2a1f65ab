//! TourForge Core - Core types for heuristic tour construction
//!
//! This crate provides the fundamental data model shared by every TourForge
//! algorithm:
//! - `DistanceMatrix`: a validated symmetric weight matrix with an
//!   unreachable diagonal
//! - `EdgeCatalog`: all undirected edges sorted by weight
//! - `Tour`: a permutation of the nodes read as a cycle, and its evaluator

pub mod edge;
pub mod error;
pub mod matrix;
pub mod tour;


pub use edge::{Edge, EdgeCatalog};
pub use error::{Result, TourForgeError};
pub use matrix::DistanceMatrix;
pub use tour::Tour;
