//! Error types for TourForge

use thiserror::Error;

/// Main error type for TourForge operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourForgeError {
    /// The distance matrix cannot describe a complete symmetric graph
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// A constructor finished without covering every node
    ///
    /// Never happens on a complete graph; indicates a programming error.
    #[error("Incomplete tour: expected {expected} nodes, found {found}")]
    IncompleteTour { expected: usize, found: usize },

    /// A node sequence is not a permutation of the instance nodes
    #[error("Invalid tour: {0}")]
    InvalidTour(String),

    /// Exhaustive enumeration was requested above the configured size limit
    #[error("Instance of {size} nodes exceeds the exhaustive search limit of {limit}")]
    InstanceTooLarge { size: usize, limit: usize },

    /// An algorithm label could not be parsed
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A listener stopped the run between stages
    #[error("Run was cancelled")]
    Cancelled,
}

/// Result type alias for TourForge operations
pub type Result<T> = std::result::Result<T, TourForgeError>;
