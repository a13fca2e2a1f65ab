//! TourForge - Heuristic Tour Engine in Rust
//!
//! Build a tour for a symmetric distance matrix with one construction
//! heuristic, then shorten it with any chain of local search improvers.
//!
//! # Example
//!
//! ```rust
//! use tourforge::prelude::*;
//!
//! let inf = f64::INFINITY;
//! let matrix = DistanceMatrix::new(vec![
//!     vec![inf, 1.0, 9.0, 9.0],
//!     vec![1.0, inf, 1.0, 9.0],
//!     vec![9.0, 1.0, inf, 1.0],
//!     vec![9.0, 9.0, 1.0, inf],
//! ]).unwrap();
//!
//! let result = tourforge::solve(&matrix, &EngineConfig::default()).unwrap();
//! assert_eq!(result.tour.to_string(), "0-1-2-3");
//! assert_eq!(result.weight, 12.0);
//! ```

// Core model
pub use tourforge_core::{DistanceMatrix, Edge, EdgeCatalog, Tour, TourForgeError};

// Configuration
pub use tourforge_config::{
    BatchConfig, ConfigError, ConstructionType, EngineConfig, ExhaustiveConfig,
    ExperimentConfig, GeneratorConfig, ImprovementType,
};

// Engine
pub use tourforge_solver::{
    summarize_store, write_csv, AlgorithmLabel, Attempt, BatchReport, BatchRunner,
    CancelOnFlag, ConstructionAlgorithm, ExhaustiveResult, ExhaustiveSearch, ExperimentRow,
    GraphInstance, ImprovementAlgorithm, InstanceGenerator, InstanceStore, ProgressiveExperiment,
    SizeGroup, SolveListener, SolveResult, SolverStatistics, StoreError, TourSolver, YieldPoint,
};

/// Heuristic building blocks, for callers assembling their own pipeline.
pub mod heuristic {
    pub use tourforge_solver::construction::{
        Constructor, DoubleEndedNearestNeighbor, MultiFragment, NearestNeighbor,
    };
    pub use tourforge_solver::localsearch::{
        Improver, LocalSearchOutcome, NodeSwap, ThreeOpt, TwoOpt,
    };
    pub use tourforge_solver::reconnection::{
        enumerate_reconnections, Reconnection, Segment, THREE_OPT_RECONNECTIONS,
        TWO_OPT_RECONNECTION,
    };
}

#[cfg(feature = "console")]
pub use tourforge_console as console;

mod solver;
pub use solver::{brute_force, run_batch, solve};

pub type Result<T> = tourforge_core::Result<T>;

pub mod prelude {
    pub use super::{AlgorithmLabel, ConstructionAlgorithm, ImprovementAlgorithm};
    pub use super::{DistanceMatrix, Tour, TourForgeError};
    pub use super::{EngineConfig, SolveResult, TourSolver};
}
