//! Yield points and listeners for run monitoring and cancellation.
//!
//! A run is split into stages: one construction followed by each
//! improvement. Between stages the solver hands a [`YieldPoint`] and the
//! current tour to a [`SolveListener`], which may stop the run by returning
//! [`ControlFlow::Break`].
//!
//! # Usage
//!
//! ```
//! use std::ops::ControlFlow;
//! use tourforge_core::Tour;
//! use tourforge_solver::event::{SolveListener, YieldPoint};
//!
//! #[derive(Debug)]
//! struct StopAfterConstruction;
//!
//! impl SolveListener for StopAfterConstruction {
//!     fn on_yield(&self, point: &YieldPoint, _tour: &Tour) -> ControlFlow<()> {
//!         match point {
//!             YieldPoint::ConstructionFinished { .. } => ControlFlow::Break(()),
//!             _ => ControlFlow::Continue(()),
//!         }
//!     }
//! }
//! ```

use std::fmt::Debug;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tourforge_core::Tour;

use crate::algorithm::{ConstructionAlgorithm, ImprovementAlgorithm};

/// A boundary between two stages of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YieldPoint {
    /// The initial tour is complete.
    ConstructionFinished {
        algorithm: ConstructionAlgorithm,
        weight: f64,
    },
    /// Improvement number `index` (0-based) is about to run.
    ImprovementStarting {
        algorithm: ImprovementAlgorithm,
        index: usize,
    },
    /// Improvement number `index` (0-based) returned.
    ImprovementFinished {
        algorithm: ImprovementAlgorithm,
        index: usize,
        weight: f64,
    },
}

/// Listener called at every yield point of a run.
///
/// Listeners run synchronously on the solving thread.
pub trait SolveListener: Send + Sync + Debug {
    /// Called between stages with the current tour.
    ///
    /// Returning [`ControlFlow::Break`] cancels the run.
    fn on_yield(&self, point: &YieldPoint, tour: &Tour) -> ControlFlow<()>;
}

/// Listener that never interrupts a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl SolveListener for NoopListener {
    fn on_yield(&self, _point: &YieldPoint, _tour: &Tour) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Cancels a run when an external flag is set.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use tourforge_solver::event::CancelOnFlag;
/// use tourforge_solver::TourSolver;
/// use tourforge_solver::algorithm::ConstructionAlgorithm;
/// use tourforge_core::{DistanceMatrix, TourForgeError};
///
/// let flag = AtomicBool::new(true);
/// let matrix = DistanceMatrix::from_fn(4, |i, j| (i + j) as f64).unwrap();
/// let solver = TourSolver::new(ConstructionAlgorithm::NearestNeighbor);
///
/// let result = solver.solve_with_listener(&matrix, &CancelOnFlag::new(&flag));
/// assert_eq!(result.unwrap_err(), TourForgeError::Cancelled);
///
/// flag.store(false, Ordering::SeqCst);
/// assert!(solver.solve_with_listener(&matrix, &CancelOnFlag::new(&flag)).is_ok());
/// ```
#[derive(Debug)]
pub struct CancelOnFlag<'a> {
    flag: &'a AtomicBool,
}

impl<'a> CancelOnFlag<'a> {
    /// Creates a listener that checks the given flag.
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl SolveListener for CancelOnFlag<'_> {
    fn on_yield(&self, _point: &YieldPoint, _tour: &Tour) -> ControlFlow<()> {
        if self.flag.load(Ordering::Relaxed) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Listener that counts yield points, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct CountingListener {
    constructions: AtomicUsize,
    improvements_started: AtomicUsize,
    improvements_finished: AtomicUsize,
}

impl CountingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    pub fn improvements_started(&self) -> usize {
        self.improvements_started.load(Ordering::SeqCst)
    }

    pub fn improvements_finished(&self) -> usize {
        self.improvements_finished.load(Ordering::SeqCst)
    }
}

impl SolveListener for CountingListener {
    fn on_yield(&self, point: &YieldPoint, _tour: &Tour) -> ControlFlow<()> {
        let counter = match point {
            YieldPoint::ConstructionFinished { .. } => &self.constructions,
            YieldPoint::ImprovementStarting { .. } => &self.improvements_started,
            YieldPoint::ImprovementFinished { .. } => &self.improvements_finished,
        };
        counter.fetch_add(1, Ordering::SeqCst);
        ControlFlow::Continue(())
    }
}
