//! Algorithm identifiers and composite run labels.
//!
//! Every heuristic has a short code used in stored attempts. A run label
//! chains one construction code with the improvement codes applied after it,
//! joined by `+`:
//!
//! ```
//! use tourforge_solver::algorithm::{AlgorithmLabel, ConstructionAlgorithm, ImprovementAlgorithm};
//!
//! let label: AlgorithmLabel = "multiFrag+2Opt".parse().unwrap();
//! assert_eq!(label.construction, ConstructionAlgorithm::MultiFragment);
//! assert_eq!(label.improvements, vec![ImprovementAlgorithm::TwoOpt]);
//! assert_eq!(label.to_string(), "multiFrag+2Opt");
//! ```

use std::fmt;
use std::str::FromStr;

use tourforge_config::{ConstructionType, ImprovementType};
use tourforge_core::{DistanceMatrix, Result, Tour, TourForgeError};

use crate::construction::{
    Constructor, DoubleEndedNearestNeighbor, MultiFragment, NearestNeighbor,
};
use crate::localsearch::{Improver, LocalSearchOutcome, NodeSwap, ThreeOpt, TwoOpt};

/// Construction heuristics available to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructionAlgorithm {
    MultiFragment,
    NearestNeighbor,
    DoubleEndedNearestNeighbor,
}

impl ConstructionAlgorithm {
    /// All construction algorithms, in batch order.
    pub const ALL: [ConstructionAlgorithm; 3] = [
        ConstructionAlgorithm::MultiFragment,
        ConstructionAlgorithm::NearestNeighbor,
        ConstructionAlgorithm::DoubleEndedNearestNeighbor,
    ];

    /// Returns the short code stored in attempt labels.
    pub const fn code(self) -> &'static str {
        match self {
            ConstructionAlgorithm::MultiFragment => "multiFrag",
            ConstructionAlgorithm::NearestNeighbor => "nearestN",
            ConstructionAlgorithm::DoubleEndedNearestNeighbor => "doubleENN",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.code() == code)
    }

    /// Builds a tour with this heuristic.
    pub fn construct(self, matrix: &DistanceMatrix) -> Result<Tour> {
        self.constructor().construct(matrix)
    }

    /// Returns the display name used in log events.
    pub fn name(self) -> &'static str {
        self.constructor().name()
    }

    fn constructor(self) -> &'static dyn Constructor {
        match self {
            ConstructionAlgorithm::MultiFragment => &MultiFragment,
            ConstructionAlgorithm::NearestNeighbor => &NearestNeighbor,
            ConstructionAlgorithm::DoubleEndedNearestNeighbor => &DoubleEndedNearestNeighbor,
        }
    }
}

/// Improvement heuristics available to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImprovementAlgorithm {
    TwoOpt,
    ThreeOpt,
    NodeSwap,
}

impl ImprovementAlgorithm {
    /// All improvement algorithms, in batch order.
    pub const ALL: [ImprovementAlgorithm; 3] = [
        ImprovementAlgorithm::TwoOpt,
        ImprovementAlgorithm::ThreeOpt,
        ImprovementAlgorithm::NodeSwap,
    ];

    /// Returns the short code stored in attempt labels.
    pub const fn code(self) -> &'static str {
        match self {
            ImprovementAlgorithm::TwoOpt => "2Opt",
            ImprovementAlgorithm::ThreeOpt => "3Opt",
            ImprovementAlgorithm::NodeSwap => "nodeSwap",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.code() == code)
    }

    /// Improves `tour` in place with this heuristic.
    ///
    /// # Panics
    ///
    /// If `tour` does not cover every node of `matrix`.
    pub fn improve(self, matrix: &DistanceMatrix, tour: &mut Tour) -> LocalSearchOutcome {
        assert!(
            tour.fits(matrix),
            "{}-node tour does not fit a {}-node matrix",
            tour.len(),
            matrix.size()
        );
        self.improver().improve(matrix, tour)
    }

    /// Returns the display name used in log events.
    pub fn name(self) -> &'static str {
        self.improver().name()
    }

    fn improver(self) -> &'static dyn Improver {
        match self {
            ImprovementAlgorithm::TwoOpt => &TwoOpt,
            ImprovementAlgorithm::ThreeOpt => &ThreeOpt,
            ImprovementAlgorithm::NodeSwap => &NodeSwap,
        }
    }
}

impl From<ConstructionType> for ConstructionAlgorithm {
    fn from(value: ConstructionType) -> Self {
        match value {
            ConstructionType::MultiFragment => ConstructionAlgorithm::MultiFragment,
            ConstructionType::NearestNeighbor => ConstructionAlgorithm::NearestNeighbor,
            ConstructionType::DoubleEndedNearestNeighbor => {
                ConstructionAlgorithm::DoubleEndedNearestNeighbor
            }
        }
    }
}

impl From<ImprovementType> for ImprovementAlgorithm {
    fn from(value: ImprovementType) -> Self {
        match value {
            ImprovementType::TwoOpt => ImprovementAlgorithm::TwoOpt,
            ImprovementType::ThreeOpt => ImprovementAlgorithm::ThreeOpt,
            ImprovementType::NodeSwap => ImprovementAlgorithm::NodeSwap,
        }
    }
}

impl fmt::Display for ConstructionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for ImprovementAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ConstructionAlgorithm {
    type Err = TourForgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s).ok_or_else(|| TourForgeError::UnknownAlgorithm(s.to_string()))
    }
}

impl FromStr for ImprovementAlgorithm {
    type Err = TourForgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s).ok_or_else(|| TourForgeError::UnknownAlgorithm(s.to_string()))
    }
}

/// One construction followed by zero or more improvements, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlgorithmLabel {
    pub construction: ConstructionAlgorithm,
    pub improvements: Vec<ImprovementAlgorithm>,
}

impl AlgorithmLabel {
    /// Label of a construction-only run.
    pub fn new(construction: ConstructionAlgorithm) -> Self {
        Self {
            construction,
            improvements: Vec::new(),
        }
    }

    /// Appends an improvement to the chain.
    pub fn then(mut self, improvement: ImprovementAlgorithm) -> Self {
        self.improvements.push(improvement);
        self
    }

    pub fn is_construction_only(&self) -> bool {
        self.improvements.is_empty()
    }
}

impl fmt::Display for AlgorithmLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.construction.code())?;
        for improvement in &self.improvements {
            write!(f, "+{}", improvement.code())?;
        }
        Ok(())
    }
}

impl FromStr for AlgorithmLabel {
    type Err = TourForgeError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('+');
        let construction: ConstructionAlgorithm = parts
            .next()
            .ok_or_else(|| TourForgeError::UnknownAlgorithm(s.to_string()))?
            .parse()?;
        let improvements = parts
            .map(str::parse::<ImprovementAlgorithm>)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            construction,
            improvements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "does not fit")]
    fn improve_rejects_mismatched_tour() {
        let matrix = tourforge_test::square_cycle_matrix();
        let mut tour = Tour::new(vec![0, 1, 2]).unwrap();
        ImprovementAlgorithm::TwoOpt.improve(&matrix, &mut tour);
    }

    #[test]
    fn codes_round_trip() {
        for alg in ConstructionAlgorithm::ALL {
            assert_eq!(alg.code().parse::<ConstructionAlgorithm>().unwrap(), alg);
        }
        for alg in ImprovementAlgorithm::ALL {
            assert_eq!(alg.code().parse::<ImprovementAlgorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn chained_label() {
        let label = AlgorithmLabel::new(ConstructionAlgorithm::DoubleEndedNearestNeighbor)
            .then(ImprovementAlgorithm::ThreeOpt)
            .then(ImprovementAlgorithm::NodeSwap);
        assert_eq!(label.to_string(), "doubleENN+3Opt+nodeSwap");
        assert_eq!(label.to_string().parse::<AlgorithmLabel>().unwrap(), label);
    }

    #[test]
    fn bare_label() {
        let label: AlgorithmLabel = "nearestN".parse().unwrap();
        assert!(label.is_construction_only());
        assert_eq!(label.to_string(), "nearestN");
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(
            "greedy".parse::<AlgorithmLabel>().unwrap_err(),
            TourForgeError::UnknownAlgorithm("greedy".to_string())
        );
        assert!("multiFrag+4Opt".parse::<AlgorithmLabel>().is_err());
        assert!("".parse::<AlgorithmLabel>().is_err());
        assert!("multiFrag+".parse::<AlgorithmLabel>().is_err());
        // Improvements cannot lead a label.
        assert!("2Opt".parse::<AlgorithmLabel>().is_err());
    }

    #[test]
    fn config_types_map_one_to_one() {
        let constructions: Vec<ConstructionAlgorithm> =
            ConstructionType::ALL.into_iter().map(Into::into).collect();
        assert_eq!(constructions, ConstructionAlgorithm::ALL.to_vec());

        let improvements: Vec<ImprovementAlgorithm> =
            ImprovementType::ALL.into_iter().map(Into::into).collect();
        assert_eq!(improvements, ImprovementAlgorithm::ALL.to_vec());
    }

    #[test]
    fn dispatch_matches_direct_call() {
        let matrix = tourforge_test::square_cycle_matrix();
        let mut tour = ConstructionAlgorithm::DoubleEndedNearestNeighbor
            .construct(&matrix)
            .unwrap();
        let outcome = ImprovementAlgorithm::TwoOpt.improve(&matrix, &mut tour);
        assert_eq!(outcome.weight, 12.0);
        assert_eq!(ImprovementAlgorithm::ThreeOpt.name(), "3-opt");
        assert_eq!(ConstructionAlgorithm::MultiFragment.name(), "Multi-Fragment");
    }
}
