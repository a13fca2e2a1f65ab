//! Run statistics collection.
//!
//! Each stage of a run records one [`PhaseStatistics`] entry: its duration,
//! how many candidate tours it evaluated and adopted, and the tour weight
//! before and after.

use std::time::Duration;

/// Statistics for a single stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStatistics {
    /// Index of this stage (0-based, construction first).
    pub phase_index: usize,
    /// Display name of the heuristic (e.g., "Multi-Fragment", "2-opt").
    pub phase_type: String,
    /// Time spent in this stage.
    pub duration: Duration,
    /// Number of candidate tours evaluated.
    pub moves_evaluated: u64,
    /// Number of candidates adopted.
    pub moves_accepted: u64,
    /// Weight of the incoming tour; `None` for construction.
    pub starting_weight: Option<f64>,
    /// Weight of the tour when the stage finished.
    pub ending_weight: f64,
}

impl PhaseStatistics {
    /// Creates empty statistics for a stage.
    pub fn new(phase_index: usize, phase_type: impl Into<String>) -> Self {
        Self {
            phase_index,
            phase_type: phase_type.into(),
            duration: Duration::ZERO,
            moves_evaluated: 0,
            moves_accepted: 0,
            starting_weight: None,
            ending_weight: f64::INFINITY,
        }
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }

    /// Returns candidates evaluated per second.
    pub fn speed(&self) -> u64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (self.moves_evaluated as f64 / secs) as u64
        } else {
            0
        }
    }
}

/// Complete statistics for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStatistics {
    phases: Vec<PhaseStatistics>,
}

impl SolverStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the statistics of a finished stage.
    pub fn record_phase(&mut self, phase: PhaseStatistics) {
        self.phases.push(phase);
    }

    pub fn phases(&self) -> &[PhaseStatistics] {
        &self.phases
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Sum of all stage durations.
    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|p| p.duration).sum()
    }

    pub fn total_moves_evaluated(&self) -> u64 {
        self.phases.iter().map(|p| p.moves_evaluated).sum()
    }

    pub fn total_moves_accepted(&self) -> u64 {
        self.phases.iter().map(|p| p.moves_accepted).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceptance_rate_handles_zero() {
        let phase = PhaseStatistics::new(0, "Multi-Fragment");
        assert_eq!(phase.acceptance_rate(), 0.0);
        assert_eq!(phase.speed(), 0);
    }

    #[test]
    fn totals_sum_phases() {
        let mut stats = SolverStatistics::new();
        let mut first = PhaseStatistics::new(1, "2-opt");
        first.moves_evaluated = 10;
        first.moves_accepted = 2;
        first.duration = Duration::from_millis(5);
        let mut second = PhaseStatistics::new(2, "Node Swap");
        second.moves_evaluated = 4;
        second.duration = Duration::from_millis(7);
        stats.record_phase(first);
        stats.record_phase(second);

        assert_eq!(stats.phase_count(), 2);
        assert_eq!(stats.total_moves_evaluated(), 14);
        assert_eq!(stats.total_moves_accepted(), 2);
        assert_eq!(stats.total_duration(), Duration::from_millis(12));
        assert_eq!(stats.phases()[0].acceptance_rate(), 0.2);
    }
}
