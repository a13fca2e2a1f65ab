//! 3-opt improver.

use tracing::trace;

use tourforge_core::{DistanceMatrix, Tour};

use super::{Improver, LocalSearchOutcome};
use crate::reconnection::{Segment, THREE_OPT_RECONNECTIONS};

/// Segment reconnection over three cut points.
///
/// For cut positions `i < j < k` (each at least two apart), the segments are
/// A = `[i, j)`, B = `[j, k)` and C = `[k, len) ++ [0, i)`. All seven
/// reversal patterns are evaluated in [`THREE_OPT_RECONNECTIONS`] order and
/// the lightest strictly improving one is adopted, the earliest on ties.
/// After an adoption the remaining `j` and `k` values are skipped and the
/// scan continues with the next `i`.
///
/// Tours of fewer than six nodes have no valid cut triple.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeOpt;

impl Improver for ThreeOpt {
    fn improve(&self, matrix: &DistanceMatrix, tour: &mut Tour) -> LocalSearchOutcome {
        let len = tour.len();
        let mut outcome = LocalSearchOutcome::new(tour.weight(matrix));
        let mut candidate = Vec::with_capacity(len);
        let mut best = Vec::with_capacity(len);

        'cuts: for i in 1..=len.saturating_sub(4) {
            for j in i + 2..=len - 2 {
                for k in j + 2..=len {
                    if i == 1 && k == len {
                        continue;
                    }

                    let nodes = tour.nodes();
                    let segments = [
                        Segment::new(&nodes[i..j]),
                        Segment::new(&nodes[j..k]),
                        Segment::wrapping(&nodes[k..], &nodes[..i]),
                    ];

                    let mut adopted = None;
                    for reconnection in THREE_OPT_RECONNECTIONS {
                        reconnection.apply(&segments, &mut candidate);
                        outcome.moves_evaluated += 1;
                        let weight = matrix.tour_weight(&candidate);
                        if weight < outcome.weight {
                            outcome.weight = weight;
                            std::mem::swap(&mut best, &mut candidate);
                            adopted = Some(reconnection);
                        }
                    }

                    if let Some(reconnection) = adopted {
                        outcome.moves_accepted += 1;
                        tour.nodes_mut().copy_from_slice(&best);
                        trace!(
                            event = "step",
                            phase = "3-opt",
                            i = i,
                            j = j,
                            k = k,
                            pattern = %reconnection,
                            weight = outcome.weight,
                        );
                        continue 'cuts;
                    }
                }
            }
        }

        outcome
    }

    fn name(&self) -> &'static str {
        "3-opt"
    }
}
