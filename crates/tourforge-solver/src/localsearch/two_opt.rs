//! 2-opt improver.

use tracing::trace;

use tourforge_core::{DistanceMatrix, Tour};

use super::{Improver, LocalSearchOutcome};
use crate::reconnection::{Segment, TWO_OPT_RECONNECTION};

/// Segment reversal over two cut points.
///
/// For cut positions `i < j`, segment A is `[i, j)` and segment B runs from
/// `j` to the end and wraps to `[0, i)`. The candidate `A ++ reverse(B)` is
/// adopted if strictly lighter than the best tour so far; the scan then moves
/// on to the next `i`. One pass over `i` is made.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt;

impl Improver for TwoOpt {
    fn improve(&self, matrix: &DistanceMatrix, tour: &mut Tour) -> LocalSearchOutcome {
        let len = tour.len();
        let mut outcome = LocalSearchOutcome::new(tour.weight(matrix));
        let mut candidate = Vec::with_capacity(len);

        for i in 1..len.saturating_sub(1) {
            for j in i + 2..=len {
                // Cutting at 1 and len only rotates the tour.
                if i == 1 && j == len {
                    continue;
                }

                let nodes = tour.nodes();
                let segments = [
                    Segment::new(&nodes[i..j]),
                    Segment::wrapping(&nodes[j..], &nodes[..i]),
                ];
                TWO_OPT_RECONNECTION.apply(&segments, &mut candidate);

                outcome.moves_evaluated += 1;
                let weight = matrix.tour_weight(&candidate);
                if weight < outcome.weight {
                    outcome.weight = weight;
                    outcome.moves_accepted += 1;
                    tour.nodes_mut().copy_from_slice(&candidate);
                    trace!(event = "step", phase = "2-opt", i = i, j = j, weight = weight);
                    break;
                }
            }
        }

        outcome
    }

    fn name(&self) -> &'static str {
        "2-opt"
    }
}
