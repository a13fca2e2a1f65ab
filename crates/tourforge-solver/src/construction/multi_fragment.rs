//! Multi-Fragment (greedy edge) construction.

use std::collections::VecDeque;

use tracing::trace;

use tourforge_core::{DistanceMatrix, Edge, EdgeCatalog, Result, Tour, TourForgeError};

use super::Constructor;

type Fragment = VecDeque<usize>;

/// Greedy edge construction over path fragments.
///
/// Edges are taken shortest first. An edge is kept if both of its nodes are
/// free or fragment endpoints and it does not close a fragment into a cycle
/// early. Fragments sharing an endpoint are joined after every accepted edge.
///
/// # Example
///
/// ```
/// use tourforge_core::DistanceMatrix;
/// use tourforge_solver::construction::{Constructor, MultiFragment};
///
/// let inf = f64::INFINITY;
/// let matrix = DistanceMatrix::new(vec![
///     vec![inf, 1.0, 9.0, 9.0],
///     vec![1.0, inf, 1.0, 9.0],
///     vec![9.0, 1.0, inf, 1.0],
///     vec![9.0, 9.0, 1.0, inf],
/// ]).unwrap();
///
/// let tour = MultiFragment.construct(&matrix).unwrap();
/// assert_eq!(tour.nodes(), &[0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiFragment;

/// Outcome of offering an edge to the fragment list.
enum Attachment {
    Rejected,
    Extended,
    /// The edge closes fragment `idx`, which already spans every node.
    Closed(usize),
}

impl Constructor for MultiFragment {
    fn construct(&self, matrix: &DistanceMatrix) -> Result<Tour> {
        let n = matrix.size();
        let catalog = EdgeCatalog::new(matrix);
        let mut fragments: Vec<Fragment> = Vec::new();

        for &edge in &catalog {
            if fragments.is_empty() {
                fragments.push(VecDeque::from([edge.a, edge.b]));
                continue;
            }

            if is_interior(&fragments, edge.a) || is_interior(&fragments, edge.b) {
                continue;
            }

            match attach(&mut fragments, edge, n) {
                Attachment::Rejected => continue,
                Attachment::Closed(idx) => {
                    return Tour::for_matrix(fragments.swap_remove(idx).into(), matrix);
                }
                Attachment::Extended => {}
            }
            trace!(event = "edge_accepted", a = edge.a, b = edge.b);

            // Stable: equal lengths keep their relative order.
            fragments.sort_by(|x, y| y.len().cmp(&x.len()));
            if fragments[0].len() == n {
                return Tour::for_matrix(fragments.swap_remove(0).into(), matrix);
            }

            join_pass(&mut fragments);
            fragments.retain(|fragment| !fragment.is_empty());
        }

        let longest = fragments
            .into_iter()
            .max_by_key(VecDeque::len)
            .unwrap_or_default();
        if longest.len() != n {
            return Err(TourForgeError::IncompleteTour {
                expected: n,
                found: longest.len(),
            });
        }
        Tour::for_matrix(longest.into(), matrix)
    }

    fn name(&self) -> &'static str {
        "Multi-Fragment"
    }
}

/// Returns true if `node` sits strictly inside some fragment.
fn is_interior(fragments: &[Fragment], node: usize) -> bool {
    fragments.iter().any(|fragment| {
        let len = fragment.len();
        len > 2
            && fragment
                .iter()
                .skip(1)
                .take(len - 2)
                .any(|&inner| inner == node)
    })
}

/// Attaches `edge` to the first fragment with a matching endpoint, or starts a
/// new fragment.
fn attach(fragments: &mut Vec<Fragment>, edge: Edge, n: usize) -> Attachment {
    let Edge { a, b } = edge;

    for (idx, fragment) in fragments.iter_mut().enumerate() {
        let (Some(&start), Some(&end)) = (fragment.front(), fragment.back()) else {
            continue;
        };
        let (start_a, start_b, end_a, end_b) = (start == a, start == b, end == a, end == b);

        if (start_a && end_b) || (start_b && end_a) {
            return if fragment.len() == n {
                Attachment::Closed(idx)
            } else {
                Attachment::Rejected
            };
        }

        if start_a {
            fragment.push_front(b);
        } else if start_b {
            fragment.push_front(a);
        } else if end_a {
            fragment.push_back(b);
        } else if end_b {
            fragment.push_back(a);
        } else {
            continue;
        }
        return Attachment::Extended;
    }

    fragments.push(VecDeque::from([a, b]));
    Attachment::Extended
}

/// Joins every pair of fragments sharing an endpoint.
///
/// Fragment `i` (from the back) absorbs fragment `j < i`, which is left empty.
fn join_pass(fragments: &mut [Fragment]) {
    for i in (0..fragments.len()).rev() {
        for j in (0..i).rev() {
            let (head, tail) = fragments.split_at_mut(i);
            let (a, b) = (&mut tail[0], &mut head[j]);
            if let Some(joined) = join(a, b) {
                *a = joined;
                b.clear();
            }
        }
    }
}

/// Merges `a` and `b` over their shared endpoint, which appears once in the
/// result.
fn join(a: &Fragment, b: &Fragment) -> Option<Fragment> {
    let (a_start, a_end) = (*a.front()?, *a.back()?);
    let (b_start, b_end) = (*b.front()?, *b.back()?);

    let joined: Fragment = if a_start == b_start {
        b.iter().rev().take(b.len() - 1).chain(a.iter()).copied().collect()
    } else if a_start == b_end {
        b.iter().take(b.len() - 1).chain(a.iter()).copied().collect()
    } else if a_end == b_start {
        a.iter().take(a.len() - 1).chain(b.iter()).copied().collect()
    } else if a_end == b_end {
        a.iter().take(a.len() - 1).chain(b.iter().rev()).copied().collect()
    } else {
        return None;
    };
    Some(joined)
}
