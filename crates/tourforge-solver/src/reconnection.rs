//! Reconnection patterns for segment-reversal moves.
//!
//! Cutting a tour at k positions leaves k segments. The first segment starts
//! at the first cut; the last one wraps around the end of the sequence back to
//! position 0. A move rebuilds the tour by concatenating the segments in their
//! original order, reversing some of them.
//!
//! # Example
//!
//! ```
//! use tourforge_solver::reconnection::{Segment, THREE_OPT_RECONNECTIONS, TWO_OPT_RECONNECTION};
//!
//! // 3-opt has 7 non-trivial reconnection patterns
//! assert_eq!(THREE_OPT_RECONNECTIONS.len(), 7);
//!
//! // 2-opt keeps the first segment and reverses the wrapping one
//! let nodes = [0, 1, 2, 3, 4];
//! let segments = [Segment::new(&nodes[1..3]), Segment::wrapping(&nodes[3..], &nodes[..1])];
//! let mut out = Vec::new();
//! TWO_OPT_RECONNECTION.apply(&segments, &mut out);
//! assert_eq!(out, vec![1, 2, 0, 4, 3]);
//! ```

/// A contiguous run of tour positions, possibly wrapping past the end.
///
/// `first` is followed by `second`; a segment that does not wrap has an empty
/// `second` part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    first: &'a [usize],
    second: &'a [usize],
}

impl<'a> Segment<'a> {
    /// Creates a segment from one contiguous slice.
    #[inline]
    pub const fn new(nodes: &'a [usize]) -> Self {
        Self {
            first: nodes,
            second: &[],
        }
    }

    /// Creates a segment running through `first` and then `second`.
    #[inline]
    pub const fn wrapping(first: &'a [usize], second: &'a [usize]) -> Self {
        Self { first, second }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn extend_into(&self, out: &mut Vec<usize>, reversed: bool) {
        if reversed {
            out.extend(self.second.iter().rev());
            out.extend(self.first.iter().rev());
        } else {
            out.extend_from_slice(self.first);
            out.extend_from_slice(self.second);
        }
    }
}

/// A reconnection pattern over a fixed number of segments.
///
/// Bit `i` of `reverse_mask` is set if segment `i` is reversed; segment 0 is
/// the one starting at the first cut.
///
/// ```
/// use tourforge_solver::reconnection::Reconnection;
///
/// // A'BC': reverse the first and third segments
/// let pattern = Reconnection::new(0b101, 3);
/// assert!(pattern.should_reverse(0));
/// assert!(!pattern.should_reverse(1));
/// assert!(pattern.should_reverse(2));
/// assert_eq!(pattern.to_string(), "A'BC'");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reconnection {
    reverse_mask: u8,
    segments: u8,
}

impl Reconnection {
    /// Creates a pattern (const for compile-time tables).
    #[inline]
    pub const fn new(reverse_mask: u8, segments: u8) -> Self {
        Self {
            reverse_mask,
            segments,
        }
    }

    /// Returns the number of segments this pattern reconnects.
    #[inline]
    pub const fn segment_count(&self) -> usize {
        self.segments as usize
    }

    /// Returns true if segment `idx` is reversed.
    #[inline]
    pub const fn should_reverse(&self, idx: usize) -> bool {
        (self.reverse_mask >> idx) & 1 == 1
    }

    /// Returns true if no segment is reversed (the tour is unchanged).
    pub const fn is_identity(&self) -> bool {
        self.reverse_mask == 0
    }

    /// Writes the reconnected sequence into `out`, replacing its contents.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `segments.len()` differs from
    /// [`segment_count`](Self::segment_count).
    pub fn apply(&self, segments: &[Segment<'_>], out: &mut Vec<usize>) {
        debug_assert_eq!(segments.len(), self.segment_count());
        out.clear();
        for (idx, segment) in segments.iter().enumerate() {
            segment.extend_into(out, self.should_reverse(idx));
        }
    }
}

impl std::fmt::Display for Reconnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for idx in 0..self.segment_count() {
            let name = (b'A' + idx as u8) as char;
            write!(f, "{name}")?;
            if self.should_reverse(idx) {
                write!(f, "'")?;
            }
        }
        Ok(())
    }
}

/// The single 2-opt pattern: keep A, reverse B.
pub const TWO_OPT_RECONNECTION: Reconnection = Reconnection::new(0b10, 2);

/// The seven non-trivial 3-opt patterns in evaluation order.
///
/// | # | Pattern | Reversed |
/// |---|---------|----------|
/// | 0 | ABC'    | C        |
/// | 1 | AB'C    | B        |
/// | 2 | AB'C'   | B, C     |
/// | 3 | A'BC    | A        |
/// | 4 | A'BC'   | A, C     |
/// | 5 | A'B'C   | A, B     |
/// | 6 | A'B'C'  | A, B, C  |
pub static THREE_OPT_RECONNECTIONS: &[Reconnection] = &[
    Reconnection::new(0b100, 3),
    Reconnection::new(0b010, 3),
    Reconnection::new(0b110, 3),
    Reconnection::new(0b001, 3),
    Reconnection::new(0b101, 3),
    Reconnection::new(0b011, 3),
    Reconnection::new(0b111, 3),
];

/// Generates every non-trivial reversal pattern over `segments` segments.
///
/// Patterns are ordered by counting in binary with the first segment as the
/// most significant digit, so the result for 3 segments equals
/// [`THREE_OPT_RECONNECTIONS`].
///
/// # Panics
///
/// Panics if `segments` is not between 2 and 7.
///
/// ```
/// use tourforge_solver::reconnection::{enumerate_reconnections, THREE_OPT_RECONNECTIONS};
///
/// assert_eq!(enumerate_reconnections(2).len(), 3);
/// assert_eq!(enumerate_reconnections(3), THREE_OPT_RECONNECTIONS);
/// ```
pub fn enumerate_reconnections(segments: usize) -> Vec<Reconnection> {
    assert!(
        (2..=7).contains(&segments),
        "segments must be between 2 and 7"
    );

    (1u8..(1u8 << segments))
        .map(|code| {
            // Mirror the bits so the first segment is the most significant.
            let mut mask = 0u8;
            for idx in 0..segments {
                if (code >> (segments - 1 - idx)) & 1 == 1 {
                    mask |= 1 << idx;
                }
            }
            Reconnection::new(mask, segments as u8)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_identity_in_patterns() {
        for segments in 2..=7 {
            let patterns = enumerate_reconnections(segments);
            assert_eq!(patterns.len(), (1 << segments) - 1);
            assert!(patterns.iter().all(|p| !p.is_identity()));
        }
    }

    #[test]
    fn three_opt_names_in_order() {
        let names: Vec<String> = THREE_OPT_RECONNECTIONS
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            names,
            vec!["ABC'", "AB'C", "AB'C'", "A'BC", "A'BC'", "A'B'C", "A'B'C'"]
        );
    }

    #[test]
    fn two_opt_pattern_is_first_of_two_segment_enumeration() {
        assert_eq!(enumerate_reconnections(2)[0], TWO_OPT_RECONNECTION);
        assert_eq!(TWO_OPT_RECONNECTION.to_string(), "AB'");
    }

    #[test]
    fn apply_reverses_wrapping_segment() {
        let nodes = [0, 1, 2, 3, 4, 5];
        let segments = [
            Segment::new(&nodes[1..3]),
            Segment::new(&nodes[3..5]),
            Segment::wrapping(&nodes[5..], &nodes[..1]),
        ];
        let mut out = Vec::new();

        THREE_OPT_RECONNECTIONS[0].apply(&segments, &mut out);
        assert_eq!(out, vec![1, 2, 3, 4, 0, 5]);

        THREE_OPT_RECONNECTIONS[6].apply(&segments, &mut out);
        assert_eq!(out, vec![2, 1, 4, 3, 0, 5]);
    }

    #[test]
    fn segment_len_counts_both_parts() {
        let nodes = [0, 1, 2, 3];
        assert_eq!(Segment::wrapping(&nodes[2..], &nodes[..1]).len(), 3);
        assert!(Segment::new(&nodes[..0]).is_empty());
    }
}
