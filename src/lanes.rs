//! Lane layout over an input buffer
//!
//! Produces the contiguous, equal-size lane ranges that a partition run hands
//! out to its lanes. The layout is the single place where the precondition
//! contract (`lane_count >= 1`, `len >= lane_count`, `len % lane_count == 0`)
//! is checked; everything downstream trusts it.

use std::ops::Range;

use thiserror::Error;

/// Errors that can occur while laying out or running lanes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaneError {
    #[error("lane_count must be greater than 0")]
    NoLanes,

    #[error("input has {len} elements, fewer than the {lanes} lanes requested")]
    TooFewElements { len: usize, lanes: usize },

    #[error("input length {len} is not divisible by lane_count {lanes}")]
    UnevenSplit { len: usize, lanes: usize },

    #[error("layout covers {expected} elements but the buffer holds {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("lane {lane} panicked before producing its result")]
    LanePanicked { lane: usize },
}

/// A single lane's contiguous range `[start, end)` of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneRange {
    /// Index of the owning lane
    pub lane: usize,

    /// First index owned by the lane
    pub start: usize,

    /// One past the last index owned by the lane
    pub end: usize,
}

impl LaneRange {
    /// Returns the number of indices in this range
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this range has no indices
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the range as a `std::ops::Range`
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns true if `index` falls inside this range
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

/// Which neighbors a lane exchanges boundaries with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    /// Lane index to the left, if any
    pub left: Option<usize>,

    /// Lane index to the right, if any
    pub right: Option<usize>,
}

/// Validated split of an input of `len` elements into `lane_count` lanes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneLayout {
    len: usize,
    lane_count: usize,
    chunk_len: usize,
}

impl LaneLayout {
    /// Create a layout for `len` elements over `lane_count` lanes
    ///
    /// # Example
    ///
    /// ```
    /// use lanesplit::{LaneLayout, LaneError};
    ///
    /// let layout = LaneLayout::new(12, 3).unwrap();
    /// assert_eq!(layout.chunk_len(), 4);
    /// assert_eq!(layout.range(1).as_range(), 4..8);
    ///
    /// assert_eq!(LaneLayout::new(10, 3), Err(LaneError::UnevenSplit { len: 10, lanes: 3 }));
    /// ```
    pub fn new(len: usize, lane_count: usize) -> Result<Self, LaneError> {
        if lane_count == 0 {
            return Err(LaneError::NoLanes);
        }
        if len < lane_count {
            return Err(LaneError::TooFewElements {
                len,
                lanes: lane_count,
            });
        }
        if len % lane_count != 0 {
            return Err(LaneError::UnevenSplit {
                len,
                lanes: lane_count,
            });
        }

        let layout = Self {
            len,
            lane_count,
            chunk_len: len / lane_count,
        };
        log::debug!(
            "lane layout: {} elements over {} lanes of {}",
            layout.len,
            layout.lane_count,
            layout.chunk_len
        );
        Ok(layout)
    }

    /// Total number of elements covered
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no elements are covered (never the case once validated)
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of lanes
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Elements per lane
    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    /// Position of the boundary median inside every chunk
    pub fn median_index(&self) -> usize {
        crate::select::median_index(self.chunk_len)
    }

    /// Range owned by `lane`
    ///
    /// # Panics
    ///
    /// Panics if `lane >= lane_count()`.
    pub fn range(&self, lane: usize) -> LaneRange {
        assert!(
            lane < self.lane_count,
            "lane {} out of range for {} lanes",
            lane,
            self.lane_count
        );
        LaneRange {
            lane,
            start: lane * self.chunk_len,
            end: (lane + 1) * self.chunk_len,
        }
    }

    /// Neighbors of `lane` in the boundary exchange
    pub fn neighbors(&self, lane: usize) -> Neighbors {
        Neighbors {
            left: lane.checked_sub(1),
            right: (lane + 1 < self.lane_count).then_some(lane + 1),
        }
    }

    /// Returns an iterator over the lane ranges in lane order
    pub fn iter(&self) -> LaneRanges<'_> {
        LaneRanges {
            layout: self,
            next: 0,
        }
    }

    /// Verify that all indices from 0 to len-1 are covered exactly once
    #[cfg(test)]
    fn verify_coverage(&self) -> bool {
        let mut seen = vec![false; self.len];
        for range in self {
            for idx in range.as_range() {
                if idx >= self.len || seen[idx] {
                    return false;
                }
                seen[idx] = true;
            }
        }
        seen.iter().all(|&b| b)
    }
}

impl<'a> IntoIterator for &'a LaneLayout {
    type Item = LaneRange;
    type IntoIter = LaneRanges<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the ranges of a layout
pub struct LaneRanges<'a> {
    layout: &'a LaneLayout,
    next: usize,
}

impl<'a> Iterator for LaneRanges<'a> {
    type Item = LaneRange;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.layout.lane_count {
            return None;
        }
        let range = self.layout.range(self.next);
        self.next += 1;
        Some(range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.layout.lane_count - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for LaneRanges<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_even_split() {
        let layout = LaneLayout::new(12, 3).unwrap();

        assert_eq!(layout.lane_count(), 3);
        assert_eq!(layout.chunk_len(), 4);
        assert_eq!(layout.median_index(), 2);
        assert!(layout.verify_coverage());

        let ranges: Vec<_> = layout.iter().map(|r| r.as_range()).collect();
        assert_eq!(ranges, vec![0..4, 4..8, 8..12]);
    }

    #[rstest]
    #[case(0, 0, LaneError::NoLanes)]
    #[case(5, 0, LaneError::NoLanes)]
    #[case(2, 3, LaneError::TooFewElements { len: 2, lanes: 3 })]
    #[case(0, 1, LaneError::TooFewElements { len: 0, lanes: 1 })]
    #[case(10, 4, LaneError::UnevenSplit { len: 10, lanes: 4 })]
    #[case(7, 2, LaneError::UnevenSplit { len: 7, lanes: 2 })]
    fn test_precondition_errors(
        #[case] len: usize,
        #[case] lanes: usize,
        #[case] expected: LaneError,
    ) {
        assert_eq!(LaneLayout::new(len, lanes), Err(expected));
    }

    #[test]
    fn test_coverage_exhaustive() {
        for lanes in 1..=8 {
            for chunk in 1..=9 {
                let layout = LaneLayout::new(lanes * chunk, lanes).unwrap();
                assert!(
                    layout.verify_coverage(),
                    "coverage failed for lanes={}, chunk={}",
                    lanes,
                    chunk
                );
                assert_eq!(layout.iter().len(), lanes);
            }
        }
    }

    #[test]
    fn test_neighbors() {
        let single = LaneLayout::new(4, 1).unwrap();
        assert_eq!(
            single.neighbors(0),
            Neighbors {
                left: None,
                right: None
            }
        );

        let layout = LaneLayout::new(6, 3).unwrap();
        assert_eq!(layout.neighbors(0).left, None);
        assert_eq!(layout.neighbors(0).right, Some(1));
        assert_eq!(layout.neighbors(1).left, Some(0));
        assert_eq!(layout.neighbors(1).right, Some(2));
        assert_eq!(layout.neighbors(2).left, Some(1));
        assert_eq!(layout.neighbors(2).right, None);
    }

    #[test]
    fn test_range_helpers() {
        let range = LaneRange {
            lane: 2,
            start: 10,
            end: 15,
        };
        assert_eq!(range.len(), 5);
        assert!(!range.is_empty());
        assert!(range.contains(10));
        assert!(range.contains(14));
        assert!(!range.contains(15));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_range_out_of_bounds() {
        let layout = LaneLayout::new(4, 2).unwrap();
        let _ = layout.range(2);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LaneError::UnevenSplit { len: 10, lanes: 4 }.to_string(),
            "input length 10 is not divisible by lane_count 4"
        );
        assert_eq!(
            LaneError::NoLanes.to_string(),
            "lane_count must be greater than 0"
        );
    }
}
