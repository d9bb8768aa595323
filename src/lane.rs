//! Per-lane selection, boundary exchange and filtering
//!
//! A lane selects its chunk's median in place, publishes it, learns its
//! neighbors' medians and keeps only the elements that fall strictly between
//! them. Both comparisons are strict: a value equal to a neighbor's median is
//! dropped, so a partition run can return fewer elements than it was given.

use std::fmt;

use crate::arena::LaneChunk;
use crate::boundary::BoundarySlots;
use crate::lanes::{LaneRange, Neighbors};
use crate::select::select_median;

/// The filter a lane applies, determined by its position among the lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneBounds<T> {
    /// Single lane: no neighbors, keep everything
    Unbounded,

    /// First lane: keep `x < hi`
    Below(T),

    /// Last lane: keep `x > lo`
    Above(T),

    /// Middle lane: keep `lo < x < hi`
    Between { lo: T, hi: T },
}

impl<T: Ord + Copy> LaneBounds<T> {
    /// Bounds for `lane` given every lane's median
    ///
    /// # Panics
    ///
    /// Panics if `medians` is empty or `lane >= medians.len()`.
    pub fn from_medians(lane: usize, medians: &[T]) -> Self {
        let lane_count = medians.len();
        assert!(lane < lane_count, "lane {} out of range for {} lanes", lane, lane_count);

        match (lane, lane_count) {
            (_, 1) => LaneBounds::Unbounded,
            (0, _) => LaneBounds::Below(medians[1]),
            (l, n) if l == n - 1 => LaneBounds::Above(medians[n - 2]),
            (l, _) => LaneBounds::Between {
                lo: medians[l - 1],
                hi: medians[l + 1],
            },
        }
    }

    /// Bounds from the slots of `neighbors`, blocking until each is published
    ///
    /// The left wait happens first, but the two are independent: the result
    /// is the same whichever neighbor publishes first.
    pub fn await_neighbors(neighbors: Neighbors, slots: &BoundarySlots<T>) -> Self
    where
        T: fmt::Debug,
    {
        let left = neighbors.left.map(|l| slots.get(l).wait());
        let right = neighbors.right.map(|r| slots.get(r).wait());

        match (left, right) {
            (None, None) => LaneBounds::Unbounded,
            (None, Some(hi)) => LaneBounds::Below(hi),
            (Some(lo), None) => LaneBounds::Above(lo),
            (Some(lo), Some(hi)) => LaneBounds::Between { lo, hi },
        }
    }

    /// Returns true if `x` passes this lane's filter
    #[inline]
    pub fn keeps(&self, x: T) -> bool {
        match *self {
            LaneBounds::Unbounded => true,
            LaneBounds::Below(hi) => x < hi,
            LaneBounds::Above(lo) => x > lo,
            LaneBounds::Between { lo, hi } => lo < x && x < hi,
        }
    }
}

impl<T: fmt::Display> fmt::Display for LaneBounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneBounds::Unbounded => write!(f, "(-inf, +inf)"),
            LaneBounds::Below(hi) => write!(f, "(-inf, {})", hi),
            LaneBounds::Above(lo) => write!(f, "({}, +inf)", lo),
            LaneBounds::Between { lo, hi } => write!(f, "({}, {})", lo, hi),
        }
    }
}

/// Keep the elements of `chunk` that pass `bounds`, in the chunk's current order
pub fn filter_chunk<T: Ord + Copy>(chunk: &[T], bounds: &LaneBounds<T>) -> Vec<T> {
    chunk.iter().copied().filter(|&x| bounds.keeps(x)).collect()
}

/// Everything a lane produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneOutcome<T> {
    /// Arena range the lane owned
    pub range: LaneRange,

    /// Median the lane selected and published
    pub median: T,

    /// Filter the lane applied
    pub bounds: LaneBounds<T>,

    /// Elements kept, in post-selection chunk order
    pub kept: Vec<T>,
}

impl<T> LaneOutcome<T> {
    /// Index of the lane
    pub fn lane(&self) -> usize {
        self.range.lane
    }

    /// Number of chunk elements the filter rejected
    pub fn dropped(&self) -> usize {
        self.range.len() - self.kept.len()
    }
}

/// Select the boundary median of a lane's chunk in place
///
/// # Panics
///
/// Panics on an empty chunk. Chunks split from a validated layout always
/// hold at least one element.
pub(crate) fn select_chunk_median<T: Ord + Copy>(chunk: &mut LaneChunk<'_, T>) -> T {
    match select_median(chunk.as_mut_slice()) {
        Some(median) => median,
        None => unreachable!("lane {} received an empty chunk", chunk.lane()),
    }
}

/// Run one lane end to end against shared boundary slots
///
/// Selection, publish, neighbor wait, filter. Blocks in the neighbor wait
/// until the adjacent lanes have published.
pub(crate) fn run_lane<T>(
    mut chunk: LaneChunk<'_, T>,
    neighbors: Neighbors,
    slots: &BoundarySlots<T>,
) -> LaneOutcome<T>
where
    T: Ord + Copy + fmt::Debug,
{
    let lane = chunk.lane();
    let median = select_chunk_median(&mut chunk);

    if let Err(err) = slots.get(lane).publish(median) {
        log::warn!("lane {}: {}", lane, err);
    }

    let bounds = LaneBounds::await_neighbors(neighbors, slots);
    let kept = filter_chunk(&chunk, &bounds);
    log::trace!(
        "lane {}: median {:?}, kept {}/{}",
        lane,
        median,
        kept.len(),
        chunk.len()
    );

    LaneOutcome {
        range: chunk.range(),
        median,
        bounds,
        kept,
    }
}
