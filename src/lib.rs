//! Lanesplit: lane-local median-bucket partitioning
//!
//! An input of `len` elements is split into `N` equal, contiguous lanes. Each
//! lane selects its chunk's median in place, swaps medians with its immediate
//! neighbors and keeps only the elements strictly between them. The output is
//! the lanes' kept elements concatenated in lane order: a lane-grouped,
//! partially filtered partition, not a sorted sequence, and possibly shorter
//! than the input.

pub mod arena;
pub mod boundary;
pub mod coordinator;
pub mod lane;
pub mod lanes;
pub mod report;
pub mod select;

// Re-export main types at crate root
pub use arena::{LaneArena, LaneChunk};
pub use boundary::{BoundaryError, BoundarySlot, BoundarySlots};
pub use coordinator::{
    compute_parallel, compute_sequential, partition, partition_with_report, PartitionConfig,
    Strategy,
};
pub use lane::{filter_chunk, LaneBounds, LaneOutcome};
pub use lanes::{LaneError, LaneLayout, LaneRange, Neighbors};
pub use report::{LaneSummary, PartitionReport, ReportSummary};
pub use select::{median_index, select_in_place, select_median, SelectError};
