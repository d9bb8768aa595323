//! Partition coordinators
//!
//! Both coordinators validate the layout up front, split the input into
//! disjoint lane chunks, run every lane and concatenate the kept elements in
//! lane order. They differ only in scheduling:
//!
//! - [`compute_parallel`] runs one scoped thread per lane; lanes meet through
//!   [`BoundarySlots`] and the result is assembled after every lane joins.
//! - [`compute_sequential`] selects every chunk first, then filters every
//!   chunk, on the calling thread. It keeps the same multiset as the parallel
//!   run and is the baseline to compare it against.
//!
//! A failed validation returns before the input is touched.

use std::fmt;

use crate::arena::LaneArena;
use crate::boundary::BoundarySlots;
use crate::lane::{filter_chunk, run_lane, select_chunk_median, LaneBounds, LaneOutcome};
use crate::lanes::{LaneError, LaneLayout};
use crate::report::PartitionReport;

/// How lanes are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// One thread per lane, boundaries exchanged through slots
    #[default]
    Parallel,

    /// All lanes on the calling thread, selection pass then filter pass
    Sequential,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Parallel => write!(f, "parallel"),
            Strategy::Sequential => write!(f, "sequential"),
        }
    }
}

/// Configuration for a partition run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionConfig {
    /// Number of lanes the input is split into
    /// Default: available hardware parallelism, or 1 if unknown
    pub lane_count: usize,

    /// Scheduling strategy
    /// Default: `Strategy::Parallel`
    pub strategy: Strategy,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            lane_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            strategy: Strategy::default(),
        }
    }
}

impl PartitionConfig {
    /// Create a configuration with the given lane count
    pub fn with_lanes(lane_count: usize) -> Self {
        Self {
            lane_count,
            ..Default::default()
        }
    }

    /// Set the scheduling strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Switch to the sequential strategy
    pub fn sequential(self) -> Self {
        self.with_strategy(Strategy::Sequential)
    }
}

/// Partition `input` with one concurrent lane per chunk
///
/// `input` is rearranged in place chunk by chunk. Blocks until every lane has
/// finished.
///
/// # Example
///
/// ```
/// use lanesplit::compute_parallel;
///
/// let mut data = vec![1, 2, 3, 4];
/// let mut out = compute_parallel(&mut data, 2).unwrap();
/// out.sort_unstable();
/// assert_eq!(out, vec![1, 2, 3, 4]);
/// ```
pub fn compute_parallel<T>(input: &mut [T], lane_count: usize) -> Result<Vec<T>, LaneError>
where
    T: Ord + Copy + Send + fmt::Debug,
{
    let outcomes = run_parallel(input, lane_count)?;
    Ok(assemble(outcomes))
}

/// Partition `input` one lane at a time on the calling thread
///
/// # Example
///
/// ```
/// use lanesplit::compute_sequential;
///
/// let mut data = vec![1, 2, 2, 3];
/// let out = compute_sequential(&mut data, 2).unwrap();
/// assert_eq!(out.len(), 3);
/// ```
pub fn compute_sequential<T>(input: &mut [T], lane_count: usize) -> Result<Vec<T>, LaneError>
where
    T: Ord + Copy + fmt::Debug,
{
    let outcomes = run_sequential(input, lane_count)?;
    Ok(assemble(outcomes))
}

/// Partition `input` using the lane count and strategy from `config`
pub fn partition<T>(input: &mut [T], config: &PartitionConfig) -> Result<Vec<T>, LaneError>
where
    T: Ord + Copy + Send + fmt::Debug,
{
    match config.strategy {
        Strategy::Parallel => compute_parallel(input, config.lane_count),
        Strategy::Sequential => compute_sequential(input, config.lane_count),
    }
}

/// Like [`partition`], returning per-lane diagnostics alongside the output
pub fn partition_with_report<T>(
    input: &mut [T],
    config: &PartitionConfig,
) -> Result<PartitionReport<T>, LaneError>
where
    T: Ord + Copy + Send + fmt::Debug,
{
    let outcomes = match config.strategy {
        Strategy::Parallel => run_parallel(input, config.lane_count)?,
        Strategy::Sequential => run_sequential(input, config.lane_count)?,
    };
    Ok(PartitionReport::from_outcomes(config.strategy, outcomes))
}

fn run_parallel<T>(input: &mut [T], lane_count: usize) -> Result<Vec<LaneOutcome<T>>, LaneError>
where
    T: Ord + Copy + Send + fmt::Debug,
{
    let layout = LaneLayout::new(input.len(), lane_count)?;
    let slots = &BoundarySlots::new(layout.lane_count());
    let chunks = LaneArena::new(input, &layout)?.split();

    let joined: Vec<Result<LaneOutcome<T>, LaneError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| {
                let lane = chunk.lane();
                let neighbors = layout.neighbors(lane);
                (lane, scope.spawn(move || run_lane(chunk, neighbors, slots)))
            })
            .collect();

        // Join every lane before inspecting results so no handle is left behind.
        handles
            .into_iter()
            .map(|(lane, handle)| handle.join().map_err(|_| LaneError::LanePanicked { lane }))
            .collect()
    });

    joined.into_iter().collect()
}

fn run_sequential<T>(input: &mut [T], lane_count: usize) -> Result<Vec<LaneOutcome<T>>, LaneError>
where
    T: Ord + Copy + fmt::Debug,
{
    let layout = LaneLayout::new(input.len(), lane_count)?;
    let mut chunks = LaneArena::new(input, &layout)?.split();

    let medians: Vec<T> = chunks.iter_mut().map(select_chunk_median).collect();

    let outcomes = chunks
        .iter()
        .map(|chunk| {
            let lane = chunk.lane();
            let bounds = LaneBounds::from_medians(lane, &medians);
            let kept = filter_chunk(chunk, &bounds);
            log::trace!(
                "lane {}: median {:?}, kept {}/{}",
                lane,
                medians[lane],
                kept.len(),
                chunk.len()
            );
            LaneOutcome {
                range: chunk.range(),
                median: medians[lane],
                bounds,
                kept,
            }
        })
        .collect();

    Ok(outcomes)
}

/// Concatenate lane results in lane order
fn assemble<T>(outcomes: Vec<LaneOutcome<T>>) -> Vec<T> {
    let total = outcomes.iter().map(|o| o.kept.len()).sum();
    let mut output = Vec::with_capacity(total);
    for outcome in outcomes {
        output.extend(outcome.kept);
    }
    log::debug!("assembled {} elements", output.len());
    output
}
