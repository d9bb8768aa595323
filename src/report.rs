//! Per-lane diagnostics for a partition run
//!
//! A [`PartitionReport`] carries the assembled output together with what each
//! lane selected, which filter it applied and how many elements it dropped.
//! Drops are expected: the boundary filters are strict, so values equal to a
//! neighbor's median never reach the output.
//!
//! # Example
//!
//! ```
//! use lanesplit::{partition_with_report, PartitionConfig};
//!
//! let mut data = vec![1, 2, 2, 3];
//! let report = partition_with_report(&mut data, &PartitionConfig::with_lanes(2)).unwrap();
//!
//! assert_eq!(report.summary().dropped, 1);
//! assert!(!report.is_lossless());
//! println!("{}", report);
//! ```

use std::fmt;

use crate::coordinator::Strategy;
use crate::lane::{LaneBounds, LaneOutcome};
use crate::lanes::LaneRange;

/// What a single lane did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneSummary<T> {
    /// Lane index
    pub lane: usize,
    /// Input range the lane owned
    pub range: LaneRange,
    /// Median the lane published
    pub median: T,
    /// Filter the lane applied
    pub bounds: LaneBounds<T>,
    /// Number of elements kept
    pub kept: usize,
    /// Number of elements dropped by the filter
    pub dropped: usize,
}

/// Totals over every lane
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Number of lanes
    pub lane_count: usize,
    /// Elements handed to the run
    pub input_len: usize,
    /// Elements in the assembled output
    pub output_len: usize,
    /// Elements dropped across all lanes
    pub dropped: usize,
}

/// Output of a partition run with per-lane diagnostics
#[derive(Debug, Clone)]
pub struct PartitionReport<T> {
    strategy: Strategy,
    output: Vec<T>,
    lanes: Vec<LaneSummary<T>>,
    summary: ReportSummary,
}

impl<T: Copy> PartitionReport<T> {
    /// Assemble lane outcomes, in lane order, into a report
    pub(crate) fn from_outcomes(strategy: Strategy, outcomes: Vec<LaneOutcome<T>>) -> Self {
        let mut summary = ReportSummary {
            lane_count: outcomes.len(),
            ..Default::default()
        };
        let mut lanes = Vec::with_capacity(outcomes.len());
        let mut output = Vec::with_capacity(outcomes.iter().map(|o| o.kept.len()).sum());

        for outcome in outcomes {
            summary.input_len += outcome.range.len();
            summary.dropped += outcome.dropped();
            lanes.push(LaneSummary {
                lane: outcome.lane(),
                range: outcome.range,
                median: outcome.median,
                bounds: outcome.bounds,
                kept: outcome.kept.len(),
                dropped: outcome.dropped(),
            });
            output.extend(outcome.kept);
        }
        summary.output_len = output.len();

        Self {
            strategy,
            output,
            lanes,
            summary,
        }
    }
}

impl<T> PartitionReport<T> {
    /// The assembled output
    pub fn output(&self) -> &[T] {
        &self.output
    }

    /// Consume the report, returning the assembled output
    pub fn into_output(self) -> Vec<T> {
        self.output
    }

    /// Per-lane diagnostics, in lane order
    pub fn lanes(&self) -> &[LaneSummary<T>] {
        &self.lanes
    }

    /// Totals over every lane
    pub fn summary(&self) -> &ReportSummary {
        &self.summary
    }

    /// Strategy the run used
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns true if no element was dropped
    pub fn is_lossless(&self) -> bool {
        self.summary.dropped == 0
    }
}

impl<T: fmt::Display> fmt::Display for PartitionReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Partition Report ({})", self.strategy)?;
        writeln!(f, "================")?;
        writeln!(f)?;

        writeln!(f, "Summary:")?;
        writeln!(f, "  Lanes:   {}", self.summary.lane_count)?;
        writeln!(f, "  Input:   {} elements", self.summary.input_len)?;
        writeln!(f, "  Output:  {} elements", self.summary.output_len)?;
        writeln!(f, "  Dropped: {} elements", self.summary.dropped)?;
        writeln!(f)?;

        writeln!(f, "Lanes:")?;
        writeln!(
            f,
            "{:<5} {:<14} {:<12} {:<24} {:<6} Dropped",
            "Lane", "Range", "Median", "Bounds", "Kept"
        )?;
        writeln!(f, "{:-<70}", "")?;

        for lane in &self.lanes {
            writeln!(
                f,
                "{:<5} {:<14} {:<12} {:<24} {:<6} {}",
                lane.lane,
                format!("{}..{}", lane.range.start, lane.range.end),
                lane.median.to_string(),
                lane.bounds.to_string(),
                lane.kept,
                lane.dropped
            )?;
        }

        Ok(())
    }
}
