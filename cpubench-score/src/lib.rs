#![warn(missing_docs)]
//! CPUBench Score - Aggregation and Rating
//!
//! Pure score math over a finished result set: per-test scores from
//! throughput and per-benchmark scale factors, category sums, the
//! weighted final score, normalization, and the qualitative rating tier.
//! No I/O happens here; the orchestrator in `cpubench-runner` calls
//! [`aggregate`] once per run.

mod rating;
mod scoring;
mod summary;

pub use rating::{RatingTable, RatingTier};
pub use scoring::ScoringConfig;
pub use summary::{aggregate, ScoreSummary};

use thiserror::Error;

/// Errors from score aggregation.
///
/// The only failure mode is a malformed input set. That indicates a bug in
/// the caller, not a runtime condition, so it surfaces loudly instead of
/// being absorbed into a default score.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The result set did not partition into the expected category sizes.
    #[error(
        "result set does not partition into {expected_single} single-core + \
         {expected_multi} multi-core entries (got {single}/{multi})"
    )]
    BadPartition {
        /// Expected single-core result count.
        expected_single: usize,
        /// Expected multi-core result count.
        expected_multi: usize,
        /// Single-core results actually present.
        single: usize,
        /// Multi-core results actually present.
        multi: usize,
    },
}
