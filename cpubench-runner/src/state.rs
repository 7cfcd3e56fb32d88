//! Run state machine types.

use cpubench_score::ScoreSummary;
use serde::Serialize;

/// Progress snapshot published while a run is in flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunProgress {
    /// Name of the benchmark about to run, or just finished.
    pub current_benchmark_name: String,
    /// Suite entries completed so far.
    pub completed_count: usize,
    /// Total suite entries, fixed for the whole run.
    pub total_count: usize,
}

impl RunProgress {
    /// Completion percentage, truncated to whole percent.
    pub fn percent(&self) -> u32 {
        if self.total_count == 0 {
            return 0;
        }
        (self.completed_count * 100 / self.total_count) as u32
    }
}

/// Lifecycle of one orchestrator instance.
///
/// Transitions only move forward: `Idle -> Running -> Completed | Failed`.
/// `Running` is republished once per suite entry with an increased
/// completed count; that is a progress update, not a state change.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "camelCase")]
pub enum RunState {
    /// No run started yet.
    Idle,
    /// A run is in flight.
    Running(RunProgress),
    /// The run finished and produced scores.
    Completed(ScoreSummary),
    /// The run hit a fault outside per-test isolation.
    Failed(String),
}

impl RunState {
    /// True while a run is in flight.
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running(_))
    }

    /// True once the run has reached `Completed` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed(_) | RunState::Failed(_))
    }
}
