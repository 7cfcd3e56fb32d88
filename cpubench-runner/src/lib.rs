#![warn(missing_docs)]
//! CPUBench Runner - Orchestration and Events
//!
//! Drives the benchmark suite one entry at a time: per-kernel panic
//! isolation, live `RunState` snapshots for pollers, and a broadcast
//! stream of per-test completion events. A run ends in `Completed` with
//! a full [`cpubench_score::ScoreSummary`] or in `Failed` with a message;
//! there is no partial-result path.

mod events;
mod orchestrator;
mod state;

pub use events::{BenchmarkEvent, EventBus, EventPhase};
pub use orchestrator::{Orchestrator, RunError};
pub use state::{RunProgress, RunState};
