//! The run orchestrator: sequences the suite, isolates kernel panics,
//! publishes state and events.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::RwLock;

use cpubench_core::{BenchmarkResult, SuiteEntry, WorkloadParams, SUITE};
use cpubench_score::{aggregate, ScoreError, ScoreSummary, ScoringConfig};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::events::{BenchmarkEvent, EventBus};
use crate::state::{RunProgress, RunState};

/// Errors surfaced by [`Orchestrator::run_suite`].
#[derive(Debug, Error)]
pub enum RunError {
    /// A run is already in flight (or has already finished) on this instance.
    #[error("a benchmark run is already in progress on this orchestrator")]
    AlreadyRunning,
    /// Aggregating the finished result set failed.
    #[error("score aggregation failed: {0}")]
    Aggregation(#[from] ScoreError),
}

/// Drives one benchmark run to completion.
///
/// An instance is single-shot: `run_suite` executes every suite entry in
/// order exactly once, then the instance stays in its terminal state.
/// Hosts that want another run create a fresh orchestrator. State is
/// observed by polling [`state`](Orchestrator::state); per-test
/// completions stream through [`subscribe_events`](Orchestrator::subscribe_events).
pub struct Orchestrator {
    suite: &'static [SuiteEntry],
    params: WorkloadParams,
    config: ScoringConfig,
    state: RwLock<RunState>,
    started: AtomicBool,
    events: EventBus,
}

impl Orchestrator {
    /// Orchestrator over the standard 20-entry suite.
    pub fn new(params: WorkloadParams, config: ScoringConfig) -> Orchestrator {
        Orchestrator::with_suite(&SUITE, params, config)
    }

    /// Orchestrator over a caller-supplied suite. Used by tests; the scoring
    /// contract still expects the standard 10/10 category split.
    pub fn with_suite(
        suite: &'static [SuiteEntry],
        params: WorkloadParams,
        config: ScoringConfig,
    ) -> Orchestrator {
        Orchestrator {
            suite,
            params,
            config,
            state: RwLock::new(RunState::Idle),
            started: AtomicBool::new(false),
            events: EventBus::new(),
        }
    }

    /// Snapshot of the current run state.
    pub fn state(&self) -> RunState {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Register a listener for per-test completion events.
    pub fn subscribe_events(&self) -> Receiver<BenchmarkEvent> {
        self.events.subscribe()
    }

    /// Total number of suite entries this instance will run.
    pub fn total_tests(&self) -> usize {
        self.suite.len()
    }

    /// Quick throwaway pass over two tiny kernels before measuring, to
    /// spin up the thread pool and settle CPU clocks. Produces no results,
    /// events or state changes.
    pub fn warmup(&self) {
        debug!("warmup pass");
        let params = WorkloadParams::minimal();
        let _ = catch_unwind(AssertUnwindSafe(|| {
            cpubench_core::kernels::single::prime_generation(&params);
            cpubench_core::kernels::multi::matrix_multiplication(&params);
        }));
    }

    /// Execute every suite entry in order and aggregate the results.
    ///
    /// A kernel panic is contained to its entry: the run logs it,
    /// substitutes a zeroed invalid result and moves on. The run as a
    /// whole fails only if aggregation rejects the result set, in which
    /// case the state becomes `Failed` and no summary is produced.
    ///
    /// Calling this while a run is in flight, or again after it finished,
    /// returns [`RunError::AlreadyRunning`] without touching the
    /// in-flight run's state or events.
    pub fn run_suite(&self) -> Result<ScoreSummary, RunError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(RunError::AlreadyRunning);
        }

        let total = self.suite.len();
        let mut results: Vec<BenchmarkResult> = Vec::with_capacity(total);

        for (i, entry) in self.suite.iter().enumerate() {
            self.set_state(RunState::Running(RunProgress {
                current_benchmark_name: entry.name.to_string(),
                completed_count: i,
                total_count: total,
            }));
            debug!(benchmark = entry.name, position = i + 1, total, "starting");

            let outcome = catch_unwind(AssertUnwindSafe(|| (entry.runner_fn)(&self.params)));
            let result = match outcome {
                Ok(result) => result,
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    warn!(
                        benchmark = entry.name,
                        message = %message,
                        "kernel panicked, recording fallback result"
                    );
                    BenchmarkResult::fallback(entry.name)
                }
            };

            results.push(result);
            // The event carries the result just pushed; results[i] is the
            // entry's slot from here on.
            self.events
                .publish(&BenchmarkEvent::completed(entry, &results[i]));
            self.set_state(RunState::Running(RunProgress {
                current_benchmark_name: entry.name.to_string(),
                completed_count: i + 1,
                total_count: total,
            }));
        }

        match aggregate(&results, &self.config) {
            Ok(summary) => {
                info!(
                    normalized_score = summary.normalized_score,
                    rating = %summary.rating,
                    "run completed"
                );
                self.set_state(RunState::Completed(summary.clone()));
                Ok(summary)
            }
            Err(err) => {
                self.set_state(RunState::Failed(err.to_string()));
                Err(err.into())
            }
        }
    }

    fn set_state(&self, next: RunState) {
        let mut guard = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = next;
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use cpubench_core::Category;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::events::EventPhase;

    // SuiteEntry kernels are plain fn pointers, so each test kernel is its
    // own fn item carrying its display name.
    macro_rules! test_kernels {
        ($($kernel:ident => $name:expr,)*) => {
            $(
                fn $kernel(_params: &WorkloadParams) -> BenchmarkResult {
                    BenchmarkResult::new(
                        $name,
                        Duration::from_millis(1),
                        1000.0,
                        true,
                        json!({}),
                    )
                }
            )*
        };
    }

    test_kernels! {
        s0 => "Single-Core A", s1 => "Single-Core B", s2 => "Single-Core C",
        s3 => "Single-Core D", s4 => "Single-Core E", s5 => "Single-Core F",
        s6 => "Single-Core G", s7 => "Single-Core H", s8 => "Single-Core I",
        s9 => "Single-Core J",
        m0 => "Multi-Core A", m1 => "Multi-Core B", m2 => "Multi-Core C",
        m3 => "Multi-Core D", m4 => "Multi-Core E", m5 => "Multi-Core F",
        m6 => "Multi-Core G", m7 => "Multi-Core H", m8 => "Multi-Core I",
        m9 => "Multi-Core J",
    }

    const NAMES: [&str; 20] = [
        "Single-Core A", "Single-Core B", "Single-Core C", "Single-Core D",
        "Single-Core E", "Single-Core F", "Single-Core G", "Single-Core H",
        "Single-Core I", "Single-Core J",
        "Multi-Core A", "Multi-Core B", "Multi-Core C", "Multi-Core D",
        "Multi-Core E", "Multi-Core F", "Multi-Core G", "Multi-Core H",
        "Multi-Core I", "Multi-Core J",
    ];
    const KERNELS: [cpubench_core::Kernel; 20] = [
        s0, s1, s2, s3, s4, s5, s6, s7, s8, s9,
        m0, m1, m2, m3, m4, m5, m6, m7, m8, m9,
    ];

    fn panicking(_params: &WorkloadParams) -> BenchmarkResult {
        panic!("kernel blew up");
    }

    fn sleepy(_params: &WorkloadParams) -> BenchmarkResult {
        std::thread::sleep(Duration::from_millis(200));
        BenchmarkResult::new(
            "Single-Core A",
            Duration::from_millis(200),
            1.0,
            true,
            json!({}),
        )
    }

    fn entry(name: &'static str, runner_fn: cpubench_core::Kernel) -> SuiteEntry {
        SuiteEntry {
            name,
            category: Category::of(name),
            runner_fn,
        }
    }

    fn test_suite(panic_at: Option<usize>) -> Vec<SuiteEntry> {
        NAMES
            .iter()
            .zip(KERNELS.iter())
            .enumerate()
            .map(|(i, (&name, &kernel))| {
                let runner = if Some(i) == panic_at { panicking } else { kernel };
                entry(name, runner)
            })
            .collect()
    }

    fn leak(suite: Vec<SuiteEntry>) -> &'static [SuiteEntry] {
        Box::leak(suite.into_boxed_slice())
    }

    fn orchestrator(suite: &'static [SuiteEntry]) -> Orchestrator {
        Orchestrator::with_suite(suite, WorkloadParams::minimal(), ScoringConfig::default())
    }

    #[test]
    fn healthy_run_emits_one_event_per_entry() {
        let orch = orchestrator(leak(test_suite(None)));
        let rx = orch.subscribe_events();
        let summary = orch.run_suite().unwrap();
        let events: Vec<BenchmarkEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 20);
        assert!(events.iter().all(|e| e.phase == EventPhase::Completed));
        assert_eq!(summary.per_test_results.len(), 20);
        assert!(matches!(orch.state(), RunState::Completed(_)));
    }

    #[test]
    fn events_preserve_suite_order() {
        let orch = orchestrator(leak(test_suite(None)));
        let rx = orch.subscribe_events();
        orch.run_suite().unwrap();
        let observed: Vec<String> = rx.try_iter().map(|e| e.test_name).collect();
        assert_eq!(observed, NAMES.to_vec());
    }

    #[test]
    fn panicking_kernel_yields_fallback_at_its_position() {
        let orch = orchestrator(leak(test_suite(Some(3))));
        let rx = orch.subscribe_events();
        let summary = orch.run_suite().unwrap();

        let fallback = &summary.per_test_results[3];
        assert_eq!(fallback.name, NAMES[3]);
        assert_eq!(fallback.execution_time_ms, 0.0);
        assert_eq!(fallback.ops_per_second, 0.0);
        assert!(!fallback.is_valid);

        // Later entries still ran; the event count is unaffected.
        assert!(summary.per_test_results[4..].iter().all(|r| r.is_valid));
        let events: Vec<BenchmarkEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 20);
        assert_eq!(events[3].score, 0.0);
    }

    #[test]
    fn all_panicking_suite_still_completes_with_zero_scores() {
        let suite: Vec<SuiteEntry> = NAMES
            .iter()
            .map(|&name| entry(name, panicking))
            .collect();
        let orch = orchestrator(leak(suite));
        let summary = orch.run_suite().unwrap();
        assert_eq!(summary.final_weighted_score, 0.0);
        assert_eq!(
            summary.rating,
            ScoringConfig::default().rating.lowest_label()
        );
    }

    #[test]
    fn reentrant_run_is_rejected_without_duplicating_events() {
        let mut suite = test_suite(None);
        suite[0].runner_fn = sleepy;
        let orch = Arc::new(orchestrator(leak(suite)));
        let rx = orch.subscribe_events();

        let bg = {
            let orch = Arc::clone(&orch);
            std::thread::spawn(move || orch.run_suite())
        };
        // Let the first run get into the sleeping kernel.
        std::thread::sleep(Duration::from_millis(50));
        assert!(matches!(orch.run_suite(), Err(RunError::AlreadyRunning)));

        let first = bg.join().expect("runner thread panicked");
        assert!(first.is_ok());
        let events: Vec<BenchmarkEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 20);
    }

    #[test]
    fn finished_orchestrator_rejects_another_run() {
        let orch = orchestrator(leak(test_suite(None)));
        orch.run_suite().unwrap();
        assert!(matches!(orch.run_suite(), Err(RunError::AlreadyRunning)));
        // The terminal state is untouched by the rejected call.
        assert!(matches!(orch.state(), RunState::Completed(_)));
    }

    #[test]
    fn sampled_progress_counts_are_monotone() {
        let orch = Arc::new(orchestrator(leak(test_suite(None))));
        let sampler = {
            let orch = Arc::clone(&orch);
            std::thread::spawn(move || {
                let mut counts: Vec<usize> = Vec::new();
                while !orch.state().is_terminal() {
                    if let RunState::Running(progress) = orch.state() {
                        assert!(progress.completed_count <= progress.total_count);
                        if counts.last() != Some(&progress.completed_count) {
                            counts.push(progress.completed_count);
                        }
                    }
                    std::thread::yield_now();
                }
                counts
            })
        };
        let runner = {
            let orch = Arc::clone(&orch);
            std::thread::spawn(move || orch.run_suite())
        };
        runner.join().expect("runner panicked").unwrap();
        let counts = sampler.join().expect("sampler panicked");
        // A poller may miss updates but must never observe a decrease.
        assert!(counts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn bad_suite_shape_surfaces_as_failed_state() {
        // A 1/0 split violates the aggregation contract.
        let suite = vec![entry("Single-Core A", s0)];
        let orch = orchestrator(leak(suite));
        let err = orch.run_suite().unwrap_err();
        assert!(matches!(err, RunError::Aggregation(_)));
        match orch.state() {
            RunState::Failed(message) => assert!(message.contains("partition")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn full_suite_run_on_minimal_params_produces_real_scores() {
        let orch = Orchestrator::new(WorkloadParams::minimal(), ScoringConfig::default());
        let summary = orch.run_suite().unwrap();
        assert_eq!(summary.per_test_results.len(), 20);
        assert!(summary.single_core_score > 0.0);
        assert!(summary.multi_core_score > 0.0);
        assert!(!summary.rating.is_empty());
    }
}
