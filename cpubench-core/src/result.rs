//! Benchmark Result Model

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output of one kernel invocation.
///
/// Immutable once created. Field names in the serialized form are a
/// compatibility surface for downstream history/display consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// Benchmark identifier, unique within a run.
    pub name: String,
    /// Wall-clock duration in milliseconds, >= 0.
    pub execution_time_ms: f64,
    /// Throughput; 0.0 is the "could not measure" sentinel.
    pub ops_per_second: f64,
    /// Whether the kernel's self-check passed.
    pub is_valid: bool,
    /// Kernel-specific auxiliary data, passed through unparsed.
    pub metrics: serde_json::Value,
}

impl BenchmarkResult {
    /// Build a result from a measured kernel run.
    pub fn new(
        name: impl Into<String>,
        elapsed: Duration,
        ops_per_second: f64,
        is_valid: bool,
        metrics: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            execution_time_ms: elapsed.as_secs_f64() * 1000.0,
            ops_per_second,
            is_valid,
            metrics,
        }
    }

    /// Zero-valued invalid result substituted when a kernel fails.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            execution_time_ms: 0.0,
            ops_per_second: 0.0,
            is_valid: false,
            metrics: serde_json::Value::Object(Default::default()),
        }
    }
}
