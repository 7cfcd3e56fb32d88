//! Per-test scale factors and the weighting constants.

use serde::{Deserialize, Serialize};

use crate::rating::RatingTable;

/// Tunable scoring constants.
///
/// Per-test scale factors convert raw ops/sec into comparable point values:
/// multi-core factors are larger per unit where the workload's ops metric is
/// smaller, so each test lands near the same point range on a mid-range
/// machine. The defaults are the calibrated production table; overriding any
/// of them is configuration, not a code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the single-core category in the final score.
    pub single_core_weight: f64,
    /// Weight of the multi-core category in the final score.
    pub multi_core_weight: f64,
    /// Rescaling applied to the weighted score to get the reported score.
    pub normalization_factor: f64,
    /// Rating tiers, evaluated in order, first match wins.
    pub rating: RatingTable,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            single_core_weight: 0.35,
            multi_core_weight: 0.65,
            normalization_factor: 1.0,
            rating: RatingTable::default(),
        }
    }
}

impl ScoringConfig {
    /// Scale factor applied to a benchmark's ops/sec, keyed by display name.
    ///
    /// Unknown names fall back to a per-category default so a suite edit
    /// degrades to a rough score instead of dropping the test.
    pub fn scale_for(&self, name: &str) -> f64 {
        match name {
            "Single-Core Prime Generation" => 0.000_000_01,
            "Single-Core Fibonacci Recursive" => 0.000_12,
            "Single-Core Matrix Multiplication" => 0.000_000_025,
            "Single-Core Hash Computing" => 0.000_000_01,
            "Single-Core String Sorting" => 0.000_000_15,
            "Single-Core Ray Tracing" => 0.000_000_6,
            "Single-Core Compression" => 0.000_000_07,
            "Single-Core Monte Carlo π" => 0.000_000_7,
            "Single-Core JSON Parsing" => 0.000_000_4,
            "Single-Core N-Queens" => 0.000_7,

            "Multi-Core Prime Generation" => 0.000_000_2,
            "Multi-Core Fibonacci Memoized" => 0.002_4,
            "Multi-Core Matrix Multiplication" => 0.000_000_1,
            "Multi-Core Hash Computing" => 0.000_000_2,
            "Multi-Core String Sorting" => 0.000_000_3,
            "Multi-Core Ray Tracing" => 0.000_003,
            "Multi-Core Compression" => 0.000_000_035,
            "Multi-Core Monte Carlo π" => 0.000_003_5,
            "Multi-Core JSON Parsing" => 0.000_002,
            "Multi-Core N-Queens" => 0.000_035,

            other if other.contains(cpubench_core::MULTI_CORE_MARKER) => 0.000_05,
            _ => 0.000_1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_have_dedicated_factors() {
        let config = ScoringConfig::default();
        assert_eq!(config.scale_for("Single-Core N-Queens"), 0.000_7);
        assert_eq!(config.scale_for("Multi-Core N-Queens"), 0.000_035);
    }

    #[test]
    fn unknown_names_fall_back_per_category() {
        let config = ScoringConfig::default();
        assert_eq!(config.scale_for("Single-Core Mystery"), 0.000_1);
        assert_eq!(config.scale_for("Multi-Core Mystery"), 0.000_05);
    }

    #[test]
    fn default_weights_sum_to_one() {
        let config = ScoringConfig::default();
        assert!((config.single_core_weight + config.multi_core_weight - 1.0).abs() < 1e-12);
    }
}
