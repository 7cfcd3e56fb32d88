//! The [`aggregate`] entry point and its output type.

use cpubench_core::{
    BenchmarkResult, Category, MULTI_CORE_TESTS, SINGLE_CORE_TESTS,
};
use serde::{Deserialize, Serialize};

use crate::{ScoreError, ScoringConfig};

/// Final scores for a completed run.
///
/// Field names are a compatibility surface for downstream history and
/// display consumers; they serialize in camelCase and must not be renamed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    /// Sum of single-core per-test scores.
    pub single_core_score: f64,
    /// Sum of multi-core per-test scores.
    pub multi_core_score: f64,
    /// Weighted combination of the two category scores.
    pub final_weighted_score: f64,
    /// Final score rescaled onto the reporting scale.
    pub normalized_score: f64,
    /// Qualitative tier label for the normalized score.
    pub rating: String,
    /// Every result of the run, in execution order.
    pub per_test_results: Vec<BenchmarkResult>,
}

impl ScoreSummary {
    /// Multi-core over single-core score, the parallel speedup proxy
    /// shown in reports. Zero when the single-core score is zero.
    pub fn core_ratio(&self) -> f64 {
        if self.single_core_score > 0.0 {
            self.multi_core_score / self.single_core_score
        } else {
            0.0
        }
    }
}

/// Folds a full result set into a [`ScoreSummary`].
///
/// Pure: no I/O, input is cloned into the summary untouched, and the same
/// input always produces the same output. A result with `is_valid = false`
/// keeps its slot in `per_test_results` but contributes zero to its
/// category score.
///
/// # Errors
///
/// [`ScoreError::BadPartition`] when the input does not split into exactly
/// 10 single-core and 10 multi-core results. The orchestrator always hands
/// over a full suite, so hitting this means a caller bug.
pub fn aggregate(
    results: &[BenchmarkResult],
    config: &ScoringConfig,
) -> Result<ScoreSummary, ScoreError> {
    let single = results
        .iter()
        .filter(|r| Category::of(&r.name) == Category::Single)
        .count();
    let multi = results.len() - single;
    if single != SINGLE_CORE_TESTS || multi != MULTI_CORE_TESTS {
        return Err(ScoreError::BadPartition {
            expected_single: SINGLE_CORE_TESTS,
            expected_multi: MULTI_CORE_TESTS,
            single,
            multi,
        });
    }

    let mut single_core_score = 0.0;
    let mut multi_core_score = 0.0;
    for result in results {
        let score = per_test_score(result, config);
        if score <= 0.0 {
            continue;
        }
        match Category::of(&result.name) {
            Category::Single => single_core_score += score,
            Category::Multi => multi_core_score += score,
        }
    }

    let final_weighted_score = single_core_score * config.single_core_weight
        + multi_core_score * config.multi_core_weight;
    let normalized_score = final_weighted_score * config.normalization_factor;
    let rating = config.rating.evaluate(normalized_score).to_string();

    Ok(ScoreSummary {
        single_core_score,
        multi_core_score,
        final_weighted_score,
        normalized_score,
        rating,
        per_test_results: results.to_vec(),
    })
}

/// Points contributed by one result: scaled throughput, zeroed when the
/// kernel's self-check failed.
pub fn per_test_score(result: &BenchmarkResult, config: &ScoringConfig) -> f64 {
    if !result.is_valid {
        return 0.0;
    }
    result.ops_per_second * config.scale_for(&result.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpubench_core::SUITE;
    use serde_json::json;
    use std::time::Duration;

    fn result(name: &str, ops: f64, valid: bool) -> BenchmarkResult {
        BenchmarkResult::new(name, Duration::from_millis(10), ops, valid, json!({}))
    }

    fn full_suite(single_ops: f64, multi_ops: f64) -> Vec<BenchmarkResult> {
        SUITE
            .iter()
            .map(|entry| {
                let ops = match Category::of(entry.name) {
                    Category::Single => single_ops,
                    Category::Multi => multi_ops,
                };
                result(entry.name, ops, true)
            })
            .collect()
    }

    #[test]
    fn all_zero_throughput_scores_zero_with_lowest_tier() {
        let config = ScoringConfig::default();
        let summary = aggregate(&full_suite(0.0, 0.0), &config).unwrap();
        assert_eq!(summary.final_weighted_score, 0.0);
        assert_eq!(summary.normalized_score, 0.0);
        assert_eq!(summary.rating, config.rating.lowest_label());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let config = ScoringConfig::default();
        let results = full_suite(1_000_000.0, 5_000_000.0);
        let a = aggregate(&results, &config).unwrap();
        let b = aggregate(&results, &config).unwrap();
        assert_eq!(a.single_core_score, b.single_core_score);
        assert_eq!(a.multi_core_score, b.multi_core_score);
        assert_eq!(a.final_weighted_score, b.final_weighted_score);
        assert_eq!(a.normalized_score, b.normalized_score);
        assert_eq!(a.rating, b.rating);
    }

    #[test]
    fn uniform_1000_vs_2000_suite_yields_distinct_positive_categories() {
        let config = ScoringConfig::default();
        let summary = aggregate(&full_suite(1000.0, 2000.0), &config).unwrap();
        assert!(summary.single_core_score > 0.0);
        assert!(summary.multi_core_score > 0.0);
        assert_ne!(summary.single_core_score, summary.multi_core_score);
        // Exactly one tier label, never a concatenation.
        let tiers = config
            .rating
            .tiers
            .iter()
            .filter(|t| summary.rating.contains(&t.label))
            .count();
        assert!(tiers <= 1);
    }

    #[test]
    fn invalid_results_keep_their_slot_but_score_zero() {
        let config = ScoringConfig::default();
        let mut results = full_suite(1000.0, 2000.0);
        let valid = aggregate(&results, &config).unwrap();
        results[0].is_valid = false;
        let degraded = aggregate(&results, &config).unwrap();
        assert_eq!(degraded.per_test_results.len(), results.len());
        assert!(degraded.single_core_score < valid.single_core_score);
        assert_eq!(degraded.multi_core_score, valid.multi_core_score);
    }

    #[test]
    fn wrong_partition_is_rejected() {
        let config = ScoringConfig::default();
        let results = vec![result("Single-Core Prime Generation", 1000.0, true)];
        let err = aggregate(&results, &config).unwrap_err();
        assert!(matches!(err, ScoreError::BadPartition { single: 1, multi: 0, .. }));
    }

    #[test]
    fn summary_serializes_with_camel_case_fields() {
        let config = ScoringConfig::default();
        let summary = aggregate(&full_suite(1000.0, 2000.0), &config).unwrap();
        let value = serde_json::to_value(&summary).unwrap();
        for field in [
            "singleCoreScore",
            "multiCoreScore",
            "finalWeightedScore",
            "normalizedScore",
            "rating",
            "perTestResults",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        let per_test = value["perTestResults"].as_array().unwrap();
        assert_eq!(per_test.len(), 20);
        assert!(per_test[0].get("opsPerSecond").is_some());
        assert!(per_test[0].get("isValid").is_some());
    }
}
