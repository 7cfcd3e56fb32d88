//! JSON output.

use crate::report::RunReport;

/// Serialize a run report as pretty-printed JSON.
///
/// The field names (`singleCoreScore`, `perTestResults`, ...) are the
/// hand-off contract with history/display consumers; serde_json handles
/// quote and control-character escaping in embedded strings.
pub fn generate_json_report(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::build_report_meta;
    use cpubench_core::{BenchmarkResult, Category, DeviceTier, SUITE};
    use cpubench_score::{aggregate, ScoringConfig};
    use serde_json::json;
    use std::time::Duration;

    fn sample_report() -> RunReport {
        let results: Vec<BenchmarkResult> = SUITE
            .iter()
            .map(|entry| {
                let ops = match entry.category {
                    Category::Single => 1000.0,
                    Category::Multi => 4000.0,
                };
                BenchmarkResult::new(
                    entry.name,
                    Duration::from_millis(25),
                    ops,
                    true,
                    json!({"note": "quote \" and control \u{0007} chars"}),
                )
            })
            .collect();
        RunReport {
            meta: build_report_meta(),
            tier: DeviceTier::Mid,
            summary: aggregate(&results, &ScoringConfig::default()).unwrap(),
        }
    }

    #[test]
    fn report_exposes_contract_field_names() {
        let text = generate_json_report(&sample_report()).unwrap();
        for field in [
            "\"singleCoreScore\"",
            "\"multiCoreScore\"",
            "\"finalWeightedScore\"",
            "\"normalizedScore\"",
            "\"rating\"",
            "\"perTestResults\"",
            "\"executionTimeMs\"",
            "\"opsPerSecond\"",
            "\"isValid\"",
            "\"metrics\"",
        ] {
            assert!(text.contains(field), "missing {field}");
        }
    }

    #[test]
    fn embedded_strings_are_escaped() {
        let text = generate_json_report(&sample_report()).unwrap();
        // Quotes escape as \" and control characters as \uXXXX.
        assert!(text.contains(r#"quote \" and control \u0007 chars"#));
        // The payload stays machine-readable end to end.
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["summary"]["perTestResults"].as_array().unwrap().len(), 20);
    }
}
