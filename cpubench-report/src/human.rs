//! Terminal output formatting.

use cpubench_core::Category;

use crate::report::RunReport;

/// Format a run report for terminal display.
pub fn format_human_output(report: &RunReport) -> String {
    let mut output = String::new();
    let summary = &report.summary;

    output.push('\n');
    output.push_str("CPUBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    output.push_str(&format!(
        "System: {} ({} cores, {:.1} GB RAM)\n",
        report.meta.system.cpu, report.meta.system.cpu_cores, report.meta.system.memory_gb
    ));
    output.push_str(&format!(
        "OS: {} / {}   Tier: {:?}   Generated: {}\n\n",
        report.meta.system.os,
        report.meta.system.arch,
        report.tier,
        report.meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for category in [Category::Single, Category::Multi] {
        let heading = match category {
            Category::Single => "Single-Core Benchmarks",
            Category::Multi => "Multi-Core Benchmarks",
        };
        output.push_str(&format!("{}\n", heading));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for result in summary
            .per_test_results
            .iter()
            .filter(|r| Category::of(&r.name) == category)
        {
            let icon = if result.is_valid { "✓" } else { "✗" };
            output.push_str(&format!(
                "  {} {:<38} {:>12.2} ops/s  {:>8.1} ms\n",
                icon, result.name, result.ops_per_second, result.execution_time_ms
            ));
        }
        output.push('\n');
    }

    output.push_str("Scores\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Single-Core Score:     {:>10.2}\n",
        summary.single_core_score
    ));
    output.push_str(&format!(
        "  Multi-Core Score:      {:>10.2}\n",
        summary.multi_core_score
    ));
    output.push_str(&format!(
        "  Core Ratio (M/S):      {:>10.2}\n",
        summary.core_ratio()
    ));
    output.push_str(&format!(
        "  Weighted Score:        {:>10.2}\n",
        summary.final_weighted_score
    ));
    output.push_str(&format!(
        "  Normalized Score:      {:>10.2}\n",
        summary.normalized_score
    ));
    output.push_str(&format!("  Rating: {}\n", summary.rating));

    output
}
