//! Report data structures.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use cpubench_core::DeviceTier;
use cpubench_score::ScoreSummary;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Complete record of one benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Generation metadata and system description.
    pub meta: ReportMeta,
    /// Workload tier the run was sized for.
    pub tier: DeviceTier,
    /// Scores and per-test results.
    pub summary: ScoreSummary,
}

/// Report generation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// cpubench version that produced the report.
    pub version: String,
    /// UTC time of report generation.
    pub timestamp: DateTime<Utc>,
    /// Host system description.
    pub system: SystemInfo,
}

/// Host system description. Linux-specific fields degrade to
/// "Unknown" / 0 on other platforms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name.
    pub os: String,
    /// Target architecture.
    pub arch: String,
    /// CPU model name.
    pub cpu: String,
    /// Logical core count.
    pub cpu_cores: u32,
    /// Total system memory in GB.
    pub memory_gb: f64,
}

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Terminal summary.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
}

/// Unrecognized output format name.
#[derive(Debug, Error)]
#[error("unknown output format '{0}', expected 'human' or 'json'")]
pub struct ParseFormatError(String);

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(ParseFormatError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses_known_names() {
        assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
