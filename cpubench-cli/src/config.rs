//! Configuration loading from cpubench.toml
//!
//! Configuration lives in a `cpubench.toml` discovered by walking up from
//! the current directory. CLI flags override file values.

use cpubench_score::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// cpubench configuration file contents.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchConfig {
    /// Run setup: tier and warmup.
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Scoring constants: weights, normalization, rating tiers.
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Output defaults.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Run setup section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Device tier sizing the workloads: "slow", "mid" or "flagship".
    #[serde(default = "default_tier")]
    pub tier: String,
    /// Whether to run the warmup pass before measuring.
    #[serde(default = "default_warmup")]
    pub warmup: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tier: default_tier(),
            warmup: default_warmup(),
        }
    }
}

fn default_tier() -> String {
    "mid".to_string()
}
fn default_warmup() -> bool {
    true
}

/// Output defaults section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human" or "json".
    #[serde(default = "default_format")]
    pub format: String,
    /// Write the report here instead of stdout.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl BenchConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the
    /// current directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("cpubench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}
