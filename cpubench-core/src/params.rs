//! Workload Sizing
//!
//! Kernel workloads scale with a device tier so a run finishes in a
//! comparable wall-clock window on slow and fast hardware alike.

use serde::{Deserialize, Serialize};

/// Rough performance class of the machine under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceTier {
    /// Low-end hardware, reduced workloads.
    Slow,
    /// Mid-range hardware (default).
    #[default]
    Mid,
    /// High-end hardware, full workloads.
    Flagship,
}

impl std::str::FromStr for DeviceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slow" => Ok(DeviceTier::Slow),
            "mid" => Ok(DeviceTier::Mid),
            "flagship" => Ok(DeviceTier::Flagship),
            other => Err(format!("Unknown device tier: {}", other)),
        }
    }
}

/// Per-kernel workload sizes for one device tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadParams {
    /// Upper bound for the prime sieve.
    pub prime_range: usize,
    /// Inclusive range of n for Fibonacci kernels.
    pub fibonacci_n_range: (u32, u32),
    /// Square matrix dimension.
    pub matrix_size: usize,
    /// Input size for the hashing kernel, in MiB.
    pub hash_data_size_mb: usize,
    /// Number of random strings to sort.
    pub string_count: usize,
    /// Output resolution (width, height) for the ray tracer.
    pub ray_tracing_resolution: (u32, u32),
    /// Maximum reflection bounce depth.
    pub ray_tracing_depth: u32,
    /// Input size for the compression kernel, in MiB.
    pub compression_data_size_mb: usize,
    /// Sample count for Monte-Carlo π.
    pub monte_carlo_samples: usize,
    /// Generated JSON document size, in MiB.
    pub json_data_size_mb: usize,
    /// Board size for N-Queens.
    pub nqueens_size: u32,
}

impl WorkloadParams {
    /// Workload table for a device tier.
    pub fn for_tier(tier: DeviceTier) -> WorkloadParams {
        match tier {
            DeviceTier::Slow => WorkloadParams {
                prime_range: 1_000_000,
                fibonacci_n_range: (30, 38),
                matrix_size: 500,
                hash_data_size_mb: 25,
                string_count: 250_000,
                ray_tracing_resolution: (256, 256),
                ray_tracing_depth: 2,
                compression_data_size_mb: 25,
                monte_carlo_samples: 25_000_000,
                json_data_size_mb: 2,
                nqueens_size: 12,
            },
            DeviceTier::Mid => WorkloadParams {
                prime_range: 6_000_000,
                fibonacci_n_range: (32, 38),
                matrix_size: 600,
                hash_data_size_mb: 40,
                string_count: 500_000,
                ray_tracing_resolution: (300, 300),
                ray_tracing_depth: 3,
                compression_data_size_mb: 25,
                monte_carlo_samples: 40_000_000,
                json_data_size_mb: 4,
                nqueens_size: 13,
            },
            DeviceTier::Flagship => WorkloadParams {
                prime_range: 12_000_000,
                fibonacci_n_range: (38, 45),
                matrix_size: 1000,
                hash_data_size_mb: 100,
                string_count: 1_250_000,
                ray_tracing_resolution: (500, 500),
                ray_tracing_depth: 5,
                compression_data_size_mb: 60,
                monte_carlo_samples: 120_000_000,
                json_data_size_mb: 10,
                nqueens_size: 15,
            },
        }
    }

    /// Tiny workloads for fast test runs. Not a tier a user can select.
    pub fn minimal() -> WorkloadParams {
        WorkloadParams {
            prime_range: 10_000,
            fibonacci_n_range: (10, 14),
            matrix_size: 32,
            hash_data_size_mb: 1,
            string_count: 1_000,
            ray_tracing_resolution: (16, 16),
            ray_tracing_depth: 2,
            compression_data_size_mb: 1,
            monte_carlo_samples: 100_000,
            json_data_size_mb: 1,
            nqueens_size: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parses_case_insensitively() {
        assert_eq!("Slow".parse::<DeviceTier>().unwrap(), DeviceTier::Slow);
        assert_eq!("MID".parse::<DeviceTier>().unwrap(), DeviceTier::Mid);
        assert_eq!(
            "flagship".parse::<DeviceTier>().unwrap(),
            DeviceTier::Flagship
        );
        assert!("ultra".parse::<DeviceTier>().is_err());
    }

    #[test]
    fn flagship_workloads_dominate_slow() {
        let slow = WorkloadParams::for_tier(DeviceTier::Slow);
        let flag = WorkloadParams::for_tier(DeviceTier::Flagship);
        assert!(flag.prime_range > slow.prime_range);
        assert!(flag.matrix_size > slow.matrix_size);
        assert!(flag.monte_carlo_samples > slow.monte_carlo_samples);
        assert!(flag.nqueens_size > slow.nqueens_size);
    }
}
