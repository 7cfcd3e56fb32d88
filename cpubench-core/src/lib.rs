#![warn(missing_docs)]
//! CPUBench Core - Suite Definition and Kernels
//!
//! This crate provides the building blocks of a benchmark run:
//! - `BenchmarkResult`, the value type every kernel produces
//! - `WorkloadParams` / `DeviceTier`, the workload sizing knobs
//! - The fixed, ordered 20-entry suite (10 single-core + 10 multi-core)
//! - The kernel implementations themselves (prime sieve, Fibonacci,
//!   matrix multiply, hashing, string sorting, ray tracing, compression,
//!   Monte-Carlo π, JSON parsing, N-Queens)
//!
//! The orchestrator in `cpubench-runner` drives the suite; the kernels
//! are opaque to it, each just a `fn(&WorkloadParams) -> BenchmarkResult`.

pub mod kernels;
mod params;
mod result;
mod util;

pub use params::{DeviceTier, WorkloadParams};
pub use result::BenchmarkResult;

use serde::{Deserialize, Serialize};

/// Kernel entry point signature. CPU-bound, synchronous, may panic;
/// the orchestrator isolates panics per entry.
pub type Kernel = fn(&WorkloadParams) -> BenchmarkResult;

/// Execution category of a suite entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Single-thread variant of a workload.
    Single,
    /// Multi-thread variant; parallelism lives inside the kernel.
    Multi,
}

/// Display-name marker that puts a benchmark in the multi-core category.
pub const MULTI_CORE_MARKER: &str = "Multi-Core";

impl Category {
    /// Derive the category from a benchmark's display name.
    ///
    /// This is the naming convention the aggregator partitions by: a name
    /// containing the multi-core marker is `Multi`, everything else `Single`.
    pub fn of(name: &str) -> Category {
        if name.contains(MULTI_CORE_MARKER) {
            Category::Multi
        } else {
            Category::Single
        }
    }
}

/// One scheduled benchmark: display name, category, and kernel function.
#[derive(Debug, Clone, Copy)]
pub struct SuiteEntry {
    /// Human-readable name, unique within the suite.
    pub name: &'static str,
    /// Single or multi-core variant.
    pub category: Category,
    /// The kernel to invoke.
    pub runner_fn: Kernel,
}

/// Number of single-core entries in the suite.
pub const SINGLE_CORE_TESTS: usize = 10;
/// Number of multi-core entries in the suite.
pub const MULTI_CORE_TESTS: usize = 10;
/// Total suite length.
pub const TOTAL_TESTS: usize = SINGLE_CORE_TESTS + MULTI_CORE_TESTS;

/// The fixed benchmark suite, in execution order: all single-core entries
/// first, then all multi-core entries. The orchestrator iterates this list
/// as-is; changing the suite means editing this table, nothing else.
pub static SUITE: [SuiteEntry; TOTAL_TESTS] = [
    SuiteEntry {
        name: "Single-Core Prime Generation",
        category: Category::Single,
        runner_fn: kernels::single::prime_generation,
    },
    SuiteEntry {
        name: "Single-Core Fibonacci Recursive",
        category: Category::Single,
        runner_fn: kernels::single::fibonacci_recursive,
    },
    SuiteEntry {
        name: "Single-Core Matrix Multiplication",
        category: Category::Single,
        runner_fn: kernels::single::matrix_multiplication,
    },
    SuiteEntry {
        name: "Single-Core Hash Computing",
        category: Category::Single,
        runner_fn: kernels::single::hash_computing,
    },
    SuiteEntry {
        name: "Single-Core String Sorting",
        category: Category::Single,
        runner_fn: kernels::single::string_sorting,
    },
    SuiteEntry {
        name: "Single-Core Ray Tracing",
        category: Category::Single,
        runner_fn: kernels::single::ray_tracing,
    },
    SuiteEntry {
        name: "Single-Core Compression",
        category: Category::Single,
        runner_fn: kernels::single::compression,
    },
    SuiteEntry {
        name: "Single-Core Monte Carlo π",
        category: Category::Single,
        runner_fn: kernels::single::monte_carlo_pi,
    },
    SuiteEntry {
        name: "Single-Core JSON Parsing",
        category: Category::Single,
        runner_fn: kernels::single::json_parsing,
    },
    SuiteEntry {
        name: "Single-Core N-Queens",
        category: Category::Single,
        runner_fn: kernels::single::nqueens,
    },
    SuiteEntry {
        name: "Multi-Core Prime Generation",
        category: Category::Multi,
        runner_fn: kernels::multi::prime_generation,
    },
    SuiteEntry {
        name: "Multi-Core Fibonacci Memoized",
        category: Category::Multi,
        runner_fn: kernels::multi::fibonacci_memoized,
    },
    SuiteEntry {
        name: "Multi-Core Matrix Multiplication",
        category: Category::Multi,
        runner_fn: kernels::multi::matrix_multiplication,
    },
    SuiteEntry {
        name: "Multi-Core Hash Computing",
        category: Category::Multi,
        runner_fn: kernels::multi::hash_computing,
    },
    SuiteEntry {
        name: "Multi-Core String Sorting",
        category: Category::Multi,
        runner_fn: kernels::multi::string_sorting,
    },
    SuiteEntry {
        name: "Multi-Core Ray Tracing",
        category: Category::Multi,
        runner_fn: kernels::multi::ray_tracing,
    },
    SuiteEntry {
        name: "Multi-Core Compression",
        category: Category::Multi,
        runner_fn: kernels::multi::compression,
    },
    SuiteEntry {
        name: "Multi-Core Monte Carlo π",
        category: Category::Multi,
        runner_fn: kernels::multi::monte_carlo_pi,
    },
    SuiteEntry {
        name: "Multi-Core JSON Parsing",
        category: Category::Multi,
        runner_fn: kernels::multi::json_parsing,
    },
    SuiteEntry {
        name: "Multi-Core N-Queens",
        category: Category::Multi,
        runner_fn: kernels::multi::nqueens,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_is_partitioned_single_then_multi() {
        assert_eq!(SUITE.len(), TOTAL_TESTS);
        let singles = SUITE
            .iter()
            .take_while(|e| e.category == Category::Single)
            .count();
        assert_eq!(singles, SINGLE_CORE_TESTS);
        assert!(SUITE
            .iter()
            .skip(SINGLE_CORE_TESTS)
            .all(|e| e.category == Category::Multi));
    }

    #[test]
    fn suite_names_are_unique() {
        let mut names: Vec<_> = SUITE.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TOTAL_TESTS);
    }

    #[test]
    fn category_follows_naming_convention() {
        for entry in &SUITE {
            assert_eq!(Category::of(entry.name), entry.category, "{}", entry.name);
        }
        assert_eq!(Category::of("Multi-Core Anything"), Category::Multi);
        assert_eq!(Category::of("Single-Core Anything"), Category::Single);
    }
}
