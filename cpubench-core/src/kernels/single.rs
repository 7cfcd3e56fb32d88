//! Single-core kernels. Everything here runs on the calling thread.

use std::time::Instant;

use rand::Rng;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::kernels::{
    compress_rle, count_json_elements, decompress_rle, generate_json_document, nqueens_count,
    pixel_ray, test_scene, trace_ray,
};
use crate::util;
use crate::{BenchmarkResult, WorkloadParams};

/// Sieve of Eratosthenes over `[0, prime_range]`.
pub fn prime_generation(params: &WorkloadParams) -> BenchmarkResult {
    let n = params.prime_range;
    let start = Instant::now();

    let mut is_prime = vec![true; n + 1];
    is_prime[0] = false;
    if n > 0 {
        is_prime[1] = false;
    }
    let mut p = 2;
    while p * p <= n {
        if is_prime[p] {
            let mut multiple = p * p;
            while multiple <= n {
                is_prime[multiple] = false;
                multiple += p;
            }
        }
        p += 1;
    }
    let prime_count = is_prime.iter().filter(|&&x| x).count();

    let elapsed = start.elapsed();
    // Approximate sieve work: n * ln(ln(n)).
    let ops = n as f64 * (n as f64).ln().ln();

    BenchmarkResult::new(
        "Single-Core Prime Generation",
        elapsed,
        util::ops_per_second(ops, elapsed),
        prime_count > 0,
        json!({
            "prime_count": prime_count,
            "range": n,
        }),
    )
}

/// Naive recursive Fibonacci over `fibonacci_n_range`.
pub fn fibonacci_recursive(params: &WorkloadParams) -> BenchmarkResult {
    fn fib(n: u32) -> u64 {
        if n <= 1 {
            return n as u64;
        }
        fib(n - 1) + fib(n - 2)
    }

    let (start_n, end_n) = params.fibonacci_n_range;
    let start = Instant::now();

    let results: Vec<u64> = (start_n..=end_n).map(fib).collect();

    let elapsed = start.elapsed();
    let calculations = (end_n - start_n + 1) as f64;

    BenchmarkResult::new(
        "Single-Core Fibonacci Recursive",
        elapsed,
        util::ops_per_second(calculations, elapsed),
        !results.is_empty(),
        json!({
            "fibonacci_results": results,
            "range": [start_n, end_n],
        }),
    )
}

/// Dense `matrix_size`^2 matrix product, naive triple loop.
pub fn matrix_multiplication(params: &WorkloadParams) -> BenchmarkResult {
    let size = params.matrix_size;
    let start = Instant::now();

    let mut rng = rand::thread_rng();
    let a: Vec<Vec<f64>> = (0..size)
        .map(|_| (0..size).map(|_| rng.gen::<f64>()).collect())
        .collect();
    let b: Vec<Vec<f64>> = (0..size)
        .map(|_| (0..size).map(|_| rng.gen::<f64>()).collect())
        .collect();

    let mut c = vec![vec![0.0; size]; size];
    for i in 0..size {
        for j in 0..size {
            for k in 0..size {
                c[i][j] += a[i][k] * b[k][j];
            }
        }
    }

    let elapsed = start.elapsed();
    // One multiply and one add per inner iteration.
    let total_ops = (size * size * size * 2) as f64;

    BenchmarkResult::new(
        "Single-Core Matrix Multiplication",
        elapsed,
        util::ops_per_second(total_ops, elapsed),
        c[0][0] != 0.0,
        json!({
            "matrix_size": size,
            "result_checksum": util::matrix_checksum(&c),
        }),
    )
}

/// SHA-256 and MD5 over `hash_data_size_mb` of random bytes.
pub fn hash_computing(params: &WorkloadParams) -> BenchmarkResult {
    let data_size = params.hash_data_size_mb * 1024 * 1024;
    let start = Instant::now();

    let mut rng = rand::thread_rng();
    let data = util::random_bytes(&mut rng, data_size);

    let mut sha256 = Sha256::new();
    sha256.update(&data);
    let sha256_result = sha256.finalize();
    let md5_result = md5::compute(&data);

    let elapsed = start.elapsed();
    let throughput = util::ops_per_second(data.len() as f64, elapsed);

    BenchmarkResult::new(
        "Single-Core Hash Computing",
        elapsed,
        throughput,
        !sha256_result.is_empty(),
        json!({
            "data_size_mb": params.hash_data_size_mb,
            "sha256_result": format!("{:x}", sha256_result),
            "md5_result": format!("{:x}", md5_result),
            "throughput_bps": throughput,
        }),
    )
}

/// Lexicographic sort of `string_count` random 50-char strings.
pub fn string_sorting(params: &WorkloadParams) -> BenchmarkResult {
    let count = params.string_count;
    let start = Instant::now();

    let mut rng = rand::thread_rng();
    let mut strings: Vec<String> = (0..count)
        .map(|_| util::random_string(&mut rng, 50))
        .collect();
    strings.sort();

    let elapsed = start.elapsed();
    // Approximate comparisons for an n log n sort.
    let comparisons = (count as f64) * (count as f64).ln();

    BenchmarkResult::new(
        "Single-Core String Sorting",
        elapsed,
        util::ops_per_second(comparisons, elapsed),
        strings.len() == count,
        json!({
            "string_count": count,
            "sorted": true,
        }),
    )
}

/// Recursive sphere tracer at `ray_tracing_resolution`.
pub fn ray_tracing(params: &WorkloadParams) -> BenchmarkResult {
    let (width, height) = params.ray_tracing_resolution;
    let max_depth = params.ray_tracing_depth;
    let start = Instant::now();

    let spheres = test_scene();
    let mut image = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let ray = pixel_ray(x, y, width, height);
            image.push(trace_ray(&ray, &spheres, max_depth));
        }
    }

    let elapsed = start.elapsed();
    let total_rays = (width * height) as f64;

    BenchmarkResult::new(
        "Single-Core Ray Tracing",
        elapsed,
        util::ops_per_second(total_rays, elapsed),
        !image.is_empty(),
        json!({
            "resolution": [width, height],
            "max_depth": max_depth,
            "ray_count": total_rays,
            "pixels_rendered": image.len(),
        }),
    )
}

/// RLE compress then decompress `compression_data_size_mb` of random bytes.
pub fn compression(params: &WorkloadParams) -> BenchmarkResult {
    let data_size = params.compression_data_size_mb * 1024 * 1024;
    let start = Instant::now();

    let mut rng = rand::thread_rng();
    let data = util::random_bytes(&mut rng, data_size);

    let compressed = compress_rle(&data);
    let decompressed = decompress_rle(&compressed);

    let elapsed = start.elapsed();
    let throughput = util::ops_per_second(data.len() as f64, elapsed);

    BenchmarkResult::new(
        "Single-Core Compression",
        elapsed,
        throughput,
        data == decompressed,
        json!({
            "original_size": data.len(),
            "compressed_size": compressed.len(),
            "compression_ratio": data.len() as f64 / compressed.len() as f64,
            "throughput_bps": throughput,
        }),
    )
}

/// Monte Carlo estimate of pi from `monte_carlo_samples` points.
pub fn monte_carlo_pi(params: &WorkloadParams) -> BenchmarkResult {
    let samples = params.monte_carlo_samples;
    let start = Instant::now();

    let mut rng = rand::thread_rng();
    let mut inside = 0u64;
    for _ in 0..samples {
        let x: f64 = rng.gen::<f64>() * 2.0 - 1.0;
        let y: f64 = rng.gen::<f64>() * 2.0 - 1.0;
        if x * x + y * y <= 1.0 {
            inside += 1;
        }
    }
    let pi_estimate = 4.0 * inside as f64 / samples as f64;

    let elapsed = start.elapsed();

    BenchmarkResult::new(
        "Single-Core Monte Carlo π",
        elapsed,
        util::ops_per_second(samples as f64, elapsed),
        (pi_estimate - std::f64::consts::PI).abs() < 0.1,
        json!({
            "samples": samples,
            "pi_estimate": pi_estimate,
            "actual_pi": std::f64::consts::PI,
            "accuracy": (pi_estimate - std::f64::consts::PI).abs(),
        }),
    )
}

/// Generate and parse a `json_data_size_mb` nested document.
pub fn json_parsing(params: &WorkloadParams) -> BenchmarkResult {
    let data_size = params.json_data_size_mb * 1024 * 1024;
    let start = Instant::now();

    let json_data = generate_json_document(data_size);
    let parsed: serde_json::Value = match serde_json::from_str(&json_data) {
        Ok(value) => value,
        Err(_) => serde_json::Value::Null,
    };
    let elements = count_json_elements(&parsed);

    let elapsed = start.elapsed();

    BenchmarkResult::new(
        "Single-Core JSON Parsing",
        elapsed,
        util::ops_per_second(elements as f64, elapsed),
        parsed.is_object(),
        json!({
            "json_size": json_data.len(),
            "elements_parsed": elements,
            "root_type": "object",
        }),
    )
}

/// Backtracking N-Queens solution count for `nqueens_size`.
pub fn nqueens(params: &WorkloadParams) -> BenchmarkResult {
    let n = params.nqueens_size as usize;
    let start = Instant::now();

    let mut cols = vec![false; n];
    let mut diag1 = vec![false; 2 * n - 1];
    let mut diag2 = vec![false; 2 * n - 1];
    let solution_count = nqueens_count(0, n, &mut cols, &mut diag1, &mut diag2);

    let elapsed = start.elapsed();

    BenchmarkResult::new(
        "Single-Core N-Queens",
        elapsed,
        util::ops_per_second(solution_count as f64, elapsed),
        solution_count > 0,
        json!({
            "board_size": n,
            "solution_count": solution_count,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prime_generation_finds_expected_count() {
        let mut params = WorkloadParams::minimal();
        params.prime_range = 100;
        let result = prime_generation(&params);
        assert!(result.is_valid);
        assert_eq!(result.metrics["prime_count"], 25);
    }

    #[test]
    fn compression_round_trip_validates() {
        let result = compression(&WorkloadParams::minimal());
        assert!(result.is_valid);
        assert!(result.ops_per_second > 0.0);
    }

    #[test]
    fn json_parsing_reports_object_root() {
        let result = json_parsing(&WorkloadParams::minimal());
        assert!(result.is_valid);
        assert_eq!(result.metrics["root_type"], "object");
    }

    #[test]
    fn nqueens_reports_solution_count() {
        let mut params = WorkloadParams::minimal();
        params.nqueens_size = 8;
        let result = nqueens(&params);
        assert!(result.is_valid);
        assert_eq!(result.metrics["solution_count"], 92);
    }
}
