//! Multi-core kernels. Parallelism goes through rayon's global pool.

use std::time::Instant;

use rand::Rng;
use rayon::prelude::*;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::kernels::{
    compress_rle, count_json_elements, decompress_rle, generate_json_document, nqueens_count,
    pixel_ray, test_scene, trace_ray,
};
use crate::util;
use crate::{BenchmarkResult, WorkloadParams};

/// Segmented sieve: base primes up to sqrt(n), segments marked in parallel.
pub fn prime_generation(params: &WorkloadParams) -> BenchmarkResult {
    let n = params.prime_range;
    let num_threads = num_cpus::get();
    let start = Instant::now();

    let limit = (n as f64).sqrt() as usize + 1;
    let mut base = vec![true; limit + 1];
    base[0] = false;
    if limit > 0 {
        base[1] = false;
    }
    let mut p = 2;
    while p * p <= limit {
        if base[p] {
            let mut multiple = p * p;
            while multiple <= limit {
                base[multiple] = false;
                multiple += p;
            }
        }
        p += 1;
    }
    let base_primes: Vec<usize> = (2..=limit).filter(|&i| base[i]).collect();

    let segment_len = (n / num_threads).max(limit).max(2);
    let segments: Vec<(usize, usize)> = (2..=n)
        .step_by(segment_len)
        .map(|lo| (lo, (lo + segment_len - 1).min(n)))
        .collect();

    let prime_count: usize = segments
        .par_iter()
        .map(|&(lo, hi)| {
            let mut is_prime = vec![true; hi - lo + 1];
            for &p in &base_primes {
                let first = lo.div_ceil(p).max(2) * p;
                let mut multiple = first.max(p * p);
                while multiple <= hi {
                    is_prime[multiple - lo] = false;
                    multiple += p;
                }
            }
            is_prime.iter().filter(|&&x| x).count()
        })
        .sum();

    let elapsed = start.elapsed();
    let ops = n as f64 * (n as f64).ln().ln();

    BenchmarkResult::new(
        "Multi-Core Prime Generation",
        elapsed,
        util::ops_per_second(ops, elapsed),
        prime_count > 0,
        json!({
            "prime_count": prime_count,
            "range": n,
            "threads": num_threads,
        }),
    )
}

/// Memoized Fibonacci over `fibonacci_n_range`, one value per task.
pub fn fibonacci_memoized(params: &WorkloadParams) -> BenchmarkResult {
    fn fib_memo(n: u32) -> u64 {
        let mut memo = vec![0u64; (n as usize + 2).max(2)];
        memo[1] = 1;
        for i in 2..=n as usize {
            memo[i] = memo[i - 1].wrapping_add(memo[i - 2]);
        }
        memo[n as usize]
    }

    let (start_n, end_n) = params.fibonacci_n_range;
    let start = Instant::now();

    let results: Vec<u64> = (start_n..=end_n).into_par_iter().map(fib_memo).collect();

    let elapsed = start.elapsed();
    let calculations = (end_n - start_n + 1) as f64;

    BenchmarkResult::new(
        "Multi-Core Fibonacci Memoized",
        elapsed,
        util::ops_per_second(calculations, elapsed),
        !results.is_empty(),
        json!({
            "fibonacci_results": results,
            "range": [start_n, end_n],
            "threads": num_cpus::get(),
        }),
    )
}

/// Dense matrix product, one output row per task.
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

    let c: Vec<Vec<f64>> = (0..size)
        .into_par_iter()
        .map(|i| {
            let mut row = vec![0.0; size];
            for k in 0..size {
                let aik = a[i][k];
                for j in 0..size {
                    row[j] += aik * b[k][j];
                }
            }
            row
        })
        .collect();

    let elapsed = start.elapsed();
    let total_ops = (size * size * size * 2) as f64;

    BenchmarkResult::new(
        "Multi-Core Matrix Multiplication",
        elapsed,
        util::ops_per_second(total_ops, elapsed),
        c[0][0] != 0.0,
        json!({
            "matrix_size": size,
            "result_checksum": util::matrix_checksum(&c),
            "threads": num_cpus::get(),
        }),
    )
}

/// Chunked SHA-256 and MD5, chunk digests folded into a final digest.
pub fn hash_computing(params: &WorkloadParams) -> BenchmarkResult {
    let data_size = params.hash_data_size_mb * 1024 * 1024;
    let num_threads = num_cpus::get();
    let chunk_size = (data_size / num_threads).max(1);
    let start = Instant::now();

    let mut rng = rand::thread_rng();
    let data = util::random_bytes(&mut rng, data_size);

    let chunk_hashes: Vec<(Vec<u8>, Vec<u8>)> = data
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut sha256 = Sha256::new();
            sha256.update(chunk);
            (
                sha256.finalize().to_vec(),
                md5::compute(chunk).to_vec(),
            )
        })
        .collect();

    let mut combined_sha256 = Vec::new();
    let mut combined_md5 = Vec::new();
    for (sha_chunk, md5_chunk) in chunk_hashes {
        combined_sha256.extend_from_slice(&sha_chunk);
        combined_md5.extend_from_slice(&md5_chunk);
    }
    let mut final_sha256 = Sha256::new();
    final_sha256.update(&combined_sha256);
    let sha256_result = final_sha256.finalize();
    let md5_result = md5::compute(&combined_md5);

    let elapsed = start.elapsed();
    let throughput = util::ops_per_second(data.len() as f64, elapsed);

    BenchmarkResult::new(
        "Multi-Core Hash Computing",
        elapsed,
        throughput,
        !sha256_result.is_empty(),
        json!({
            "data_size_mb": params.hash_data_size_mb,
            "sha256_result": format!("{:x}", sha256_result),
            "md5_result": format!("{:x}", md5_result),
            "throughput_bps": throughput,
            "threads": num_threads,
        }),
    )
}

/// Parallel lexicographic sort of random 50-char strings.
pub fn string_sorting(params: &WorkloadParams) -> BenchmarkResult {
    let count = params.string_count;
    let start = Instant::now();

    let mut rng = rand::thread_rng();
    let mut strings: Vec<String> = (0..count)
        .map(|_| util::random_string(&mut rng, 50))
        .collect();
    strings.par_sort();

    let elapsed = start.elapsed();
    let comparisons = (count as f64) * (count as f64).ln();

    BenchmarkResult::new(
        "Multi-Core String Sorting",
        elapsed,
        util::ops_per_second(comparisons, elapsed),
        strings.len() == count,
        json!({
            "string_count": count,
            "sorted": true,
            "threads": num_cpus::get(),
        }),
    )
}

/// Recursive sphere tracer, one scanline per task.
pub fn ray_tracing(params: &WorkloadParams) -> BenchmarkResult {
    let (width, height) = params.ray_tracing_resolution;
    let max_depth = params.ray_tracing_depth;
    let start = Instant::now();

    let spheres = test_scene();
    let image: Vec<_> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| {
            let spheres = &spheres;
            (0..width).map(move |x| {
                let ray = pixel_ray(x, y, width, height);
                trace_ray(&ray, spheres, max_depth)
            })
        })
        .collect();

    let elapsed = start.elapsed();
    let total_rays = (width * height) as f64;

    BenchmarkResult::new(
        "Multi-Core Ray Tracing",
        elapsed,
        util::ops_per_second(total_rays, elapsed),
        !image.is_empty(),
        json!({
            "resolution": [width, height],
            "max_depth": max_depth,
            "ray_count": total_rays,
            "pixels_rendered": image.len(),
            "threads": num_cpus::get(),
        }),
    )
}

/// RLE over parallel chunks. Concatenated chunk streams decompress back to
/// the original byte sequence, so the round trip verifies end to end.
pub fn compression(params: &WorkloadParams) -> BenchmarkResult {
    let data_size = params.compression_data_size_mb * 1024 * 1024;
    let num_threads = num_cpus::get();
    let chunk_size = (data_size / num_threads).max(1);
    let start = Instant::now();

    let mut rng = rand::thread_rng();
    let data = util::random_bytes(&mut rng, data_size);

    let compressed_chunks: Vec<Vec<u8>> = data
        .par_chunks(chunk_size)
        .map(compress_rle)
        .collect();
    let mut compressed = Vec::new();
    for chunk in compressed_chunks {
        compressed.extend(chunk);
    }
    let decompressed = decompress_rle(&compressed);

    let elapsed = start.elapsed();
    let throughput = util::ops_per_second(data.len() as f64, elapsed);

    BenchmarkResult::new(
        "Multi-Core Compression",
        elapsed,
        throughput,
        data == decompressed,
        json!({
            "original_size": data.len(),
            "compressed_size": compressed.len(),
            "compression_ratio": data.len() as f64 / compressed.len() as f64,
            "throughput_bps": throughput,
            "threads": num_threads,
        }),
    )
}

/// Monte Carlo estimate of pi, samples split across the pool.
pub fn monte_carlo_pi(params: &WorkloadParams) -> BenchmarkResult {
    let samples = params.monte_carlo_samples;
    let num_threads = num_cpus::get();
    let samples_per_thread = (samples / num_threads).max(1);
    let start = Instant::now();

    let inside: u64 = (0..num_threads)
        .into_par_iter()
        .map(|_| {
            let mut rng = rand::thread_rng();
            let mut inside = 0u64;
            for _ in 0..samples_per_thread {
                let x: f64 = rng.gen::<f64>() * 2.0 - 1.0;
                let y: f64 = rng.gen::<f64>() * 2.0 - 1.0;
                if x * x + y * y <= 1.0 {
                    inside += 1;
                }
            }
            inside
        })
        .sum();

    // Integer division above drops the remainder; only the points actually
    // drawn count toward the estimate and the throughput.
    let counted = (samples_per_thread * num_threads) as f64;
    let pi_estimate = 4.0 * inside as f64 / counted;

    let elapsed = start.elapsed();

    BenchmarkResult::new(
        "Multi-Core Monte Carlo π",
        elapsed,
        util::ops_per_second(counted, elapsed),
        (pi_estimate - std::f64::consts::PI).abs() < 0.1,
        json!({
            "samples": samples_per_thread * num_threads,
            "pi_estimate": pi_estimate,
            "actual_pi": std::f64::consts::PI,
            "accuracy": (pi_estimate - std::f64::consts::PI).abs(),
            "threads": num_threads,
        }),
    )
}

/// One generated document per worker, parsed in parallel.
pub fn json_parsing(params: &WorkloadParams) -> BenchmarkResult {
    let data_size = params.json_data_size_mb * 1024 * 1024;
    let num_threads = num_cpus::get();
    let doc_size = (data_size / num_threads).max(64);
    let start = Instant::now();

    let documents: Vec<String> = (0..num_threads)
        .map(|_| generate_json_document(doc_size))
        .collect();

    let parsed: Vec<serde_json::Value> = documents
        .par_iter()
        .map(|doc| match serde_json::from_str(doc) {
            Ok(value) => value,
            Err(_) => serde_json::Value::Null,
        })
        .collect();

    let total_size: usize = documents.iter().map(String::len).sum();
    let elements: u64 = parsed.iter().map(count_json_elements).sum();

    let elapsed = start.elapsed();

    BenchmarkResult::new(
        "Multi-Core JSON Parsing",
        elapsed,
        util::ops_per_second(elements as f64, elapsed),
        parsed.iter().all(|v| v.is_object()),
        json!({
            "json_size": total_size,
            "elements_parsed": elements,
            "root_type": "object",
            "threads": num_threads,
        }),
    )
}

/// N-Queens split by first-row column, subtrees counted in parallel.
pub fn nqueens(params: &WorkloadParams) -> BenchmarkResult {
    let n = params.nqueens_size as usize;
    let num_threads = num_cpus::get();
    let start = Instant::now();

    let solution_count: u64 = (0..n)
        .into_par_iter()
        .map(|first_col| {
            let mut cols = vec![false; n];
            let mut diag1 = vec![false; 2 * n - 1];
            let mut diag2 = vec![false; 2 * n - 1];
            cols[first_col] = true;
            diag1[first_col] = true;
            diag2[n - 1 + first_col] = true;
            nqueens_count(1, n, &mut cols, &mut diag1, &mut diag2)
        })
        .sum();

    let elapsed = start.elapsed();

    BenchmarkResult::new(
        "Multi-Core N-Queens",
        elapsed,
        util::ops_per_second(solution_count as f64, elapsed),
        solution_count > 0,
        json!({
            "board_size": n,
            "solution_count": solution_count,
            "threads": num_threads,
        }),
    )
}
