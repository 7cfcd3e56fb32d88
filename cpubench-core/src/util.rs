//! Small helpers shared by the kernels.

use rand::Rng;
use std::time::Duration;

/// Throughput from an operation count and elapsed time.
pub fn ops_per_second(operation_count: f64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    operation_count / secs
}

/// Random alphanumeric string of the given length.
pub fn random_string(rng: &mut impl Rng, length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";
    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Random byte buffer of the given size.
pub fn random_bytes(rng: &mut impl Rng, size: usize) -> Vec<u8> {
    let mut data = vec![0u8; size];
    rng.fill(&mut data[..]);
    data
}

/// Wrapping checksum over a row-major f64 matrix, for result validation.
pub fn matrix_checksum(matrix: &[Vec<f64>]) -> u64 {
    let mut checksum: u64 = 0;
    for row in matrix {
        for &val in row {
            checksum = checksum.wrapping_add(val.to_bits());
        }
    }
    checksum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_elapsed_yields_zero_throughput() {
        assert_eq!(ops_per_second(1000.0, Duration::ZERO), 0.0);
    }

    #[test]
    fn throughput_scales_with_count() {
        let one_sec = Duration::from_secs(1);
        assert_eq!(ops_per_second(500.0, one_sec), 500.0);
    }

    #[test]
    fn random_string_has_requested_length() {
        let mut rng = rand::thread_rng();
        assert_eq!(random_string(&mut rng, 50).len(), 50);
    }
}
