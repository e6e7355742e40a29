//! Shared utilities for integration tests

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Lengths around every chunk boundary the kernels care about
pub fn edge_case_lengths() -> Vec<usize> {
    vec![
        0,    // Empty
        1,    // Single element
        3,    // Below one 128-bit vector
        4,    // One 128-bit vector
        15,   // Below the unrolled standard loop
        16,   // One unrolled standard iteration
        17,   // Unrolled + scalar tail
        63,   // Just below the standard threshold
        64,   // Standard threshold
        65,   // Standard threshold + 1
        2047, // Just below the wide threshold
        2048, // Wide threshold
        2049, // Wide threshold + 1
    ]
}

/// Data patterns used for cross-tier checks
#[derive(Clone, Copy, Debug)]
pub enum Pattern {
    Zeros,
    Ones,
    Random(u64),
}

pub fn patterns() -> Vec<Pattern> {
    vec![Pattern::Zeros, Pattern::Ones, Pattern::Random(7), Pattern::Random(42)]
}

/// Generate `len` values following `pattern`
pub fn generate(pattern: Pattern, len: usize) -> Vec<f32> {
    match pattern {
        Pattern::Zeros => vec![0.0; len],
        Pattern::Ones => vec![1.0; len],
        Pattern::Random(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(len as u64));
            (0..len).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
        }
    }
}

/// Forward error bound for an f32 dot product computed in any summation order
pub fn tolerance(a: &[f32], b: &[f32]) -> f32 {
    let abs_sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| (x as f64 * y as f64).abs())
        .sum();
    let n = a.len().max(1) as f64;
    (2.0 * n * f32::EPSILON as f64 * abs_sum) as f32 + 1e-6
}

/// Assert two dot products agree within the bound for their operands
pub fn assert_close(actual: f32, expected: f32, tol: f32, context: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{context}: got {actual}, expected {expected} (tolerance {tol})"
    );
}
