//! Standard-width SIMD backend
//!
//! 128-bit vectors that every CPU of the target family has: SSE2 on x86_64 and
//! NEON on aarch64. No runtime detection is involved; if the target is one of
//! those two, the backend is available.
//!
//! Each call has a small fixed cost (accumulator setup and the final horizontal
//! reduction), so the dispatcher only binds this backend for blocks of at least
//! `DispatchConfig::min_standard_block` elements. Results are correct for any
//! length; only the partial-sum order differs from the scalar reference.

mod ops;
#[cfg(target_arch = "x86_64")]
mod utils;

use crate::primitives::DotKernel;
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use crate::region::BLOCK_FAN_OUT;

/// Fixed-width SIMD backend for x86_64 and aarch64
#[derive(Clone, Copy, Debug)]
pub struct StandardBackend;

impl StandardBackend {
    /// Create a new standard SIMD backend
    ///
    /// # Panics
    /// Panics if the target has no 128-bit SIMD implementation compiled in
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
        {
            Self
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            panic!("standard SIMD backend not available: no 128-bit kernels for this target");
        }
    }

    /// Check if the standard SIMD backend can run on this target
    pub fn is_available() -> bool {
        cfg!(any(target_arch = "x86_64", target_arch = "aarch64"))
    }
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
impl DotKernel for StandardBackend {
    fn backend_name(&self) -> &'static str {
        if cfg!(target_arch = "aarch64") {
            "neon"
        } else {
            "sse2"
        }
    }

    fn simd_width(&self) -> usize {
        4 // 4 f32 lanes per 128-bit register
    }

    fn dot(&self, lhs: &[f32], rhs: &[f32], offset_l: usize, offset_r: usize, n: usize) -> f32 {
        let a = &lhs[offset_l..offset_l + n];
        let b = &rhs[offset_r..offset_r + n];
        ops::dot_product(a, b)
    }

    fn group_dot4(
        &self,
        lhs: &[f32],
        rhs: [&[f32]; BLOCK_FAN_OUT],
        offset_l: usize,
        n: usize,
    ) -> [f32; BLOCK_FAN_OUT] {
        let a = &lhs[offset_l..offset_l + n];
        ops::group_dot(a, rhs.map(|r| &r[..n]))
    }

    fn group_dot4_strided(
        &self,
        lhs: &[f32],
        rhs: &[f32],
        offset_l: usize,
        offset_r: usize,
        stride: usize,
        n: usize,
    ) -> [f32; BLOCK_FAN_OUT] {
        let a = &lhs[offset_l..offset_l + n];
        let regions = [0, 1, 2, 3].map(|k| {
            let start = offset_r + k * stride;
            &rhs[start..start + n]
        });
        ops::group_dot(a, regions)
    }
}

// Fallback for targets without 128-bit kernels
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
impl DotKernel for StandardBackend {
    fn backend_name(&self) -> &'static str {
        "standard (unavailable)"
    }
}

/// Standard SIMD dot product over `lhs[offset_l..][..n]` and `rhs[offset_r..][..n]`
///
/// # Panics
/// Panics on targets without a standard SIMD backend.
pub fn dot_standard(lhs: &[f32], rhs: &[f32], offset_l: usize, offset_r: usize, n: usize) -> f32 {
    StandardBackend::new().dot(lhs, rhs, offset_l, offset_r, n)
}

/// Four standard SIMD dot products sharing one LHS region
///
/// # Panics
/// Panics on targets without a standard SIMD backend.
pub fn group_dot_standard4(
    lhs: &[f32],
    rhs: [&[f32]; crate::region::BLOCK_FAN_OUT],
    offset_l: usize,
    n: usize,
) -> [f32; crate::region::BLOCK_FAN_OUT] {
    StandardBackend::new().group_dot4(lhs, rhs, offset_l, n)
}

#[cfg(all(test, any(target_arch = "x86_64", target_arch = "aarch64")))]
mod tests {
    use super::*;
    use crate::primitives::backends::scalar::dot_scalar;
    use approx::assert_relative_eq;

    fn ramp(n: usize, scale: f32) -> Vec<f32> {
        (0..n).map(|i| ((i % 13) as f32 - 6.0) * scale).collect()
    }

    #[test]
    fn test_matches_scalar_across_chunk_boundaries() {
        let backend = StandardBackend::new();
        for n in [0, 1, 3, 4, 5, 15, 16, 17, 31, 63, 64, 65, 257] {
            let a = ramp(n, 0.25);
            let b = ramp(n, -0.5);
            let expected = dot_scalar(&a, &b, 0, 0, n);
            let actual = backend.dot(&a, &b, 0, 0, n);
            assert_relative_eq!(actual, expected, epsilon = 1e-4, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_offsets() {
        let a = ramp(100, 1.0);
        let b = ramp(120, 0.5);
        let expected = dot_scalar(&a, &b, 7, 19, 70);
        let actual = dot_standard(&a, &b, 7, 19, 70);
        assert_relative_eq!(actual, expected, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_length() {
        let a = [3.0f32; 8];
        assert_eq!(dot_standard(&a, &a, 0, 0, 0), 0.0);
        assert_eq!(group_dot_standard4(&a, [&a; 4], 2, 0), [0.0; 4]);
    }

    #[test]
    fn test_group_matches_individual() {
        let n = 131;
        let lhs = ramp(n + 3, 0.75);
        let rhs: Vec<Vec<f32>> = (0..4).map(|k| ramp(n + k, 0.1 * (k + 1) as f32)).collect();
        let refs = [&rhs[0][..], &rhs[1][..], &rhs[2][..], &rhs[3][..]];

        let grouped = group_dot_standard4(&lhs, refs, 3, n);
        for k in 0..4 {
            let single = dot_standard(&lhs, refs[k], 3, 0, n);
            assert_relative_eq!(grouped[k], single, epsilon = 1e-3, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_strided_matches_individual() {
        let n = 70;
        let lhs = ramp(n, 1.0);
        let rhs = ramp(5 + 4 * n, 0.5);
        let grouped = StandardBackend::new().group_dot4_strided(&lhs, &rhs, 0, 5, n, n);
        for (k, &sum) in grouped.iter().enumerate() {
            let expected = dot_scalar(&lhs, &rhs, 0, 5 + k * n, n);
            assert_relative_eq!(sum, expected, epsilon = 1e-3, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_backend_metadata() {
        let backend = StandardBackend::new();
        assert!(StandardBackend::is_available());
        assert_eq!(backend.simd_width(), 4);
        assert!(["neon", "sse2"].contains(&backend.backend_name()));
    }
}
