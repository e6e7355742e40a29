//! Shared SSE helpers

use std::arch::x86_64::*;

/// Horizontal sum of a __m128 (4 f32s) using only SSE instructions
#[inline]
pub unsafe fn horizontal_sum_ps(v: __m128) -> f32 {
    // [v2, v3, v2, v3]
    let high = _mm_movehl_ps(v, v);
    // [v0 + v2, v1 + v3, ..]
    let sums = _mm_add_ps(v, high);
    // lane 0 <- lane 1
    let shuf = _mm_shuffle_ps(sums, sums, 0b00_00_00_01);
    let result = _mm_add_ss(sums, shuf);
    _mm_cvtss_f32(result)
}
