//! SSE2 dot product implementation for f32

use crate::primitives::backends::standard::utils::horizontal_sum_ps;
use std::arch::x86_64::*;

/// SSE2 implementation of dot product for f32
///
/// # Safety
/// `a` and `b` must be valid for reads of `n` elements.
#[inline]
pub unsafe fn dot_product_sse(a: *const f32, b: *const f32, n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }

    let mut acc0 = _mm_setzero_ps();
    let mut acc1 = _mm_setzero_ps();
    let mut acc2 = _mm_setzero_ps();
    let mut acc3 = _mm_setzero_ps();

    // Main loop - 16 elements per iteration across four accumulators
    let mut i = 0;
    while i + 16 <= n {
        acc0 = _mm_add_ps(acc0, _mm_mul_ps(_mm_loadu_ps(a.add(i)), _mm_loadu_ps(b.add(i))));
        acc1 = _mm_add_ps(
            acc1,
            _mm_mul_ps(_mm_loadu_ps(a.add(i + 4)), _mm_loadu_ps(b.add(i + 4))),
        );
        acc2 = _mm_add_ps(
            acc2,
            _mm_mul_ps(_mm_loadu_ps(a.add(i + 8)), _mm_loadu_ps(b.add(i + 8))),
        );
        acc3 = _mm_add_ps(
            acc3,
            _mm_mul_ps(_mm_loadu_ps(a.add(i + 12)), _mm_loadu_ps(b.add(i + 12))),
        );
        i += 16;
    }

    // Remaining full vectors
    while i + 4 <= n {
        acc0 = _mm_add_ps(acc0, _mm_mul_ps(_mm_loadu_ps(a.add(i)), _mm_loadu_ps(b.add(i))));
        i += 4;
    }

    let acc = _mm_add_ps(_mm_add_ps(acc0, acc1), _mm_add_ps(acc2, acc3));
    let mut sum = horizontal_sum_ps(acc);

    // Handle remainder
    while i < n {
        sum += *a.add(i) * *b.add(i);
        i += 1;
    }

    sum
}
