//! SSE2 grouped dot product for f32

use crate::primitives::backends::standard::utils::horizontal_sum_ps;
use crate::region::BLOCK_FAN_OUT;
use std::arch::x86_64::*;

/// SSE2 implementation of four dot products sharing `a`
///
/// # Safety
/// `a` and every pointer in `rhs` must be valid for reads of `n` elements.
#[inline]
pub unsafe fn group_dot_sse(
    a: *const f32,
    rhs: [*const f32; BLOCK_FAN_OUT],
    n: usize,
) -> [f32; BLOCK_FAN_OUT] {
    if n == 0 {
        return [0.0; BLOCK_FAN_OUT];
    }
    let [b0, b1, b2, b3] = rhs;

    let mut acc0 = _mm_setzero_ps();
    let mut acc1 = _mm_setzero_ps();
    let mut acc2 = _mm_setzero_ps();
    let mut acc3 = _mm_setzero_ps();

    let mut i = 0;
    while i + 4 <= n {
        let va = _mm_loadu_ps(a.add(i));
        acc0 = _mm_add_ps(acc0, _mm_mul_ps(va, _mm_loadu_ps(b0.add(i))));
        acc1 = _mm_add_ps(acc1, _mm_mul_ps(va, _mm_loadu_ps(b1.add(i))));
        acc2 = _mm_add_ps(acc2, _mm_mul_ps(va, _mm_loadu_ps(b2.add(i))));
        acc3 = _mm_add_ps(acc3, _mm_mul_ps(va, _mm_loadu_ps(b3.add(i))));
        i += 4;
    }

    let mut sums = [
        horizontal_sum_ps(acc0),
        horizontal_sum_ps(acc1),
        horizontal_sum_ps(acc2),
        horizontal_sum_ps(acc3),
    ];

    while i < n {
        let x = *a.add(i);
        sums[0] += x * *b0.add(i);
        sums[1] += x * *b1.add(i);
        sums[2] += x * *b2.add(i);
        sums[3] += x * *b3.add(i);
        i += 1;
    }

    sums
}
