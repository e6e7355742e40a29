//! NEON dot product implementation for f32

use std::arch::aarch64::*;

/// NEON implementation of dot product for f32
///
/// # Safety
/// `a` and `b` must be valid for reads of `n` elements.
#[inline]
pub unsafe fn dot_product_neon(a: *const f32, b: *const f32, n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }

    let mut acc0 = vdupq_n_f32(0.0);
    let mut acc1 = vdupq_n_f32(0.0);
    let mut acc2 = vdupq_n_f32(0.0);
    let mut acc3 = vdupq_n_f32(0.0);

    // Main loop - 16 elements per iteration across four accumulators
    let mut i = 0;
    while i + 16 <= n {
        acc0 = vfmaq_f32(acc0, vld1q_f32(a.add(i)), vld1q_f32(b.add(i)));
        acc1 = vfmaq_f32(acc1, vld1q_f32(a.add(i + 4)), vld1q_f32(b.add(i + 4)));
        acc2 = vfmaq_f32(acc2, vld1q_f32(a.add(i + 8)), vld1q_f32(b.add(i + 8)));
        acc3 = vfmaq_f32(acc3, vld1q_f32(a.add(i + 12)), vld1q_f32(b.add(i + 12)));
        i += 16;
    }

    // Remaining full vectors
    while i + 4 <= n {
        acc0 = vfmaq_f32(acc0, vld1q_f32(a.add(i)), vld1q_f32(b.add(i)));
        i += 4;
    }

    let acc = vaddq_f32(vaddq_f32(acc0, acc1), vaddq_f32(acc2, acc3));
    let mut sum = vaddvq_f32(acc);

    // Handle remainder
    while i < n {
        sum += *a.add(i) * *b.add(i);
        i += 1;
    }

    sum
}
