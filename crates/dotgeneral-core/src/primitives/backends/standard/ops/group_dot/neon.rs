//! NEON grouped dot product for f32

use crate::region::BLOCK_FAN_OUT;
use std::arch::aarch64::*;

/// NEON implementation of four dot products sharing `a`
///
/// # Safety
/// `a` and every pointer in `rhs` must be valid for reads of `n` elements.
#[inline]
pub unsafe fn group_dot_neon(
    a: *const f32,
    rhs: [*const f32; BLOCK_FAN_OUT],
    n: usize,
) -> [f32; BLOCK_FAN_OUT] {
    if n == 0 {
        return [0.0; BLOCK_FAN_OUT];
    }
    let [b0, b1, b2, b3] = rhs;

    let mut acc0 = vdupq_n_f32(0.0);
    let mut acc1 = vdupq_n_f32(0.0);
    let mut acc2 = vdupq_n_f32(0.0);
    let mut acc3 = vdupq_n_f32(0.0);

    let mut i = 0;
    while i + 4 <= n {
        let va = vld1q_f32(a.add(i));
        acc0 = vfmaq_f32(acc0, va, vld1q_f32(b0.add(i)));
        acc1 = vfmaq_f32(acc1, va, vld1q_f32(b1.add(i)));
        acc2 = vfmaq_f32(acc2, va, vld1q_f32(b2.add(i)));
        acc3 = vfmaq_f32(acc3, va, vld1q_f32(b3.add(i)));
        i += 4;
    }

    let mut sums = [
        vaddvq_f32(acc0),
        vaddvq_f32(acc1),
        vaddvq_f32(acc2),
        vaddvq_f32(acc3),
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
