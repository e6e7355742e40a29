//! Scalar backend implementation
//!
//! Plain sequential f32 multiply-accumulate, left to right, one rounding per
//! multiply and one per add. This is the numeric reference the SIMD backends
//! are tested against; it runs on every target.

use crate::primitives::DotKernel;
use crate::region::BLOCK_FAN_OUT;

/// Scalar backend - works everywhere
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarBackend;

impl ScalarBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DotKernel for ScalarBackend {
    fn backend_name(&self) -> &'static str {
        "scalar"
    }

    fn group_dot4(
        &self,
        lhs: &[f32],
        rhs: [&[f32]; BLOCK_FAN_OUT],
        offset_l: usize,
        n: usize,
    ) -> [f32; BLOCK_FAN_OUT] {
        group_dot_scalar4(lhs, rhs, offset_l, n)
    }

    // dot and group_dot4_strided use the trait defaults
}

/// Reference dot product over `lhs[offset_l..][..n]` and `rhs[offset_r..][..n]`
pub fn dot_scalar(lhs: &[f32], rhs: &[f32], offset_l: usize, offset_r: usize, n: usize) -> f32 {
    let a = &lhs[offset_l..offset_l + n];
    let b = &rhs[offset_r..offset_r + n];

    let mut sum = 0.0f32;
    for (&x, &y) in a.iter().zip(b) {
        sum += x * y;
    }
    sum
}

/// Four reference dot products sharing one LHS region
pub fn group_dot_scalar4(
    lhs: &[f32],
    rhs: [&[f32]; BLOCK_FAN_OUT],
    offset_l: usize,
    n: usize,
) -> [f32; BLOCK_FAN_OUT] {
    let a = &lhs[offset_l..offset_l + n];
    let [r0, r1, r2, r3] = rhs.map(|r| &r[..n]);

    let mut sums = [0.0f32; BLOCK_FAN_OUT];
    for i in 0..n {
        let x = a[i];
        sums[0] += x * r0[i];
        sums[1] += x * r1[i];
        sums[2] += x * r2[i];
        sums[3] += x * r3[i];
    }
    sums
}
