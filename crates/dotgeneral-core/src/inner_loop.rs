//! The inner-loop adapter: four seeded dot products per call
//!
//! The contraction driver calls one function per 4-output block:
//!
//! ```text
//! (lhs, rhs, output, lhs_offset, rhs_offset, output_offset, block_dim) -> [sum0, sum1, sum2, sum3]
//! ```
//!
//! `sum_k = output[output_offset + k] + dot(lhs[lhs_offset..][..block_dim],
//! rhs[rhs_offset + k * block_dim..][..block_dim])`. The output buffer is only
//! read; storing the sums back is the driver's job. The same signature is
//! implemented once per kernel tier, and the driver binds one of them for a
//! whole contraction.

use crate::capability::Capability;
use crate::primitives::{group_dot_wide4, DotKernel, ScalarBackend, StandardBackend, WideBackend};
use crate::region::{BlockDescriptor, BLOCK_FAN_OUT};
use std::fmt;

/// Signature shared by every inner-loop implementation
pub type InnerLoopFn =
    fn(&[f32], &[f32], &[f32], usize, usize, usize, usize) -> [f32; BLOCK_FAN_OUT];

/// Generic adapter that turns any [`DotKernel`] into an inner loop
#[derive(Clone, Copy, Debug)]
pub struct InnerLoop<K: DotKernel> {
    kernel: K,
}

impl<K: DotKernel> InnerLoop<K> {
    pub fn new(kernel: K) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Run one block addressed inside flat buffers
    #[inline]
    pub fn run(
        &self,
        lhs: &[f32],
        rhs: &[f32],
        output: &[f32],
        lhs_offset: usize,
        rhs_offset: usize,
        output_offset: usize,
        block_dim: usize,
    ) -> [f32; BLOCK_FAN_OUT] {
        let seeds = read_seeds(output, output_offset);
        let dots = self.kernel.group_dot4_strided(
            lhs,
            rhs,
            lhs_offset,
            rhs_offset,
            block_dim,
            block_dim,
        );
        accumulate(seeds, dots)
    }

    /// Run one pre-validated block
    pub fn run_block(&self, block: &BlockDescriptor<'_>) -> [f32; BLOCK_FAN_OUT] {
        let lhs = block.lhs();
        let rhs = block.rhs();
        let rhs_slices = [
            rhs[0].as_slice(),
            rhs[1].as_slice(),
            rhs[2].as_slice(),
            rhs[3].as_slice(),
        ];
        let dots = self
            .kernel
            .group_dot4(lhs.buffer(), rhs_slices, lhs.offset(), lhs.len());
        accumulate(block.seeds(), dots)
    }
}

#[inline]
fn read_seeds(output: &[f32], output_offset: usize) -> [f32; BLOCK_FAN_OUT] {
    let seeds = &output[output_offset..output_offset + BLOCK_FAN_OUT];
    [seeds[0], seeds[1], seeds[2], seeds[3]]
}

#[inline]
fn accumulate(seeds: [f32; BLOCK_FAN_OUT], dots: [f32; BLOCK_FAN_OUT]) -> [f32; BLOCK_FAN_OUT] {
    [
        seeds[0] + dots[0],
        seeds[1] + dots[1],
        seeds[2] + dots[2],
        seeds[3] + dots[3],
    ]
}

/// Inner loop on the scalar reference kernel
pub fn inner_loop4_scalar(
    lhs: &[f32],
    rhs: &[f32],
    output: &[f32],
    lhs_offset: usize,
    rhs_offset: usize,
    output_offset: usize,
    block_dim: usize,
) -> [f32; BLOCK_FAN_OUT] {
    InnerLoop::new(ScalarBackend).run(
        lhs,
        rhs,
        output,
        lhs_offset,
        rhs_offset,
        output_offset,
        block_dim,
    )
}

/// Inner loop on the standard SIMD kernel
///
/// # Panics
/// Panics on targets without a standard SIMD backend.
pub fn inner_loop4_standard(
    lhs: &[f32],
    rhs: &[f32],
    output: &[f32],
    lhs_offset: usize,
    rhs_offset: usize,
    output_offset: usize,
    block_dim: usize,
) -> [f32; BLOCK_FAN_OUT] {
    InnerLoop::new(StandardBackend::new()).run(
        lhs,
        rhs,
        output,
        lhs_offset,
        rhs_offset,
        output_offset,
        block_dim,
    )
}

/// Inner loop on the wide-vector kernel, all four products in one engine bracket
///
/// # Panics
/// Panics if the wide-vector capability is absent, even for `block_dim == 0`.
pub fn inner_loop4_wide(
    lhs: &[f32],
    rhs: &[f32],
    output: &[f32],
    lhs_offset: usize,
    rhs_offset: usize,
    output_offset: usize,
    block_dim: usize,
) -> [f32; BLOCK_FAN_OUT] {
    let seeds = read_seeds(output, output_offset);
    let dots = group_dot_wide4(lhs, rhs, rhs_offset, block_dim, lhs_offset, block_dim);
    accumulate(seeds, dots)
}

/// Inner-loop function for a tier, without checking availability
pub fn inner_loop_for(tier: Capability) -> InnerLoopFn {
    match tier {
        Capability::Scalar => inner_loop4_scalar,
        Capability::Standard => inner_loop4_standard,
        Capability::Wide => inner_loop4_wide,
    }
}

/// An inner loop bound to one tier for the duration of a contraction
///
/// Cheap to copy and safe to share across worker threads; calling it is a
/// single indirect call with no per-call capability check.
#[derive(Clone, Copy)]
pub struct BoundInnerLoop {
    tier: Capability,
    func: InnerLoopFn,
}

impl BoundInnerLoop {
    pub(crate) fn new(tier: Capability) -> Self {
        Self {
            tier,
            func: inner_loop_for(tier),
        }
    }

    /// Tier this loop was bound to
    pub fn tier(&self) -> Capability {
        self.tier
    }

    /// The bound function itself
    pub fn as_fn(&self) -> InnerLoopFn {
        self.func
    }

    /// Compute four seeded dot products for one block
    #[inline]
    pub fn call(
        &self,
        lhs: &[f32],
        rhs: &[f32],
        output: &[f32],
        lhs_offset: usize,
        rhs_offset: usize,
        output_offset: usize,
        block_dim: usize,
    ) -> [f32; BLOCK_FAN_OUT] {
        (self.func)(
            lhs,
            rhs,
            output,
            lhs_offset,
            rhs_offset,
            output_offset,
            block_dim,
        )
    }

    /// Compute four seeded dot products for a validated block
    pub fn call_block(&self, block: &BlockDescriptor<'_>) -> [f32; BLOCK_FAN_OUT] {
        let lhs = block.lhs();
        let rhs = block.rhs();
        // A descriptor's RHS regions may live anywhere; the flat contract
        // needs them back to back, which holds when built with from_flat.
        let contiguous = rhs.windows(2).all(|w| {
            std::ptr::eq(w[0].buffer(), w[1].buffer())
                && w[1].offset() == w[0].offset() + w[0].len()
        });
        if contiguous {
            let seeds = block.seeds();
            let rhs0 = rhs[0];
            let dots = (self.func)(
                lhs.buffer(),
                rhs0.buffer(),
                &seeds,
                lhs.offset(),
                rhs0.offset(),
                0,
                lhs.len(),
            );
            return dots;
        }
        match self.tier {
            Capability::Scalar => InnerLoop::new(ScalarBackend).run_block(block),
            Capability::Standard => InnerLoop::new(StandardBackend::new()).run_block(block),
            Capability::Wide => InnerLoop::new(WideBackend::new()).run_block(block),
        }
    }
}

impl fmt::Debug for BoundInnerLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundInnerLoop")
            .field("tier", &self.tier)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::capability;

    #[test]
    fn test_seeded_scenario() {
        let lhs = [1.0f32, 2.0, 3.0, 4.0];
        let rhs = [1.0f32; 16];
        let output = [10.0f32, 20.0, 30.0, 40.0];

        let sums = inner_loop4_scalar(&lhs, &rhs, &output, 0, 0, 0, 4);
        assert_eq!(sums, [20.0, 30.0, 40.0, 50.0]);
        // output is untouched
        assert_eq!(output, [10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_offsets_select_subregions() {
        let lhs = [0.0f32, 0.0, 1.0, 1.0];
        let rhs: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let output = [0.0f32, 100.0, 200.0, 300.0, 400.0];

        // lhs [1, 1], rhs blocks start at 2: [2,3] [4,5] [6,7] [8,9]
        let sums = inner_loop4_scalar(&lhs, &rhs, &output, 2, 2, 1, 2);
        assert_eq!(sums, [105.0, 209.0, 313.0, 417.0]);
    }

    #[test]
    fn test_zero_block_returns_seeds() {
        let output = [1.5f32, -2.0, 0.0, 7.25];
        let sums = inner_loop4_scalar(&[], &[], &output, 0, 0, 0, 0);
        assert_eq!(sums, output);
    }

    #[test]
    fn test_every_available_tier_agrees() {
        let n = 96;
        let lhs: Vec<f32> = (0..n).map(|i| (i % 9) as f32 * 0.5).collect();
        let rhs: Vec<f32> = (0..4 * n).map(|i| ((i % 4) as f32) - 1.5).collect();
        let output = [1.0f32, 2.0, 3.0, 4.0];

        let reference = inner_loop4_scalar(&lhs, &rhs, &output, 0, 0, 0, n);
        for tier in capability().tiers_down() {
            let sums = BoundInnerLoop::new(tier).call(&lhs, &rhs, &output, 0, 0, 0, n);
            for k in 0..4 {
                approx::assert_relative_eq!(sums[k], reference[k], epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_call_block_matches_flat() {
        let lhs = [1.0f32, 2.0, 3.0, 4.0];
        let rhs = [1.0f32; 16];
        let output = [10.0f32, 20.0, 30.0, 40.0];
        let block = BlockDescriptor::from_flat(&lhs, &rhs, &output, 0, 0, 0, 4).unwrap();

        let bound = BoundInnerLoop::new(Capability::Scalar);
        assert_eq!(bound.call_block(&block), [20.0, 30.0, 40.0, 50.0]);
        assert_eq!(
            InnerLoop::new(ScalarBackend).run_block(&block),
            [20.0, 30.0, 40.0, 50.0]
        );
    }

    #[test]
    fn test_call_block_scattered_rhs() {
        use crate::region::VectorRegion;

        let lhs = [1.0f32, 1.0];
        let a = [1.0f32, 2.0];
        let b = [3.0f32, 4.0];
        let l = VectorRegion::whole(&lhs);
        let rhs = [
            VectorRegion::whole(&a),
            VectorRegion::whole(&b),
            VectorRegion::whole(&a),
            VectorRegion::whole(&b),
        ];
        let block = BlockDescriptor::new(l, rhs, [0.0, 1.0, 2.0, 3.0]).unwrap();
        let sums = BoundInnerLoop::new(Capability::Scalar).call_block(&block);
        assert_eq!(sums, [3.0, 8.0, 5.0, 10.0]);
    }

    #[test]
    fn test_inner_loop_for_tiers() {
        let lhs = [2.0f32; 4];
        let rhs = [0.5f32; 16];
        let output = [0.0f32; 4];
        let f = inner_loop_for(Capability::Scalar);
        assert_eq!(f(&lhs, &rhs, &output, 0, 0, 0, 4), [4.0; 4]);
        assert_eq!(
            format!("{:?}", BoundInnerLoop::new(Capability::Scalar)),
            "BoundInnerLoop { tier: Scalar }"
        );
    }
}
