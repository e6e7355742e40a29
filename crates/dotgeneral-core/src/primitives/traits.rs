//! The architecture kernel trait shared by every backend

use super::backends::scalar;
use crate::region::BLOCK_FAN_OUT;

/// Dot-product primitives with compile-time dispatch
///
/// Every backend (scalar, standard SIMD, wide vector) implements the same
/// operations, so the inner-loop adapter can be written once and monomorphized
/// per backend. The default bodies are the scalar reference implementation.
///
/// Offsets and lengths are in elements. A region that runs past the end of its
/// slice is a caller bug; the safe entry points panic on it rather than read
/// out of bounds.
pub trait DotKernel: Clone + Copy + Send + Sync {
    /// Get the name of this backend
    fn backend_name(&self) -> &'static str;

    /// Number of f32 lanes processed per vector instruction
    fn simd_width(&self) -> usize {
        1
    }

    /// Σ lhs[offset_l + i] * rhs[offset_r + i] for i in 0..n
    fn dot(&self, lhs: &[f32], rhs: &[f32], offset_l: usize, offset_r: usize, n: usize) -> f32 {
        scalar::dot_scalar(lhs, rhs, offset_l, offset_r, n)
    }

    /// Four dot products of one LHS region against four separate RHS vectors,
    /// each read from its start
    fn group_dot4(
        &self,
        lhs: &[f32],
        rhs: [&[f32]; BLOCK_FAN_OUT],
        offset_l: usize,
        n: usize,
    ) -> [f32; BLOCK_FAN_OUT] {
        rhs.map(|r| self.dot(lhs, r, offset_l, 0, n))
    }

    /// Four dot products of one LHS region against RHS regions starting at
    /// `offset_r`, `offset_r + stride`, `offset_r + 2 * stride` and
    /// `offset_r + 3 * stride` of the same buffer
    fn group_dot4_strided(
        &self,
        lhs: &[f32],
        rhs: &[f32],
        offset_l: usize,
        offset_r: usize,
        stride: usize,
        n: usize,
    ) -> [f32; BLOCK_FAN_OUT] {
        [0, 1, 2, 3].map(|k| self.dot(lhs, rhs, offset_l, offset_r + k * stride, n))
    }
}
