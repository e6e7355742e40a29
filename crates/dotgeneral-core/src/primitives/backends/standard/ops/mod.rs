//! Operation-centric modules for the standard SIMD backend
//!
//! Each operation has one implementation per instruction set; the safe
//! wrappers here pick the one compiled for the current target.

#![cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]

pub mod dot_product;
pub mod group_dot;

use crate::region::BLOCK_FAN_OUT;

/// Dot product of two equal-length slices
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len().min(b.len());
    // Safety: SSE2 and NEON are baseline for their architectures, and both
    // slices hold at least n elements.
    unsafe { dot_product::compute(a.as_ptr(), b.as_ptr(), n) }
}

/// Four dot products of `a` against four equal-length slices
#[inline]
pub fn group_dot(a: &[f32], rhs: [&[f32]; BLOCK_FAN_OUT]) -> [f32; BLOCK_FAN_OUT] {
    let n = rhs.iter().fold(a.len(), |n, r| n.min(r.len()));
    debug_assert_eq!(n, a.len());
    // Safety: as above; every slice holds at least n elements.
    unsafe { group_dot::compute(a.as_ptr(), rhs.map(|r| r.as_ptr()), n) }
}
