//! Dot product operation for the standard SIMD backend
//!
//! Computes sum(a[i] * b[i]) with four independent 4-lane accumulators,
//! a single-accumulator pass for the remaining full vectors, and a scalar tail.

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "x86_64")]
mod sse;

#[cfg(target_arch = "aarch64")]
pub use neon::dot_product_neon as compute;
#[cfg(target_arch = "x86_64")]
pub use sse::dot_product_sse as compute;
