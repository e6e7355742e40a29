//! Grouped dot product for the standard SIMD backend
//!
//! Four dot products against one shared LHS: each LHS vector is loaded once
//! and multiplied into four accumulators.

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "x86_64")]
mod sse;

#[cfg(target_arch = "aarch64")]
pub use neon::group_dot_neon as compute;
#[cfg(target_arch = "x86_64")]
pub use sse::group_dot_sse as compute;
