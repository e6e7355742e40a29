//! Wide-vector backend (Arm SME, streaming SVE)
//!
//! Each call enters streaming mode (`smstart sm`), runs a predicated SVE
//! multiply-accumulate loop at the streaming vector length, reduces, and
//! leaves streaming mode again (`smstop sm`). The mode switch is a fixed cost
//! of every call, which is why [`group_dot_wide4`] exists: it produces four
//! results inside a single switch.
//!
//! This backend never falls back. Calling any entry point on a machine where
//! [`detect_wide_vector_capability`] is false panics, so a driver that forgot
//! to branch on the capability fails loudly instead of silently running slow
//! or wrong code.

#[cfg(all(target_arch = "aarch64", not(feature = "no-wide")))]
mod ops;

use crate::capability::detect_wide_vector_capability;
use crate::error::{Error, Result};
use crate::primitives::DotKernel;
use crate::region::{Pinned, BLOCK_FAN_OUT};

/// SME streaming-SVE backend
#[derive(Clone, Copy, Debug)]
pub struct WideBackend {
    _private: (),
}

impl WideBackend {
    /// Create a new wide-vector backend
    ///
    /// # Panics
    /// Panics if the machine has no wide-vector capability
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        assert_wide_available();
        Self { _private: () }
    }

    /// Create a new wide-vector backend, or report why it cannot run here
    pub fn try_new() -> Result<Self> {
        if Self::is_available() {
            Ok(Self { _private: () })
        } else {
            Err(Error::unavailable("wide-vector (SME)"))
        }
    }

    /// Check if the wide-vector engine is usable in this process
    pub fn is_available() -> bool {
        detect_wide_vector_capability()
    }
}

impl DotKernel for WideBackend {
    fn backend_name(&self) -> &'static str {
        "sme"
    }

    fn simd_width(&self) -> usize {
        streaming_lanes()
    }

    fn dot(&self, lhs: &[f32], rhs: &[f32], offset_l: usize, offset_r: usize, n: usize) -> f32 {
        dot_wide(lhs, rhs, offset_l, offset_r, n)
    }

    fn group_dot4(
        &self,
        lhs: &[f32],
        rhs: [&[f32]; BLOCK_FAN_OUT],
        offset_l: usize,
        n: usize,
    ) -> [f32; BLOCK_FAN_OUT] {
        assert_wide_available();
        if n == 0 {
            return [0.0; BLOCK_FAN_OUT];
        }
        let lhs_pin = Pinned::new(lhs);
        let rhs_pins = rhs.map(Pinned::new);
        assert!(lhs_pin.covers(offset_l, n), "lhs region out of bounds");
        assert!(
            rhs_pins.iter().all(|p| p.covers(0, n)),
            "rhs region out of bounds"
        );
        let starts = [0, 1, 2, 3].map(|k| rhs_pins[k].ptr_at(0));
        group_dot_pinned(&lhs_pin, offset_l, starts, n)
    }

    fn group_dot4_strided(
        &self,
        lhs: &[f32],
        rhs: &[f32],
        offset_l: usize,
        offset_r: usize,
        stride: usize,
        n: usize,
    ) -> [f32; BLOCK_FAN_OUT] {
        group_dot_wide4(lhs, rhs, offset_r, stride, offset_l, n)
    }
}

/// Single dot product on the wide-vector engine
///
/// # Panics
/// Panics if the wide-vector capability is absent or a region is out of bounds.
pub fn dot_wide(lhs: &[f32], rhs: &[f32], offset_l: usize, offset_r: usize, n: usize) -> f32 {
    assert_wide_available();
    if n == 0 {
        return 0.0;
    }
    let lhs_pin = Pinned::new(lhs);
    let rhs_pin = Pinned::new(rhs);
    assert!(lhs_pin.covers(offset_l, n), "lhs region out of bounds");
    assert!(rhs_pin.covers(offset_r, n), "rhs region out of bounds");

    #[cfg(all(target_arch = "aarch64", not(feature = "no-wide")))]
    {
        // Safety: capability checked above; both runs lie inside buffers that
        // stay borrowed by the pins until this call returns.
        unsafe { ops::dot_product_sme(lhs_pin.ptr_at(offset_l), rhs_pin.ptr_at(offset_r), n) }
    }
    #[cfg(not(all(target_arch = "aarch64", not(feature = "no-wide"))))]
    {
        unreachable!("wide-vector capability reported on a build without SME kernels")
    }
}

/// Four dot products of one LHS region against four RHS regions at a fixed
/// element stride, computed inside one streaming-mode bracket
///
/// The RHS regions start at `rhs_offset`, `rhs_offset + stride`,
/// `rhs_offset + 2 * stride` and `rhs_offset + 3 * stride` of `rhs`.
///
/// # Panics
/// Panics if the wide-vector capability is absent or a region is out of bounds.
pub fn group_dot_wide4(
    lhs: &[f32],
    rhs: &[f32],
    rhs_offset: usize,
    stride: usize,
    offset_l: usize,
    n: usize,
) -> [f32; BLOCK_FAN_OUT] {
    assert_wide_available();
    if n == 0 {
        return [0.0; BLOCK_FAN_OUT];
    }
    let lhs_pin = Pinned::new(lhs);
    let rhs_pin = Pinned::new(rhs);
    assert!(lhs_pin.covers(offset_l, n), "lhs region out of bounds");
    let last = stride
        .checked_mul(BLOCK_FAN_OUT - 1)
        .and_then(|s| s.checked_add(rhs_offset));
    assert!(
        last.is_some_and(|start| rhs_pin.covers(start, n)) && rhs_pin.covers(rhs_offset, n),
        "rhs region out of bounds"
    );
    let starts = [0, 1, 2, 3].map(|k| rhs_pin.ptr_at(rhs_offset + k * stride));
    group_dot_pinned(&lhs_pin, offset_l, starts, n)
}

fn group_dot_pinned(
    lhs: &Pinned<'_>,
    offset_l: usize,
    rhs: [*const f32; BLOCK_FAN_OUT],
    n: usize,
) -> [f32; BLOCK_FAN_OUT] {
    #[cfg(all(target_arch = "aarch64", not(feature = "no-wide")))]
    {
        // Safety: capability and bounds checked by the callers; the pins they
        // hold keep every buffer in place until this returns.
        unsafe { ops::group_dot_sme(lhs.ptr_at(offset_l), rhs, n) }
    }
    #[cfg(not(all(target_arch = "aarch64", not(feature = "no-wide"))))]
    {
        let _ = (lhs, offset_l, rhs, n);
        unreachable!("wide-vector capability reported on a build without SME kernels")
    }
}

/// Number of f32 lanes at the streaming vector length (0 when unavailable)
pub fn streaming_lanes() -> usize {
    if !WideBackend::is_available() {
        return 0;
    }
    #[cfg(all(target_arch = "aarch64", not(feature = "no-wide")))]
    {
        // Safety: capability checked above.
        unsafe { ops::streaming_vector_lanes() }
    }
    #[cfg(not(all(target_arch = "aarch64", not(feature = "no-wide"))))]
    {
        0
    }
}

#[inline]
#[track_caller]
fn assert_wide_available() {
    if !detect_wide_vector_capability() {
        panic!("wide-vector backend requested but SME is not available on this machine");
    }
}
