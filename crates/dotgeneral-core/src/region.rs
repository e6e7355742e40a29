//! Caller-owned vector regions and the pinning guard used around raw kernel calls
//!
//! Kernels never allocate or copy. They read `f32` runs out of buffers owned by
//! the contraction driver, addressed as `(buffer, offset, len)`.
//!
//! Hand-written vector code receives raw pointers, which by themselves carry no
//! lifetime. [`Pinned`] closes that gap: a raw pointer into a buffer can only be
//! obtained through a guard that borrows the buffer, so the storage cannot be
//! moved, resized, or freed until the guard (and with it the call) has ended.

use crate::error::{Error, Result};
use std::marker::PhantomData;

/// Number of outputs produced by one inner-loop call
pub const BLOCK_FAN_OUT: usize = 4;

/// A contiguous run of `len` elements starting at `offset` inside `buffer`
#[derive(Clone, Copy, Debug)]
pub struct VectorRegion<'a> {
    buffer: &'a [f32],
    offset: usize,
    len: usize,
}

impl<'a> VectorRegion<'a> {
    /// Create a region, checking that it lies inside the buffer
    pub fn new(buffer: &'a [f32], offset: usize, len: usize) -> Result<Self> {
        match offset.checked_add(len) {
            Some(end) if end <= buffer.len() => Ok(Self {
                buffer,
                offset,
                len,
            }),
            _ => Err(Error::out_of_bounds(offset, len, buffer.len(), "vector region")),
        }
    }

    /// A region covering the whole buffer
    pub fn whole(buffer: &'a [f32]) -> Self {
        Self {
            buffer,
            offset: 0,
            len: buffer.len(),
        }
    }

    pub fn buffer(&self) -> &'a [f32] {
        self.buffer
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The elements of this region
    pub fn as_slice(&self) -> &'a [f32] {
        &self.buffer[self.offset..self.offset + self.len]
    }
}

/// Scoped guard that keeps a buffer immobile while raw pointers into it are in use.
///
/// The guard holds the shared borrow for `'a`; every pointer it hands out is
/// valid only while the guard is alive. Drop the guard after the low-level call
/// returns, never before.
#[derive(Debug)]
pub struct Pinned<'a> {
    ptr: *const f32,
    len: usize,
    _borrow: PhantomData<&'a [f32]>,
}

impl<'a> Pinned<'a> {
    /// Pin a buffer for the duration of the guard
    #[inline]
    pub fn new(buffer: &'a [f32]) -> Self {
        Self {
            ptr: buffer.as_ptr(),
            len: buffer.len(),
            _borrow: PhantomData,
        }
    }

    /// Length of the pinned buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw pointer to element `offset`.
    ///
    /// Only the bounds of the starting element are checked in debug builds;
    /// the caller guarantees the whole run it reads lies inside the buffer.
    #[inline]
    pub fn ptr_at(&self, offset: usize) -> *const f32 {
        debug_assert!(
            offset <= self.len,
            "offset {offset} outside pinned buffer of length {}",
            self.len
        );
        self.ptr.wrapping_add(offset)
    }

    /// Check that `[offset, offset + n)` lies inside the pinned buffer
    #[inline]
    pub fn covers(&self, offset: usize, n: usize) -> bool {
        offset.checked_add(n).is_some_and(|end| end <= self.len)
    }
}

/// One inner-loop call's worth of operands.
///
/// A shared LHS region of `block_dim` elements, four RHS sub-regions of
/// `block_dim` elements laid out back to back, and the four accumulator seeds
/// read from the output buffer.
#[derive(Clone, Copy, Debug)]
pub struct BlockDescriptor<'a> {
    lhs: VectorRegion<'a>,
    rhs: [VectorRegion<'a>; BLOCK_FAN_OUT],
    seeds: [f32; BLOCK_FAN_OUT],
}

impl<'a> BlockDescriptor<'a> {
    /// Build a block from the flat buffers an inner loop receives.
    ///
    /// Validates every region against its buffer, so kernels fed from a
    /// descriptor can never read out of bounds.
    pub fn from_flat(
        lhs: &'a [f32],
        rhs: &'a [f32],
        output: &[f32],
        lhs_offset: usize,
        rhs_offset: usize,
        output_offset: usize,
        block_dim: usize,
    ) -> Result<Self> {
        let lhs_region = VectorRegion::new(lhs, lhs_offset, block_dim)?;

        let mut rhs_regions = [VectorRegion::whole(&rhs[..0]); BLOCK_FAN_OUT];
        for (k, region) in rhs_regions.iter_mut().enumerate() {
            let start = block_dim
                .checked_mul(k)
                .and_then(|step| rhs_offset.checked_add(step))
                .ok_or_else(|| Error::out_of_bounds(rhs_offset, block_dim, rhs.len(), "rhs"))?;
            *region = VectorRegion::new(rhs, start, block_dim).map_err(|_| {
                Error::out_of_bounds(start, block_dim, rhs.len(), &format!("rhs block {k}"))
            })?;
        }

        let seeds = output
            .get(output_offset..output_offset.saturating_add(BLOCK_FAN_OUT))
            .filter(|s| s.len() == BLOCK_FAN_OUT)
            .ok_or_else(|| {
                Error::out_of_bounds(output_offset, BLOCK_FAN_OUT, output.len(), "output seeds")
            })?;

        Ok(Self {
            lhs: lhs_region,
            rhs: rhs_regions,
            seeds: [seeds[0], seeds[1], seeds[2], seeds[3]],
        })
    }

    /// Build a block from explicit regions and seeds
    pub fn new(
        lhs: VectorRegion<'a>,
        rhs: [VectorRegion<'a>; BLOCK_FAN_OUT],
        seeds: [f32; BLOCK_FAN_OUT],
    ) -> Result<Self> {
        for (k, region) in rhs.iter().enumerate() {
            if region.len() != lhs.len() {
                return Err(Error::InvalidInput(format!(
                    "rhs block {k} has length {}, lhs has length {}",
                    region.len(),
                    lhs.len()
                )));
            }
        }
        Ok(Self { lhs, rhs, seeds })
    }

    pub fn lhs(&self) -> VectorRegion<'a> {
        self.lhs
    }

    pub fn rhs(&self) -> &[VectorRegion<'a>; BLOCK_FAN_OUT] {
        &self.rhs
    }

    pub fn seeds(&self) -> [f32; BLOCK_FAN_OUT] {
        self.seeds
    }

    /// Common length of every region in the block
    pub fn block_dim(&self) -> usize {
        self.lhs.len()
    }
}
