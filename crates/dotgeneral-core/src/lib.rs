//! Hardware-adaptive dot-product kernels for tensor contraction
//!
//! This crate implements the innermost operation of a dense contraction
//! engine: sums of elementwise products over contiguous `f32` runs, computed
//! with the widest vector hardware the running machine offers.
//!
//! # Architecture Overview
//!
//! 1. **Capability** - one-time, process-wide detection of the wide-vector
//!    (Arm SME) engine, exposed as an immutable [`Capability`]
//! 2. **Primitives** - the [`DotKernel`] trait and its three backends:
//!    [`ScalarBackend`] (reference), [`StandardBackend`] (SSE2 / NEON) and
//!    [`WideBackend`] (SME streaming SVE)
//! 3. **Inner loop** - the stable four-output signature the contraction
//!    driver calls per block, implemented once per backend
//! 4. **Dispatch** - [`KernelDispatcher`] picks a tier once per contraction
//!    from the capability and the block length
//!
//! # Design Philosophy
//!
//! - **Zero-Cost Dispatch**: the tier is bound once; blocks never re-check it
//! - **No Silent Fallback**: the wide-vector backend panics when absent
//! - **No Hidden Allocations**: kernels only read caller-owned buffers
//!
//! # Example
//!
//! ```rust
//! use dotgeneral_core::{best_inner_loop, KernelDispatcher, DispatchConfig};
//!
//! let lhs = [1.0f32, 2.0, 3.0, 4.0];
//! let rhs = [1.0f32; 16];
//! let output = [10.0f32, 20.0, 30.0, 40.0];
//!
//! // Bind once for the contraction, then call per block
//! let inner = best_inner_loop(4);
//! let sums = inner.call(&lhs, &rhs, &output, 0, 0, 0, 4);
//! assert_eq!(sums, [20.0, 30.0, 40.0, 50.0]);
//!
//! let dispatcher = KernelDispatcher::new(DispatchConfig::default()).unwrap();
//! println!("tier for 4096-element blocks: {}", dispatcher.select_tier(4096));
//! ```

pub mod capability;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod inner_loop;
pub mod primitives;
pub mod region;

// Re-export core types
pub use error::{Error, Result};

pub use capability::{capability, detect_wide_vector_capability, Capability};
pub use config::DispatchConfig;
pub use dispatch::{best_inner_loop, KernelDispatcher};
pub use inner_loop::{
    inner_loop4_scalar, inner_loop4_standard, inner_loop4_wide, inner_loop_for, BoundInnerLoop,
    InnerLoop, InnerLoopFn,
};
pub use primitives::{
    best_backend_name, dot_scalar, dot_standard, dot_wide, group_dot_scalar4,
    group_dot_standard4, group_dot_wide4, DotKernel, ScalarBackend, StandardBackend,
    WideBackend,
};
pub use region::{BlockDescriptor, Pinned, VectorRegion, BLOCK_FAN_OUT};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        best_inner_loop, capability, BoundInnerLoop, Capability, DispatchConfig, DotKernel,
        KernelDispatcher, Result, ScalarBackend, StandardBackend, WideBackend,
    };

    pub use crate::error::Error;
}
