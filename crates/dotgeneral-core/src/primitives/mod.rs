//! Dot-product primitives with compile-time dispatch
//!
//! # Architecture
//!
//! - Single `DotKernel` trait for all operations
//! - Concrete backend types: `ScalarBackend`, `StandardBackend`, `WideBackend`
//! - Runtime validation happens once, when a backend is constructed
//! - Zero-cost abstractions - no heap allocation or dynamic dispatch
//!
//! # Usage
//!
//! ```rust
//! use dotgeneral_core::primitives::{DotKernel, ScalarBackend};
//!
//! let a = vec![1.0f32; 512];
//! let b = vec![2.0f32; 512];
//! assert_eq!(ScalarBackend::new().dot(&a, &b, 0, 0, 512), 1024.0);
//! ```

pub mod backends;
pub mod traits;

pub use backends::{
    best_backend_name, is_tier_available, ScalarBackend, StandardBackend, WideBackend,
};
pub use backends::scalar::{dot_scalar, group_dot_scalar4};
pub use backends::standard::{dot_standard, group_dot_standard4};
pub use backends::wide::{dot_wide, group_dot_wide4, streaming_lanes};
pub use traits::DotKernel;

/// Create a scalar backend (always available)
pub fn scalar_backend() -> ScalarBackend {
    ScalarBackend::new()
}

/// Create a standard SIMD backend (panics if the target has none)
pub fn standard_backend() -> StandardBackend {
    StandardBackend::new()
}

/// Create a wide-vector backend (panics if SME is not available)
pub fn wide_backend() -> WideBackend {
    WideBackend::new()
}
