//! Hardware-adaptive dot-product kernels for dense tensor contraction
//!
//! This crate re-exports [`dotgeneral_core`]. See that crate for the
//! capability detector, the kernel backends, and the inner-loop adapter.
//!
//! ```rust
//! use dotgeneral::prelude::*;
//!
//! let a = vec![1.0f32; 512];
//! let b = vec![2.0f32; 4 * 512];
//! let seeds = [0.0f32; 4];
//!
//! let inner = best_inner_loop(512);
//! let sums = inner.call(&a, &b, &seeds, 0, 0, 0, 512);
//! assert!(sums.iter().all(|s| (s - 1024.0).abs() < 1e-3));
//! ```

pub use dotgeneral_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use dotgeneral_core::prelude::*;
}
