//! Hand-written SME kernels
//!
//! Every routine brackets its work in `smstart sm` / `smstop sm`. Leaving
//! streaming mode zeroes the Z, P and FFR registers, so results are moved to
//! general-purpose registers before `smstop`, and every vector and predicate
//! register is declared clobbered.

mod dot_product;
mod group_dot;

pub use dot_product::{dot_product_sme, streaming_vector_lanes};
pub use group_dot::group_dot_sme;
