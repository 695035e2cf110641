//! Compiled nested-loop kernels.
//!
//! A kernel is built from one normalized notation and one loop-order
//! plan, and executes as a pure function over operand tensors. With the
//! `std` feature, kernels for repeated notations are memoized in a
//! process-wide cache; without it every invocation recompiles, which
//! changes cost but never results.

mod compiler;

#[cfg(feature = "std")]
pub mod cache;

pub use compiler::CompiledKernel;
