//! # einloop
//!
//! A naive-but-correct Einstein-summation engine. Notations are parsed
//! into a canonical integer-id form, a locality planner picks the loop
//! nesting order, and a compiled nested-loop kernel evaluates each
//! output's transform expression at the innermost level. Matrix chains
//! get a dynamic-programming planner that picks the cheapest
//! parenthesization before multiplying.
//!
//! The engine trades throughput for expressiveness: one general kernel
//! covers products, contractions, diagonals, reductions, and custom
//! per-output transforms, with automatic loop-order and association-order
//! selection.
//!
//! ## Example
//!
//! ```ignore
//! use einloop::{einsum, matmul_chain, Tensor};
//!
//! // Matrix multiplication
//! let c = einsum("ij,jk->ik", &[&a, &b])?;
//!
//! // Diagonal, then sum
//! let d = einsum("ii->i", &[&m])?;
//! let s = einsum("i->", &[&d])?;
//!
//! // Cheapest association order for a chain
//! let p = matmul_chain(&[&a, &b, &c])?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod kernels;
pub mod launch;
pub mod notation;
pub mod optimization;
pub mod tensor;

pub use error::{EinsumError, EinsumResult};
pub use kernels::CompiledKernel;
pub use launch::{
    einsum, einsum_into, einsum_multi, matmul, matmul_chain, matmul_chain_naive,
    matmul_chain_with, ChainStrategy, EinsumConfig,
};
pub use notation::{parse_einsum, EinsumNotation, NormalizedNotation, Subscript};
pub use optimization::{plan_loop_order, ChainNode, ChainPlan};
pub use tensor::{DType, Tensor, Value};
