//! Ordering optimizers for einsum execution.
//!
//! Two independent planners live here:
//! - loop-order planning: a pairwise-locality sort that nests the most
//!   cache-friendly loop innermost,
//! - chain planning: dynamic programming over contiguous sub-chains that
//!   picks the cheapest parenthesization for a matrix product chain.

mod chain;
mod order;

pub use chain::{naive_cost, ChainNode, ChainPlan};
pub use order::plan_loop_order;
