//! High-level einsum API.
//!
//! Entry points for executing notations against tensors, plus the matrix
//! and matrix-chain conveniences.

mod config;
mod executor;

pub use config::{ChainStrategy, EinsumConfig};
pub use executor::{
    einsum, einsum_into, einsum_multi, einsum_with, matmul, matmul_chain, matmul_chain_naive,
    matmul_chain_with, matmul_into,
};
