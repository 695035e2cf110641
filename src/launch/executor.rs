//! Einsum execution engine.
//!
//! Orchestrates parsing, normalization, kernel compilation, and dispatch,
//! plus the matrix-chain conveniences built on top of the engine.

use alloc::vec;
use alloc::vec::Vec;

use super::config::{ChainStrategy, EinsumConfig};
use crate::error::{EinsumError, EinsumResult};
use crate::kernels::CompiledKernel;
use crate::notation::{parse_einsum, EinsumNotation};
use crate::optimization::{ChainNode, ChainPlan};
use crate::tensor::Tensor;

/// Executes an einsum operation with a single declared output.
///
/// This is the common entry point: `einsum("ij,jk->ik", &[&a, &b])`.
/// Notations declaring several outputs are rejected here; use
/// [`einsum_multi`] for those.
///
/// # Examples
///
/// ```ignore
/// let c = einsum("ij,jk->ik", &[&a, &b])?;        // matrix product
/// let d = einsum("ii->i", &[&m])?;                // diagonal
/// let s = einsum("ij->", &[&m])?;                 // sum of all elements
/// ```
pub fn einsum(notation: &str, inputs: &[&Tensor]) -> EinsumResult<Tensor> {
    let parsed = parse_einsum(notation)?;
    if parsed.num_outputs() != 1 {
        return Err(EinsumError::OutputCount {
            expected: 1,
            got: parsed.num_outputs(),
        });
    }
    let mut outputs = einsum_with(&parsed, inputs, None, &EinsumConfig::default())?;
    Ok(outputs.remove(0))
}

/// Executes an einsum operation, returning all declared outputs in
/// positional order.
pub fn einsum_multi(notation: &str, inputs: &[&Tensor]) -> EinsumResult<Vec<Tensor>> {
    let parsed = parse_einsum(notation)?;
    einsum_with(&parsed, inputs, None, &EinsumConfig::default())
}

/// Executes an einsum operation into caller-supplied output tensors.
///
/// The outputs are validated against the notation-derived shapes and
/// element types before any loop runs, then accumulated into in place and
/// returned.
pub fn einsum_into(
    notation: &str,
    inputs: &[&Tensor],
    outputs: Vec<Tensor>,
) -> EinsumResult<Vec<Tensor>> {
    let parsed = parse_einsum(notation)?;
    einsum_with(&parsed, inputs, Some(outputs), &EinsumConfig::default())
}

/// Executes a pre-parsed notation.
///
/// Validates the operand count, then compiles (or, with the `std` feature
/// and caching enabled, fetches) the kernel for the normalized notation
/// and runs it.
pub fn einsum_with(
    notation: &EinsumNotation,
    inputs: &[&Tensor],
    outputs: Option<Vec<Tensor>>,
    config: &EinsumConfig,
) -> EinsumResult<Vec<Tensor>> {
    if inputs.len() != notation.num_inputs() {
        return Err(EinsumError::ArgumentCount {
            expected: notation.num_inputs(),
            got: inputs.len(),
        });
    }
    let normalized = notation.normalize()?;

    #[cfg(feature = "std")]
    if config.cache_kernels {
        let kernel = crate::kernels::cache::kernel_for(&normalized);
        return kernel.execute(inputs, outputs);
    }
    #[cfg(not(feature = "std"))]
    let _ = config;

    let kernel = CompiledKernel::compile(normalized);
    kernel.execute(inputs, outputs)
}

/// Multiplies two matrices: `einsum("ij,jk->ik", ..)`.
pub fn matmul(a: &Tensor, b: &Tensor) -> EinsumResult<Tensor> {
    einsum("ij,jk->ik", &[a, b])
}

/// Multiplies two matrices into a caller-supplied output.
pub fn matmul_into(a: &Tensor, b: &Tensor, out: Tensor) -> EinsumResult<Tensor> {
    let mut outputs = einsum_into("ij,jk->ik", &[a, b], vec![out])?;
    Ok(outputs.remove(0))
}

/// Multiplies a chain of matrices in the cheapest association order.
///
/// A single operand is returned as-is and a pair is multiplied directly;
/// longer chains go through the dynamic-programming planner and the
/// resulting parenthesization tree is evaluated bottom-up with [`matmul`]
/// at each internal node.
pub fn matmul_chain(operands: &[&Tensor]) -> EinsumResult<Tensor> {
    matmul_chain_with(operands, &EinsumConfig::default())
}

/// Multiplies a chain of matrices under the given configuration.
pub fn matmul_chain_with(operands: &[&Tensor], config: &EinsumConfig) -> EinsumResult<Tensor> {
    match operands {
        [] => Err(EinsumError::NoInputs),
        [only] => Ok(Tensor::clone(only)),
        // Planning a 2-chain would only rediscover the one grouping.
        [a, b] => matmul(a, b),
        _ => match config.chain_strategy {
            ChainStrategy::LeftFold => matmul_chain_naive(operands),
            ChainStrategy::Optimize => {
                let plan = ChainPlan::optimize(&matrix_shapes(operands)?)?;
                execute_node(plan.root(), operands)
            }
        },
    }
}

/// Multiplies a chain of matrices left to right, without planning.
///
/// Produces the same values as [`matmul_chain`] with different
/// intermediate sizes and total cost; kept as the reference for parity
/// checks and benchmarks.
pub fn matmul_chain_naive(operands: &[&Tensor]) -> EinsumResult<Tensor> {
    let Some((first, rest)) = operands.split_first() else {
        return Err(EinsumError::NoInputs);
    };
    let mut accumulator = Tensor::clone(first);
    for operand in rest {
        accumulator = matmul(&accumulator, operand)?;
    }
    Ok(accumulator)
}

fn matrix_shapes(operands: &[&Tensor]) -> EinsumResult<Vec<(usize, usize)>> {
    operands
        .iter()
        .enumerate()
        .map(|(operand, tensor)| match tensor.shape() {
            [rows, cols] => Ok((*rows, *cols)),
            shape => Err(EinsumError::RankMismatch {
                operand,
                expected: 2,
                got: shape.len(),
            }),
        })
        .collect()
}

fn execute_node(node: &ChainNode, operands: &[&Tensor]) -> EinsumResult<Tensor> {
    match node {
        ChainNode::Leaf(position) => Ok(Tensor::clone(operands[*position])),
        ChainNode::Product { left, right } => {
            let lhs = execute_node(left, operands)?;
            let rhs = execute_node(right, operands)?;
            matmul(&lhs, &rhs)
        }
    }
}
