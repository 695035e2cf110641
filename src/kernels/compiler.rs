//! Kernel compilation and nested-loop execution.

use alloc::vec;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::error::{EinsumError, EinsumResult};
use crate::notation::NormalizedNotation;
use crate::optimization::plan_loop_order;
use crate::tensor::{DType, Tensor, Value};

type IndexBuf = SmallVec<[usize; 8]>;

/// An executable realization of one normalized notation.
///
/// Compilation derives the loop nesting order once; the kernel is then a
/// pure function from operands to outputs and may be reused for any
/// operands whose shapes satisfy the notation's dimension-consistency
/// constraints. One loop is emitted per id, outermost first per the
/// locality plan, and each loop's bound is the dimension size the id is
/// bound to by the operands.
#[derive(Debug, Clone)]
pub struct CompiledKernel {
    notation: NormalizedNotation,
    loop_order: Vec<usize>,
}

impl CompiledKernel {
    /// Compiles a kernel for a normalized notation.
    pub fn compile(notation: NormalizedNotation) -> CompiledKernel {
        let loop_order = plan_loop_order(&notation);
        CompiledKernel {
            notation,
            loop_order,
        }
    }

    /// Returns the notation this kernel was compiled from.
    #[inline]
    pub fn notation(&self) -> &NormalizedNotation {
        &self.notation
    }

    /// Returns the planned loop nesting order, outermost first.
    #[inline]
    pub fn loop_order(&self) -> &[usize] {
        &self.loop_order
    }

    /// Runs the kernel.
    ///
    /// All validation — operand count and rank, dimension consistency,
    /// supplied-output shape and element type — happens before any output
    /// is allocated or written, so an error implies no partial mutation.
    /// Outputs not supplied by the caller are allocated zero-initialized
    /// with the element type promoted across all inputs; supplied outputs
    /// are accumulated into as-is.
    pub fn execute(
        &self,
        inputs: &[&Tensor],
        outputs: Option<Vec<Tensor>>,
    ) -> EinsumResult<Vec<Tensor>> {
        let dims = self.bind_dimensions(inputs)?;

        let mut dtype = inputs[0].dtype();
        for input in &inputs[1..] {
            dtype = DType::promote(dtype, input.dtype());
        }

        let mut outputs = self.prepare_outputs(&dims, dtype, outputs)?;

        let bounds: Vec<usize> = self.loop_order.iter().map(|&id| dims[id]).collect();
        let mut assignment = vec![0usize; self.notation.num_ids()];
        self.run(0, &bounds, &mut assignment, inputs, &mut outputs)?;
        Ok(outputs)
    }

    /// Binds every id to a dimension size, checking that repeated label
    /// occurrences agree within and across operands.
    fn bind_dimensions(&self, inputs: &[&Tensor]) -> EinsumResult<Vec<usize>> {
        let declared = self.notation.inputs();
        if inputs.len() != declared.len() {
            return Err(EinsumError::ArgumentCount {
                expected: declared.len(),
                got: inputs.len(),
            });
        }

        let mut dims = vec![0usize; self.notation.num_ids()];
        let mut bound = vec![false; self.notation.num_ids()];
        for (operand, axes) in declared.iter().enumerate() {
            let shape = inputs[operand].shape();
            if shape.len() != axes.len() {
                return Err(EinsumError::RankMismatch {
                    operand,
                    expected: axes.len(),
                    got: shape.len(),
                });
            }
            for (axis, &id) in axes.iter().enumerate() {
                let size = shape[axis];
                if bound[id] {
                    if dims[id] != size {
                        return Err(EinsumError::DimensionMismatch {
                            label: self.notation.label(id),
                            expected: dims[id],
                            got: size,
                        });
                    }
                } else {
                    dims[id] = size;
                    bound[id] = true;
                }
            }
        }
        Ok(dims)
    }

    fn output_shape(&self, output: usize, dims: &[usize]) -> Vec<usize> {
        self.notation.outputs()[output]
            .iter()
            .map(|&id| dims[id])
            .collect()
    }

    fn prepare_outputs(
        &self,
        dims: &[usize],
        dtype: DType,
        supplied: Option<Vec<Tensor>>,
    ) -> EinsumResult<Vec<Tensor>> {
        let declared = self.notation.outputs();
        match supplied {
            Some(outputs) => {
                if outputs.len() != declared.len() {
                    return Err(EinsumError::OutputCount {
                        expected: declared.len(),
                        got: outputs.len(),
                    });
                }
                for (k, tensor) in outputs.iter().enumerate() {
                    let expected = self.output_shape(k, dims);
                    if tensor.shape() != expected.as_slice() {
                        return Err(EinsumError::OutputShapeMismatch {
                            output: k,
                            expected,
                            got: tensor.shape().to_vec(),
                        });
                    }
                    if tensor.dtype() != dtype {
                        return Err(EinsumError::OutputTypeMismatch {
                            output: k,
                            expected: dtype,
                            got: tensor.dtype(),
                        });
                    }
                }
                Ok(outputs)
            }
            None => Ok((0..declared.len())
                .map(|k| Tensor::zeros(&self.output_shape(k, dims), dtype))
                .collect()),
        }
    }

    fn run(
        &self,
        depth: usize,
        bounds: &[usize],
        assignment: &mut [usize],
        inputs: &[&Tensor],
        outputs: &mut [Tensor],
    ) -> EinsumResult<()> {
        if depth == self.loop_order.len() {
            return self.apply(assignment, inputs, outputs);
        }
        let id = self.loop_order[depth];
        for value in 0..bounds[depth] {
            assignment[id] = value;
            self.run(depth + 1, bounds, assignment, inputs, outputs)?;
        }
        Ok(())
    }

    /// The innermost loop body.
    ///
    /// Every operand element and every output accumulator is read under
    /// the current assignment before any store, then each output's
    /// transform result is written back through its own subscript.
    /// Repeated labels map to the same loop variable, so diagonals fall
    /// out of the addressing.
    fn apply(
        &self,
        assignment: &[usize],
        inputs: &[&Tensor],
        outputs: &mut [Tensor],
    ) -> EinsumResult<()> {
        let mut input_values: SmallVec<[Value; 4]> = SmallVec::with_capacity(inputs.len());
        for (operand, axes) in self.notation.inputs().iter().enumerate() {
            let index: IndexBuf = axes.iter().map(|&id| assignment[id]).collect();
            input_values.push(inputs[operand].get(&index)?);
        }

        let mut output_indices: SmallVec<[IndexBuf; 2]> = SmallVec::with_capacity(outputs.len());
        let mut output_values: SmallVec<[Value; 2]> = SmallVec::with_capacity(outputs.len());
        for (k, axes) in self.notation.outputs().iter().enumerate() {
            let index: IndexBuf = axes.iter().map(|&id| assignment[id]).collect();
            output_values.push(outputs[k].get(&index)?);
            output_indices.push(index);
        }

        for (k, transform) in self.notation.transforms().iter().enumerate() {
            let value = transform.eval(&input_values, &output_values);
            outputs[k].set(&output_indices[k], value)?;
        }
        Ok(())
    }
}
