//! Dense row-major tensor storage.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use half::f16;

use super::dtype::{DType, Value};
use crate::error::{EinsumError, EinsumResult};

/// Typed element storage, one variant per [`DType`].
#[derive(Debug, Clone, PartialEq)]
enum TensorData {
    I32(Vec<i32>),
    I64(Vec<i64>),
    F16(Vec<f16>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl TensorData {
    fn zeros(dtype: DType, len: usize) -> TensorData {
        match dtype {
            DType::I32 => TensorData::I32(vec![0; len]),
            DType::I64 => TensorData::I64(vec![0; len]),
            DType::F16 => TensorData::F16(vec![f16::ZERO; len]),
            DType::F32 => TensorData::F32(vec![0.0; len]),
            DType::F64 => TensorData::F64(vec![0.0; len]),
        }
    }

    fn dtype(&self) -> DType {
        match self {
            TensorData::I32(_) => DType::I32,
            TensorData::I64(_) => DType::I64,
            TensorData::F16(_) => DType::F16,
            TensorData::F32(_) => DType::F32,
            TensorData::F64(_) => DType::F64,
        }
    }

    fn len(&self) -> usize {
        match self {
            TensorData::I32(v) => v.len(),
            TensorData::I64(v) => v.len(),
            TensorData::F16(v) => v.len(),
            TensorData::F32(v) => v.len(),
            TensorData::F64(v) => v.len(),
        }
    }

    fn get(&self, offset: usize) -> Value {
        match self {
            TensorData::I32(v) => Value::I32(v[offset]),
            TensorData::I64(v) => Value::I64(v[offset]),
            TensorData::F16(v) => Value::F16(v[offset]),
            TensorData::F32(v) => Value::F32(v[offset]),
            TensorData::F64(v) => Value::F64(v[offset]),
        }
    }

    fn set(&mut self, offset: usize, value: Value) {
        match self {
            TensorData::I32(v) => v[offset] = value.to_i64() as i32,
            TensorData::I64(v) => v[offset] = value.to_i64(),
            TensorData::F16(v) => v[offset] = f16::from_f64(value.to_f64()),
            TensorData::F32(v) => v[offset] = value.to_f64() as f32,
            TensorData::F64(v) => v[offset] = value.to_f64(),
        }
    }
}

/// A dense N-dimensional array with an ordered shape and a typed flat
/// backing store.
///
/// The shape is fixed at creation; `size == product(shape)` always holds.
/// A rank-0 tensor holds exactly one element and is addressed by the empty
/// multi-index.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Vec<usize>,
    strides: Vec<usize>,
    data: TensorData,
}

/// Computes row-major strides for a shape.
pub(crate) fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Advances a multi-index through a shape in row-major order.
///
/// Returns false once the index wraps past the last position.
pub(crate) fn next_index(shape: &[usize], index: &mut [usize]) -> bool {
    for axis in (0..shape.len()).rev() {
        index[axis] += 1;
        if index[axis] < shape[axis] {
            return true;
        }
        index[axis] = 0;
    }
    false
}

impl Tensor {
    /// Allocates a zero-initialized tensor.
    pub fn zeros(shape: &[usize], dtype: DType) -> Tensor {
        let len = shape.iter().product();
        Tensor {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            data: TensorData::zeros(dtype, len),
        }
    }

    fn from_data(shape: &[usize], data: TensorData) -> EinsumResult<Tensor> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(EinsumError::ElementCount {
                expected,
                got: data.len(),
            });
        }
        Ok(Tensor {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            data,
        })
    }

    /// Builds an f64 tensor from row-major element data.
    pub fn from_f64(shape: &[usize], data: Vec<f64>) -> EinsumResult<Tensor> {
        Self::from_data(shape, TensorData::F64(data))
    }

    /// Builds an f32 tensor from row-major element data.
    pub fn from_f32(shape: &[usize], data: Vec<f32>) -> EinsumResult<Tensor> {
        Self::from_data(shape, TensorData::F32(data))
    }

    /// Builds an i64 tensor from row-major element data.
    pub fn from_i64(shape: &[usize], data: Vec<i64>) -> EinsumResult<Tensor> {
        Self::from_data(shape, TensorData::I64(data))
    }

    /// Builds an i32 tensor from row-major element data.
    pub fn from_i32(shape: &[usize], data: Vec<i32>) -> EinsumResult<Tensor> {
        Self::from_data(shape, TensorData::I32(data))
    }

    /// Returns the ordered dimension sizes.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the element type tag.
    #[inline]
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// Returns the number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the tensor holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    fn offset(&self, index: &[usize]) -> EinsumResult<usize> {
        if index.len() != self.shape.len()
            || index.iter().zip(&self.shape).any(|(&i, &d)| i >= d)
        {
            return Err(EinsumError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape.clone(),
            });
        }
        Ok(index.iter().zip(&self.strides).map(|(&i, &s)| i * s).sum())
    }

    /// Reads the element at a multi-index, bounds-checked.
    pub fn get(&self, index: &[usize]) -> EinsumResult<Value> {
        Ok(self.data.get(self.offset(index)?))
    }

    /// Writes the element at a multi-index, converting to this tensor's
    /// element type.
    pub fn set(&mut self, index: &[usize], value: Value) -> EinsumResult<()> {
        let offset = self.offset(index)?;
        self.data.set(offset, value);
        Ok(())
    }

    pub(crate) fn get_linear(&self, offset: usize) -> Value {
        self.data.get(offset)
    }

    pub(crate) fn set_linear(&mut self, offset: usize, value: Value) {
        self.data.set(offset, value);
    }

    /// Returns the same elements under a new shape of equal size.
    pub fn reshape(&self, shape: &[usize]) -> EinsumResult<Tensor> {
        let expected: usize = shape.iter().product();
        if expected != self.len() {
            return Err(EinsumError::shape(format!(
                "cannot reshape {:?} ({} elements) into {:?} ({} elements)",
                self.shape,
                self.len(),
                shape,
                expected
            )));
        }
        Ok(Tensor {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            data: self.data.clone(),
        })
    }

    /// Returns the tensor with its axis order reversed.
    ///
    /// For a matrix this is the ordinary transpose; applying it twice gives
    /// back the original tensor.
    pub fn transpose(&self) -> Tensor {
        let shape: Vec<usize> = self.shape.iter().rev().copied().collect();
        let mut out = Tensor::zeros(&shape, self.dtype());
        if out.is_empty() {
            return out;
        }
        let mut index = vec![0usize; shape.len()];
        loop {
            let source: Vec<usize> = index.iter().rev().copied().collect();
            let src_offset: usize = source
                .iter()
                .zip(&self.strides)
                .map(|(&i, &s)| i * s)
                .sum();
            let dst_offset: usize = index
                .iter()
                .zip(&out.strides)
                .map(|(&i, &s)| i * s)
                .sum();
            out.data.set(dst_offset, self.data.get(src_offset));
            if !next_index(&shape, &mut index) {
                break;
            }
        }
        out
    }

    /// Drops every axis of size 1.
    pub fn squeeze(&self) -> Tensor {
        let shape: Vec<usize> = self.shape.iter().copied().filter(|&d| d != 1).collect();
        Tensor {
            strides: row_major_strides(&shape),
            shape,
            data: self.data.clone(),
        }
    }

    /// Inserts an axis of size 1 at the given position.
    pub fn expand_dims(&self, axis: usize) -> EinsumResult<Tensor> {
        if axis > self.rank() {
            return Err(EinsumError::shape(format!(
                "axis {} out of range for rank {}",
                axis,
                self.rank()
            )));
        }
        let mut shape = self.shape.clone();
        shape.insert(axis, 1);
        Ok(Tensor {
            strides: row_major_strides(&shape),
            shape,
            data: self.data.clone(),
        })
    }

    /// Collects all elements, widened to f64, in row-major order.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.data.get(i).to_f64()).collect()
    }

    /// Compares two tensors elementwise within an absolute tolerance.
    pub fn allclose(&self, other: &Tensor, tolerance: f64) -> bool {
        self.shape == other.shape
            && (0..self.len()).all(|i| {
                (self.data.get(i).to_f64() - other.data.get(i).to_f64()).abs() <= tolerance
            })
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor<{}>{:?}", self.dtype(), self.shape)
    }
}
