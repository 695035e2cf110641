//! Elementwise reduction helpers: sum, mean, variance.

use alloc::format;
use alloc::vec;

use super::dense::{next_index, Tensor};
use super::dtype::{DType, Value};
use crate::error::{EinsumError, EinsumResult};

fn float_result_type(dtype: DType) -> DType {
    if dtype.is_float() { dtype } else { DType::F64 }
}

impl Tensor {
    /// Sum of all elements, in this tensor's element type.
    pub fn sum(&self) -> Value {
        let mut acc = Value::zero(self.dtype());
        for i in 0..self.len() {
            acc = acc + self.get_linear(i);
        }
        acc
    }

    /// Arithmetic mean of all elements. Integer tensors yield f64.
    pub fn mean(&self) -> Value {
        self.sum() / Value::I64(self.len() as i64)
    }

    /// Population variance of all elements. Integer tensors yield f64.
    pub fn variance(&self) -> Value {
        let mean = self.mean().to_f64();
        let mut acc = 0.0f64;
        for i in 0..self.len() {
            let d = self.get_linear(i).to_f64() - mean;
            acc += d * d;
        }
        Value::F64(acc / self.len() as f64).cast(float_result_type(self.dtype()))
    }

    fn check_axis(&self, axis: usize) -> EinsumResult<()> {
        if axis >= self.rank() {
            return Err(EinsumError::shape(format!(
                "axis {} out of range for rank {}",
                axis,
                self.rank()
            )));
        }
        Ok(())
    }

    /// Sums along one axis, dropping it from the shape.
    pub fn sum_axis(&self, axis: usize) -> EinsumResult<Tensor> {
        self.check_axis(axis)?;
        let mut out_shape = self.shape().to_vec();
        out_shape.remove(axis);
        let mut out = Tensor::zeros(&out_shape, self.dtype());
        if self.is_empty() {
            return Ok(out);
        }

        let mut index = vec![0usize; self.rank()];
        loop {
            let mut out_index = index.clone();
            out_index.remove(axis);
            let current = out.get(&out_index)?;
            let value = current + self.get(&index)?;
            out.set(&out_index, value)?;
            if !next_index(self.shape(), &mut index) {
                break;
            }
        }
        Ok(out)
    }

    /// Mean along one axis. Integer tensors yield f64.
    pub fn mean_axis(&self, axis: usize) -> EinsumResult<Tensor> {
        let summed = self.sum_axis(axis)?;
        let n = Value::I64(self.shape()[axis] as i64);
        let dtype = float_result_type(self.dtype());
        let mut out = Tensor::zeros(summed.shape(), dtype);
        for i in 0..summed.len() {
            out.set_linear(i, summed.get_linear(i) / n);
        }
        Ok(out)
    }

    /// Population variance along one axis. Integer tensors yield f64.
    pub fn variance_axis(&self, axis: usize) -> EinsumResult<Tensor> {
        let mean = self.mean_axis(axis)?;
        let dtype = float_result_type(self.dtype());
        let mut out = Tensor::zeros(mean.shape(), dtype);
        if self.is_empty() {
            return Ok(out);
        }

        let n = self.shape()[axis] as f64;
        let mut index = vec![0usize; self.rank()];
        loop {
            let mut out_index = index.clone();
            out_index.remove(axis);
            let d = self.get(&index)?.to_f64() - mean.get(&out_index)?.to_f64();
            let current = out.get(&out_index)?.to_f64();
            out.set(&out_index, Value::F64(current + d * d / n))?;
            if !next_index(self.shape(), &mut index) {
                break;
            }
        }
        Ok(out)
    }
}
