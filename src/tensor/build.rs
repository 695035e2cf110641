//! Array construction utilities.

use super::dense::Tensor;
use super::dtype::{DType, Value};

/// The n-by-n identity matrix.
pub fn eye(n: usize, dtype: DType) -> Tensor {
    let mut out = Tensor::zeros(&[n, n], dtype);
    for i in 0..n {
        out.set_linear(i * n + i, Value::one(dtype));
    }
    out
}

/// An n-by-n lower-triangular matrix of ones, diagonal included.
pub fn tri(n: usize, dtype: DType) -> Tensor {
    let mut out = Tensor::zeros(&[n, n], dtype);
    for i in 0..n {
        for j in 0..=i {
            out.set_linear(i * n + j, Value::one(dtype));
        }
    }
    out
}

/// The Vandermonde matrix of the given points with `cols` increasing
/// powers: `V[i][j] = x_i^j`.
pub fn vander(points: &[f64], cols: usize) -> Tensor {
    let mut out = Tensor::zeros(&[points.len(), cols], DType::F64);
    for (i, &x) in points.iter().enumerate() {
        let mut power = 1.0f64;
        for j in 0..cols {
            out.set_linear(i * cols + j, Value::F64(power));
            power *= x;
        }
    }
    out
}
