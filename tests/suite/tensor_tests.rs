//! Tensor collaborator tests: shape utilities, reductions, constructors.

use pretty_assertions::assert_eq;

use einloop::tensor::{eye, tri, vander};
use einloop::{DType, Tensor, Value};

#[test]
fn test_transpose_is_self_inverse() {
    let matrix = Tensor::from_i64(&[2, 3], (1..=6).collect()).unwrap();
    assert_eq!(matrix.transpose().transpose(), matrix);

    let cube = Tensor::from_f64(&[2, 3, 4], (0..24).map(f64::from).collect()).unwrap();
    assert_eq!(cube.transpose().transpose(), cube);

    let scalar = Tensor::from_f64(&[], vec![3.5]).unwrap();
    assert_eq!(scalar.transpose().transpose(), scalar);
}

#[test]
fn test_reshape_roundtrip() {
    let t = Tensor::from_i64(&[2, 6], (1..=12).collect()).unwrap();
    let r = t.reshape(&[3, 4]).unwrap();
    assert_eq!(r.shape(), &[3, 4]);
    assert_eq!(r.reshape(&[2, 6]).unwrap(), t);
    assert!(t.reshape(&[5, 2]).is_err());
}

#[test]
fn test_squeeze_expand_roundtrip() {
    let t = Tensor::from_i64(&[3], vec![1, 2, 3]).unwrap();
    let expanded = t.expand_dims(0).unwrap();
    assert_eq!(expanded.shape(), &[1, 3]);
    assert_eq!(expanded.squeeze(), t);
}

#[test]
fn test_eye_multiplication_is_identity() {
    let m = Tensor::from_i64(&[3, 3], (1..=9).collect()).unwrap();
    let id = eye(3, DType::I64);
    assert_eq!(einloop::matmul(&id, &m).unwrap(), m);
    assert_eq!(einloop::matmul(&m, &id).unwrap(), m);
}

#[test]
fn test_tri_running_sums() {
    // tri(n) @ v computes prefix sums of v.
    let v = Tensor::from_f64(&[3, 1], vec![1.0, 2.0, 3.0]).unwrap();
    let sums = einloop::matmul(&tri(3, DType::F64), &v).unwrap();
    assert_eq!(sums.to_f64_vec(), vec![1.0, 3.0, 6.0]);
}

#[test]
fn test_vander_powers() {
    let v = vander(&[1.0, 2.0, 3.0], 3);
    assert_eq!(
        v.to_f64_vec(),
        vec![1.0, 1.0, 1.0, 1.0, 2.0, 4.0, 1.0, 3.0, 9.0]
    );
}

#[test]
fn test_reductions() {
    let t = Tensor::from_i64(&[2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(t.sum(), Value::I64(21));
    assert_eq!(t.mean(), Value::F64(3.5));

    let row_sums = t.sum_axis(1).unwrap();
    assert_eq!(row_sums.to_f64_vec(), vec![6.0, 15.0]);

    let col_means = t.mean_axis(0).unwrap();
    assert_eq!(col_means.to_f64_vec(), vec![2.5, 3.5, 4.5]);
}

#[test]
fn test_variance_matches_definition() {
    let t = Tensor::from_f64(&[4], vec![2.0, 4.0, 4.0, 6.0]).unwrap();
    assert_eq!(t.variance(), Value::F64(2.0));

    let rows = Tensor::from_f64(&[2, 2], vec![1.0, 3.0, 5.0, 5.0]).unwrap();
    let var = rows.variance_axis(1).unwrap();
    assert_eq!(var.to_f64_vec(), vec![1.0, 0.0]);
}

#[test]
fn test_full_reduction_agrees_with_notation() {
    let t = Tensor::from_i64(&[2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
    let via_engine = einloop::einsum("ij->", &[&t]).unwrap();
    assert_eq!(via_engine.get(&[]).unwrap(), t.sum());
}

#[test]
fn test_value_promotion_lattice() {
    assert_eq!(DType::promote(DType::I32, DType::I64), DType::I64);
    assert_eq!(DType::promote(DType::I64, DType::F16), DType::F16);
    assert_eq!(DType::promote(DType::F16, DType::F32), DType::F32);
    assert_eq!(DType::promote(DType::F32, DType::F64), DType::F64);
}

#[test]
fn test_f16_roundtrip_through_engine() {
    let mut t = Tensor::zeros(&[2], DType::F16);
    t.set(&[0], Value::F64(1.5)).unwrap();
    t.set(&[1], Value::F64(2.5)).unwrap();
    let doubled = einloop::einsum("i,i->i", &[&t, &t]).unwrap();
    assert_eq!(doubled.dtype(), DType::F16);
    assert_eq!(doubled.to_f64_vec(), vec![2.25, 6.25]);
}
