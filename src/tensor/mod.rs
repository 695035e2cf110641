//! Dense tensor collaborator consumed by the einsum engine.
//!
//! The engine touches tensors only through this module's contract:
//! zero-initialized allocation, bounds-checked element access by
//! multi-index, and the shape/element-type accessors. The shape and
//! reduction utilities here are plain iteration code on top of that
//! contract.

mod build;
mod dense;
mod dtype;
mod reduce;

pub use build::{eye, tri, vander};
pub use dense::Tensor;
pub use dtype::{DType, Value};
