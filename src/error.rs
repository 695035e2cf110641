//! Error types for einsum parsing, compilation, and execution.

use alloc::string::String;
use alloc::vec::Vec;

use crate::tensor::DType;

/// Errors that can occur while parsing, compiling, or executing an einsum
/// operation.
///
/// Every validation failure is raised before any output tensor is allocated
/// or written, so a returned error implies no partial mutation of
/// caller-supplied outputs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum EinsumError {
    /// Invalid notation or transform-expression syntax.
    #[cfg_attr(feature = "std", error("parse error: {message}"))]
    Parse { message: String },

    /// The notation contains more than two `->` separators.
    #[cfg_attr(feature = "std", error("notation has {count} separators, maximum is 2"))]
    TooManySeparators { count: usize },

    /// No input operands were declared.
    #[cfg_attr(feature = "std", error("at least one input operand is required"))]
    NoInputs,

    /// Number of supplied operands disagrees with the declared inputs.
    #[cfg_attr(feature = "std", error("expected {expected} operands, got {got}"))]
    ArgumentCount { expected: usize, got: usize },

    /// Number of supplied output tensors disagrees with the declared outputs.
    #[cfg_attr(feature = "std", error("expected {expected} outputs, got {got}"))]
    OutputCount { expected: usize, got: usize },

    /// An output label does not occur in any input operand.
    #[cfg_attr(feature = "std", error("output label '{label}' not found in any input"))]
    OutputLabelNotInInputs { label: char },

    /// A repeated label sees disagreeing dimension sizes at its positions.
    #[cfg_attr(
        feature = "std",
        error("dimension mismatch for label '{label}': expected {expected}, got {got}")
    )]
    DimensionMismatch {
        label: char,
        expected: usize,
        got: usize,
    },

    /// An operand's rank disagrees with its declared subscript length.
    #[cfg_attr(
        feature = "std",
        error("operand {operand} has rank {got}, subscript expects {expected}")
    )]
    RankMismatch {
        operand: usize,
        expected: usize,
        got: usize,
    },

    /// A caller-supplied output tensor has the wrong shape.
    #[cfg_attr(
        feature = "std",
        error("output {output} has shape {got:?}, expected {expected:?}")
    )]
    OutputShapeMismatch {
        output: usize,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// A caller-supplied output tensor has the wrong element type.
    #[cfg_attr(
        feature = "std",
        error("output {output} has element type {got:?}, expected {expected:?}")
    )]
    OutputTypeMismatch {
        output: usize,
        expected: DType,
        got: DType,
    },

    /// Adjacent matrices in a chain have incompatible inner dimensions.
    #[cfg_attr(
        feature = "std",
        error("matrices {position} and {next} are not multipliable: {left:?} x {right:?}")
    )]
    NonMultipliable {
        position: usize,
        next: usize,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A multi-index is out of bounds for a tensor's shape.
    #[cfg_attr(feature = "std", error("index {index:?} out of bounds for shape {shape:?}"))]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    /// Element data length disagrees with the product of the shape.
    #[cfg_attr(feature = "std", error("shape expects {expected} elements, got {got}"))]
    ElementCount { expected: usize, got: usize },

    /// Shape manipulation error (reshape, squeeze, expand).
    #[cfg_attr(feature = "std", error("shape error: {message}"))]
    Shape { message: String },
}

impl EinsumError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }
}

/// Result type for einsum operations.
pub type EinsumResult<T> = core::result::Result<T, EinsumError>;
