//! Complete raw einsum notation.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use super::normalize::NormalizedNotation;
use super::subscript::Subscript;
use super::transform::TransformExpr;
use crate::error::{EinsumError, EinsumResult};

/// A complete raw contraction notation: input subscripts, optional
/// per-output transform expressions, and output subscripts.
///
/// This is the structured form behind the string grammar
/// `inputs [-> transforms] -> outputs`; explicit label lists passed to
/// [`EinsumNotation::new`] are used as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct EinsumNotation {
    inputs: Vec<Subscript>,
    transforms: Vec<TransformExpr>,
    outputs: Vec<Subscript>,
    original: Option<String>,
}

impl EinsumNotation {
    /// Creates a notation from explicit parts.
    ///
    /// Transforms are positional: output k uses the k-th expression, and
    /// outputs beyond the supplied transforms get the default
    /// sum-of-products rule at normalization time. Supplying more
    /// transforms than outputs is rejected.
    pub fn new(
        inputs: Vec<Subscript>,
        transforms: Vec<TransformExpr>,
        outputs: Vec<Subscript>,
    ) -> EinsumResult<Self> {
        if inputs.is_empty() {
            return Err(EinsumError::NoInputs);
        }
        if transforms.len() > outputs.len() {
            return Err(EinsumError::parse(format!(
                "notation declares {} transforms for {} outputs",
                transforms.len(),
                outputs.len()
            )));
        }
        for transform in &transforms {
            transform.validate(inputs.len(), outputs.len())?;
        }
        Ok(Self {
            inputs,
            transforms,
            outputs,
            original: None,
        })
    }

    /// Creates a notation with the implicit default output: the union of
    /// all input labels in ascending label order.
    ///
    /// The sort is by label, not by first appearance; `i,j` therefore
    /// produces the outer product `ij` and `ji,ik` produces `ijk`. This
    /// outer-merge convention is long-standing observable behavior and is
    /// kept exactly, sort included.
    pub fn implicit(inputs: Vec<Subscript>) -> EinsumResult<Self> {
        let union: BTreeSet<char> = inputs.iter().flat_map(|s| s.iter()).collect();
        let output = Subscript::from_chars(union);
        Self::new(inputs, Vec::new(), vec![output])
    }

    /// Attaches the original notation string.
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = Some(original.into());
        self
    }

    /// Returns the input subscripts.
    #[inline]
    pub fn inputs(&self) -> &[Subscript] {
        &self.inputs
    }

    /// Returns the output subscripts.
    #[inline]
    pub fn outputs(&self) -> &[Subscript] {
        &self.outputs
    }

    /// Returns the explicitly supplied transform expressions.
    #[inline]
    pub fn transforms(&self) -> &[TransformExpr] {
        &self.transforms
    }

    /// Returns the number of input operands.
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Returns the number of declared outputs.
    #[inline]
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Returns the original notation string, if this was parsed.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Produces the canonical integer-id form of this notation.
    pub fn normalize(&self) -> EinsumResult<NormalizedNotation> {
        NormalizedNotation::from_notation(self)
    }
}

impl fmt::Display for EinsumNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", input)?;
        }
        if !self.transforms.is_empty() {
            write!(f, "->")?;
            for (i, transform) in self.transforms.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", transform)?;
            }
        }
        write!(f, "->")?;
        for (i, output) in self.outputs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", output)?;
        }
        Ok(())
    }
}
