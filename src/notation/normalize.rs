//! Canonical integer-id form of a notation.

use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::notation::EinsumNotation;
use super::subscript::Subscript;
use super::transform::TransformExpr;
use crate::error::{EinsumError, EinsumResult};

/// A notation with every label replaced by a dense integer id and every
/// output given a transform expression.
///
/// Ids are assigned in order of first appearance, scanning input
/// subscripts before output subscripts, left to right within each. Two
/// raw notations that differ only in label spelling normalize to equal
/// values: equality and hashing ignore the retained display labels, so
/// `NormalizedNotation` is the compiled-kernel cache key.
///
/// Every id used by an output also occurs in some input; normalization
/// rejects anything else, since an output index cannot be aggregated from
/// nowhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedNotation {
    inputs: Vec<Vec<usize>>,
    outputs: Vec<Vec<usize>>,
    transforms: Vec<TransformExpr>,
    labels: Vec<char>,
}

impl NormalizedNotation {
    /// Normalizes a raw notation.
    pub fn from_notation(notation: &EinsumNotation) -> EinsumResult<Self> {
        let mut ids: HashMap<char, usize> = HashMap::new();
        let mut labels: Vec<char> = Vec::new();

        let mut inputs = Vec::with_capacity(notation.num_inputs());
        for subscript in notation.inputs() {
            let axes: Vec<usize> = subscript
                .iter()
                .map(|label| {
                    *ids.entry(label).or_insert_with(|| {
                        labels.push(label);
                        labels.len() - 1
                    })
                })
                .collect();
            inputs.push(axes);
        }

        let mut outputs = Vec::with_capacity(notation.num_outputs());
        for subscript in notation.outputs() {
            let mut axes = Vec::with_capacity(subscript.len());
            for label in subscript.iter() {
                match ids.get(&label) {
                    Some(&id) => axes.push(id),
                    None => return Err(EinsumError::OutputLabelNotInInputs { label }),
                }
            }
            outputs.push(axes);
        }

        let mut transforms = notation.transforms().to_vec();
        for output in transforms.len()..outputs.len() {
            transforms.push(TransformExpr::sum_of_products(inputs.len(), output + 1));
        }

        Ok(Self {
            inputs,
            outputs,
            transforms,
            labels,
        })
    }

    /// Returns the number of distinct ids.
    #[inline]
    pub fn num_ids(&self) -> usize {
        self.labels.len()
    }

    /// Returns the per-input id sequences, one per axis.
    #[inline]
    pub fn inputs(&self) -> &[Vec<usize>] {
        &self.inputs
    }

    /// Returns the per-output id sequences, one per axis.
    #[inline]
    pub fn outputs(&self) -> &[Vec<usize>] {
        &self.outputs
    }

    /// Returns the transform expressions, one per output.
    #[inline]
    pub fn transforms(&self) -> &[TransformExpr] {
        &self.transforms
    }

    /// Returns the display label an id was assigned from.
    pub fn label(&self, id: usize) -> char {
        self.labels.get(id).copied().unwrap_or('?')
    }

    /// Iterates over all operand id sequences, inputs before outputs.
    pub fn all_operands(&self) -> impl Iterator<Item = &[usize]> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .map(|axes| axes.as_slice())
    }

    /// Rebuilds a raw notation using the retained display labels.
    ///
    /// Normalizing the result reproduces `self`: id assignment already
    /// follows first-appearance order, so normalization is idempotent.
    pub fn to_notation(&self) -> EinsumNotation {
        let subscripts = |axes: &[Vec<usize>]| {
            axes.iter()
                .map(|ids| Subscript::from_chars(ids.iter().map(|&id| self.label(id))))
                .collect::<Vec<_>>()
        };
        EinsumNotation::new(
            subscripts(&self.inputs),
            self.transforms.clone(),
            subscripts(&self.outputs),
        )
        .expect("normalized parts form a valid notation")
    }
}

impl PartialEq for NormalizedNotation {
    fn eq(&self, other: &Self) -> bool {
        self.inputs == other.inputs
            && self.outputs == other.outputs
            && self.transforms == other.transforms
    }
}

impl Eq for NormalizedNotation {}

impl Hash for NormalizedNotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inputs.hash(state);
        self.outputs.hash(state);
        self.transforms.hash(state);
    }
}
