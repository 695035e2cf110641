//! Subscript representation for einsum notation.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// The ordered index labels of a single operand.
///
/// For example, in `ij,jk->ik` the subscripts are `ij`, `jk`, and `ik`.
/// A label may repeat within one subscript (`ii` reads the diagonal): all
/// of its positions share one loop variable and must agree in size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Subscript {
    labels: Vec<char>,
}

impl Subscript {
    /// Creates an empty subscript (a rank-0 operand).
    pub fn new() -> Self {
        Self { labels: Vec::new() }
    }

    /// Creates a subscript from a sequence of labels.
    pub fn from_chars(labels: impl IntoIterator<Item = char>) -> Self {
        Self {
            labels: labels.into_iter().collect(),
        }
    }

    /// Appends a label.
    pub fn push(&mut self, label: char) {
        self.labels.push(label);
    }

    /// Returns the number of axes this subscript describes.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if this subscript has no labels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates over the labels in axis order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.labels.iter().copied()
    }

    /// Returns the labels as a slice.
    pub fn as_slice(&self) -> &[char] {
        &self.labels
    }

    /// Checks whether a label occurs in this subscript.
    pub fn contains(&self, label: char) -> bool {
        self.labels.contains(&label)
    }

    /// Counts occurrences of a label.
    pub fn count(&self, label: char) -> usize {
        self.labels.iter().filter(|&&c| c == label).count()
    }

    /// Returns the first axis position of a label.
    pub fn position(&self, label: char) -> Option<usize> {
        self.labels.iter().position(|&c| c == label)
    }

    /// Converts to the bare-token string form.
    pub fn to_token(&self) -> String {
        self.labels.iter().collect()
    }
}

impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.labels {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Subscript {
    type Item = &'a char;
    type IntoIter = core::slice::Iter<'a, char>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}
