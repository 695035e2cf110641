//! Einsum notation parser.
//!
//! Parses strings like `ij,jk->ik` into a structured [`EinsumNotation`].

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use super::notation::EinsumNotation;
use super::subscript::Subscript;
use super::transform::parse_transform;
use crate::error::{EinsumError, EinsumResult};

/// Parses an einsum notation string.
///
/// # Grammar
///
/// ```text
/// notation    ::= inputs
///               | inputs '->' outputs
///               | inputs '->' transforms '->' outputs
/// inputs      ::= subscript (',' subscript)*
/// outputs     ::= subscript (',' subscript)*
/// transforms  ::= expr (',' expr)*
/// subscript   ::= [a-zA-Z]*
/// ```
///
/// With no separator the output defaults to the union of all input labels
/// in ascending label order (see [`EinsumNotation::implicit`]). A lone
/// separator with nothing after it declares a single scalar output. The
/// middle segment supplies per-output transform expressions by position;
/// outputs without one get the sum-of-products default.
///
/// # Examples
///
/// ```ignore
/// let matmul = parse_einsum("ij,jk->ik")?;
/// let trace = parse_einsum("ii->")?;
/// let outer = parse_einsum("i,j")?;            // implicit output "ij"
/// let square = parse_einsum("ij->$1*$1->ij")?; // custom transform
/// ```
pub fn parse_einsum(notation: &str) -> EinsumResult<EinsumNotation> {
    let notation = notation.trim();

    if notation.is_empty() {
        return Err(EinsumError::parse("empty notation"));
    }

    let segments: Vec<&str> = notation.split("->").collect();
    if segments.len() > 3 {
        return Err(EinsumError::TooManySeparators {
            count: segments.len() - 1,
        });
    }

    let input_tokens: Vec<&str> = segments[0].split(',').collect();
    if input_tokens.is_empty() || (input_tokens.len() == 1 && input_tokens[0].trim().is_empty()) {
        return Err(EinsumError::NoInputs);
    }

    let mut inputs = Vec::with_capacity(input_tokens.len());
    for token in &input_tokens {
        inputs.push(parse_subscript(token.trim())?);
    }

    let parsed = match segments.len() {
        1 => EinsumNotation::implicit(inputs)?,
        2 => EinsumNotation::new(inputs, Vec::new(), parse_outputs(segments[1])?)?,
        _ => {
            let transforms = if segments[1].trim().is_empty() {
                Vec::new()
            } else {
                segments[1]
                    .split(',')
                    .map(|expr| parse_transform(expr.trim()))
                    .collect::<EinsumResult<Vec<_>>>()?
            };
            EinsumNotation::new(inputs, transforms, parse_outputs(segments[2])?)?
        }
    };

    Ok(parsed.with_original(notation))
}

/// Parses a single bare-token subscript, one label per character.
fn parse_subscript(token: &str) -> EinsumResult<Subscript> {
    let mut subscript = Subscript::new();
    for c in token.chars() {
        match c {
            'a'..='z' | 'A'..='Z' => subscript.push(c),
            ' ' | '\t' => continue,
            _ => {
                return Err(EinsumError::parse(format!(
                    "invalid character '{}' in subscript",
                    c
                )));
            }
        }
    }
    Ok(subscript)
}

/// Parses the output segment.
///
/// An empty segment still declares one output: the empty subscript, a
/// full reduction to a scalar.
fn parse_outputs(segment: &str) -> EinsumResult<Vec<Subscript>> {
    if segment.trim().is_empty() {
        return Ok(vec![Subscript::new()]);
    }
    segment
        .split(',')
        .map(|token| parse_subscript(token.trim()))
        .collect()
}
