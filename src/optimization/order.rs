//! Locality-aware loop ordering.
//!
//! Chooses the nesting order for a notation's loop variables without any
//! stride information: an id whose positions sit late in the operand
//! subscripts belongs in an inner loop, since the last axis is the
//! contiguous one under row-major layout.

use alloc::vec::Vec;

use crate::notation::NormalizedNotation;

/// Plans the loop nesting order for a normalized notation, outermost
/// first.
///
/// For each pair of ids, `violations(a, b)` counts the operands (inputs
/// and outputs) in which b occurs at an earlier axis position than a. The
/// ids are stable-sorted so that a precedes b when placing a outside b
/// violates fewer of those per-operand orderings, ties keeping id order.
/// The result depends only on the notation, so repeated planning returns
/// the same permutation.
pub fn plan_loop_order(notation: &NormalizedNotation) -> Vec<usize> {
    let operands: Vec<&[usize]> = notation.all_operands().collect();
    let mut order: Vec<usize> = (0..notation.num_ids()).collect();
    order.sort_by(|&a, &b| violations(&operands, a, b).cmp(&violations(&operands, b, a)));
    order
}

/// Counts operands where b's first occurrence precedes a's.
fn violations(operands: &[&[usize]], a: usize, b: usize) -> usize {
    operands
        .iter()
        .filter(|axes| {
            match (first_position(axes, a), first_position(axes, b)) {
                (Some(pos_a), Some(pos_b)) => pos_b < pos_a,
                _ => false,
            }
        })
        .count()
}

fn first_position(axes: &[usize], id: usize) -> Option<usize> {
    axes.iter().position(|&x| x == id)
}
