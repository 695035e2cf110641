//! Normalization and loop-planning tests.

use einloop::{parse_einsum, plan_loop_order, EinsumError, NormalizedNotation};

fn normalized(notation: &str) -> NormalizedNotation {
    parse_einsum(notation).unwrap().normalize().unwrap()
}

#[test]
fn test_ids_follow_first_appearance() {
    let n = normalized("kj,ji->ki");
    assert_eq!(n.inputs(), &[vec![0, 1], vec![1, 2]]);
    assert_eq!(n.outputs(), &[vec![0, 2]]);
}

#[test]
fn test_normalization_is_idempotent() {
    for notation in ["ij,jk->ik", "ii->i", "ij->", "i,j", "ij->@1+$1*$1->ij"] {
        let once = normalized(notation);
        let twice = once.to_notation().normalize().unwrap();
        assert_eq!(once, twice, "renormalizing {notation} changed ids");
    }
}

#[test]
fn test_label_spelling_invariance() {
    // Identical repetition/position structure in a different alphabet
    // normalizes to an equal value, the basis for kernel-cache sharing.
    assert_eq!(normalized("ij,jk->ik"), normalized("ab,bc->ac"));
    assert_eq!(normalized("ii->i"), normalized("zz->z"));
    assert_ne!(normalized("ij,jk->ik"), normalized("ij,kj->ik"));
}

#[test]
fn test_output_label_must_come_from_inputs() {
    assert_eq!(
        parse_einsum("ij->ik").unwrap().normalize().map(|_| ()),
        Err(EinsumError::OutputLabelNotInInputs { label: 'k' })
    );
}

#[test]
fn test_every_output_gets_a_transform() {
    let n = normalized("ij->ij,ji");
    assert_eq!(n.transforms().len(), 2);
}

#[test]
fn test_loop_planning_is_deterministic() {
    let n = normalized("abc,cb,bd->ad");
    let first = plan_loop_order(&n);
    for _ in 0..5 {
        assert_eq!(plan_loop_order(&n), first);
    }
    assert_eq!(first.len(), n.num_ids());
}

#[test]
fn test_loop_plan_is_a_permutation() {
    let n = normalized("ij,jk,kl->il");
    let mut order = plan_loop_order(&n);
    order.sort_unstable();
    assert_eq!(order, (0..n.num_ids()).collect::<Vec<_>>());
}

#[test]
fn test_matmul_loop_plan_keeps_contiguous_axis_innermost() {
    // i leads everywhere, k trails everywhere: the plan nests i out, k in.
    let n = normalized("ij,jk->ik");
    assert_eq!(plan_loop_order(&n), vec![0, 1, 2]);
}
