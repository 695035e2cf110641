//! Parser tests for einsum notation.

use einloop::{parse_einsum, EinsumError};

#[test]
fn test_parse_basic_matmul() {
    let notation = parse_einsum("ij,jk->ik").unwrap();
    assert_eq!(notation.num_inputs(), 2);
    assert_eq!(notation.num_outputs(), 1);
    assert_eq!(notation.outputs()[0].to_token(), "ik");
}

#[test]
fn test_parse_trace() {
    let notation = parse_einsum("ii->").unwrap();
    assert_eq!(notation.inputs()[0].count('i'), 2);
    assert!(notation.outputs()[0].is_empty());
}

#[test]
fn test_parse_implicit_output() {
    // With no separator the output is the union of all input labels in
    // ascending label order, repeated labels included.
    let notation = parse_einsum("ij,jk").unwrap();
    assert_eq!(notation.outputs()[0].to_token(), "ijk");
}

#[test]
fn test_parse_implicit_output_sorts_alphabetically() {
    let notation = parse_einsum("ba").unwrap();
    assert_eq!(notation.outputs()[0].to_token(), "ab");
}

#[test]
fn test_parse_lone_separator_is_scalar_output() {
    let notation = parse_einsum("ij->").unwrap();
    assert_eq!(notation.num_outputs(), 1);
    assert!(notation.outputs()[0].is_empty());
}

#[test]
fn test_parse_transform_segment() {
    let notation = parse_einsum("ij,ij->@1+$1*$2->ij").unwrap();
    assert_eq!(notation.transforms().len(), 1);
    assert_eq!(notation.num_outputs(), 1);
}

#[test]
fn test_parse_multiple_outputs() {
    let notation = parse_einsum("ij->@1+$1,@2-$1->ij,ji").unwrap();
    assert_eq!(notation.num_outputs(), 2);
    assert_eq!(notation.outputs()[1].to_token(), "ji");
}

#[test]
fn test_parse_partial_transforms_allowed() {
    // Outputs beyond the supplied transforms get the default rule later.
    let notation = parse_einsum("ij->@1+$1->ij,ji").unwrap();
    assert_eq!(notation.transforms().len(), 1);
    assert_eq!(notation.num_outputs(), 2);
}

#[test]
fn test_parse_rejects_non_alphabetic() {
    assert!(parse_einsum("i2,jk->ik").is_err());
    assert!(parse_einsum("i_j->ij").is_err());
}

#[test]
fn test_parse_rejects_three_separators() {
    assert_eq!(
        parse_einsum("ij->@1->ij->ij").map(|_| ()),
        Err(EinsumError::TooManySeparators { count: 3 })
    );
}

#[test]
fn test_parse_rejects_more_transforms_than_outputs() {
    assert!(parse_einsum("ij->@1+$1,@1*$1->ij").is_err());
}

#[test]
fn test_parse_whitespace_tolerated() {
    let notation = parse_einsum(" ij , jk -> ik ").unwrap();
    assert_eq!(notation.inputs()[0].to_token(), "ij");
    assert_eq!(notation.outputs()[0].to_token(), "ik");
}

#[test]
fn test_parse_empty_rejected() {
    assert!(parse_einsum("").is_err());
    assert!(parse_einsum("   ").is_err());
    assert_eq!(parse_einsum("->ij").map(|_| ()), Err(EinsumError::NoInputs));
}
