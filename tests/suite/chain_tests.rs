//! Matrix-chain planning and execution tests.

use einloop::optimization::naive_cost;
use einloop::{
    matmul_chain, matmul_chain_naive, matmul_chain_with, ChainNode, ChainPlan, ChainStrategy,
    EinsumConfig, EinsumError, Tensor,
};

fn leaf(i: usize) -> ChainNode {
    ChainNode::Leaf(i)
}

fn product(left: ChainNode, right: ChainNode) -> ChainNode {
    ChainNode::Product {
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn ramp(rows: usize, cols: usize) -> Tensor {
    let data = (0..rows * cols).map(|x| (x % 7) as i64 - 3).collect();
    Tensor::from_i64(&[rows, cols], data).unwrap()
}

#[test]
fn test_planner_picks_cheap_split() {
    // ((AB)C) costs 10*100*5 + 10*5*50 = 7500,
    // (A(BC)) costs 100*5*50 + 10*100*50 = 75000.
    let plan = ChainPlan::optimize(&[(10, 100), (100, 5), (5, 50)]).unwrap();
    assert_eq!(plan.cost(), 7500);
    assert_eq!(plan.root(), &product(product(leaf(0), leaf(1)), leaf(2)));
}

#[test]
fn test_planner_beats_left_fold() {
    let shapes = [(1000usize, 1usize), (1, 1000), (1000, 1000)];
    let plan = ChainPlan::optimize(&shapes).unwrap();
    assert_eq!(plan.cost(), 2_000_000);
    assert!(plan.cost() < naive_cost(&shapes));
    assert_eq!(plan.root(), &product(leaf(0), product(leaf(1), leaf(2))));
}

#[test]
fn test_planned_chain_matches_naive_values() {
    // Same association-sensitive shape profile as the 1000-wide case,
    // scaled down so the naive fold stays cheap enough to run.
    let a = ramp(40, 1);
    let b = ramp(1, 40);
    let c = ramp(40, 30);

    let planned = matmul_chain(&[&a, &b, &c]).unwrap();
    let folded = matmul_chain_naive(&[&a, &b, &c]).unwrap();
    assert_eq!(planned, folded);
    assert_eq!(planned.shape(), &[40, 30]);
}

#[test]
fn test_four_matrix_chain_parity() {
    let a = ramp(3, 5);
    let b = ramp(5, 2);
    let c = ramp(2, 6);
    let d = ramp(6, 4);

    let planned = matmul_chain(&[&a, &b, &c, &d]).unwrap();
    let folded = matmul_chain_naive(&[&a, &b, &c, &d]).unwrap();
    assert_eq!(planned, folded);
}

#[test]
fn test_left_fold_strategy() {
    let a = ramp(4, 2);
    let b = ramp(2, 5);
    let c = ramp(5, 3);

    let config = EinsumConfig::new().with_chain_strategy(ChainStrategy::LeftFold);
    assert_eq!(
        matmul_chain_with(&[&a, &b, &c], &config).unwrap(),
        matmul_chain_naive(&[&a, &b, &c]).unwrap()
    );
}

#[test]
fn test_execution_scenario_values() {
    let a = ramp(10, 100);
    let b = ramp(100, 5);
    let c = ramp(5, 50);

    let planned = matmul_chain(&[&a, &b, &c]).unwrap();
    let folded = matmul_chain_naive(&[&a, &b, &c]).unwrap();
    assert_eq!(planned, folded);
}

#[test]
fn test_float_chain_close_to_naive() {
    // A different association order reorders float additions, so parity
    // is up to rounding, not bitwise.
    let a = Tensor::from_f64(&[6, 2], (0..12).map(|x| x as f64 * 0.3 - 1.0).collect()).unwrap();
    let b = Tensor::from_f64(&[2, 6], (0..12).map(|x| 1.7 - x as f64 * 0.2).collect()).unwrap();
    let c = Tensor::from_f64(&[6, 3], (0..18).map(|x| (x as f64).sin()).collect()).unwrap();

    let planned = matmul_chain(&[&a, &b, &c]).unwrap();
    let folded = matmul_chain_naive(&[&a, &b, &c]).unwrap();
    assert!(planned.allclose(&folded, 1e-9));
}

#[test]
fn test_chain_rejects_incompatible_shapes() {
    let a = ramp(2, 3);
    let b = ramp(4, 5);
    let c = ramp(5, 2);
    assert_eq!(
        matmul_chain(&[&a, &b, &c]).map(|_| ()),
        Err(EinsumError::NonMultipliable {
            position: 0,
            next: 1,
            left: (2, 3),
            right: (4, 5),
        })
    );
}

#[test]
fn test_two_matrix_chain_skips_planning() {
    let a = ramp(2, 3);
    let b = ramp(3, 2);
    // A direct pair goes straight to matmul; shape errors then surface
    // as the contraction's dimension mismatch.
    let narrow = ramp(4, 2);
    assert!(matches!(
        matmul_chain(&[&a, &narrow]).map(|_| ()),
        Err(EinsumError::DimensionMismatch { label: 'j', .. })
    ));
    assert_eq!(
        matmul_chain(&[&a, &b]).unwrap(),
        matmul_chain_naive(&[&a, &b]).unwrap()
    );
}

#[test]
fn test_empty_and_single_chains() {
    let a = ramp(3, 3);
    assert_eq!(matmul_chain(&[]), Err(EinsumError::NoInputs));
    assert_eq!(matmul_chain(&[&a]).unwrap(), a);
}
