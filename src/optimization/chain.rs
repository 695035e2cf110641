//! Optimal parenthesization for matrix chains.
//!
//! The classic matrix-chain-multiplication problem: given N matrix shapes
//! to be multiplied left to right, choose the binary grouping that
//! minimizes total scalar multiplications. Solved bottom-up over
//! contiguous sub-chains in O(N³) time and O(N²) space; the table is
//! dropped once the tree is extracted.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::{EinsumError, EinsumResult};

/// One node of a chain parenthesization tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainNode {
    /// The operand at this position in the original chain.
    Leaf(usize),
    /// The product of two sub-chains.
    Product {
        left: Box<ChainNode>,
        right: Box<ChainNode>,
    },
}

/// A minimal-cost parenthesization for one matrix chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainPlan {
    root: ChainNode,
    cost: u64,
    shape: (usize, usize),
}

impl ChainPlan {
    /// Plans the cheapest grouping for the given matrix shapes.
    ///
    /// Sub-chain [i,j] is solved by trying every split point s and
    /// combining `cost[i][s] + cost[s+1][j]` with the cost of the final
    /// product, `dims[i] * dims[s+1] * dims[j+1]`. Only a strictly
    /// smaller cost replaces the incumbent, so ties resolve to the
    /// smallest split index.
    pub fn optimize(shapes: &[(usize, usize)]) -> EinsumResult<ChainPlan> {
        if shapes.is_empty() {
            return Err(EinsumError::NoInputs);
        }
        for (i, pair) in shapes.windows(2).enumerate() {
            if pair[0].1 != pair[1].0 {
                return Err(EinsumError::NonMultipliable {
                    position: i,
                    next: i + 1,
                    left: pair[0],
                    right: pair[1],
                });
            }
        }

        let n = shapes.len();
        if n == 1 {
            return Ok(ChainPlan {
                root: ChainNode::Leaf(0),
                cost: 0,
                shape: shapes[0],
            });
        }

        // dims[i] and dims[i+1] are the height and width of matrix i.
        let mut dims: Vec<u64> = Vec::with_capacity(n + 1);
        dims.push(shapes[0].0 as u64);
        for &(_, cols) in shapes {
            dims.push(cols as u64);
        }

        let mut cost = vec![vec![0u64; n]; n];
        let mut split = vec![vec![0usize; n]; n];

        for len in 2..=n {
            for i in 0..=n - len {
                let j = i + len - 1;
                let mut best = u64::MAX;
                let mut best_split = i;
                for s in i..j {
                    let product = dims[i]
                        .saturating_mul(dims[s + 1])
                        .saturating_mul(dims[j + 1]);
                    let total = cost[i][s]
                        .saturating_add(cost[s + 1][j])
                        .saturating_add(product);
                    if total < best {
                        best = total;
                        best_split = s;
                    }
                }
                cost[i][j] = best;
                split[i][j] = best_split;
            }
        }

        Ok(ChainPlan {
            root: build_node(&split, 0, n - 1),
            cost: cost[0][n - 1],
            shape: (shapes[0].0, shapes[n - 1].1),
        })
    }

    /// Returns the root of the parenthesization tree.
    #[inline]
    pub fn root(&self) -> &ChainNode {
        &self.root
    }

    /// Returns the total scalar-multiplication count of this grouping.
    #[inline]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Returns the shape of the chain's final product.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }
}

fn build_node(split: &[Vec<usize>], i: usize, j: usize) -> ChainNode {
    if i == j {
        return ChainNode::Leaf(i);
    }
    let s = split[i][j];
    ChainNode::Product {
        left: Box::new(build_node(split, i, s)),
        right: Box::new(build_node(split, s + 1, j)),
    }
}

/// Total scalar multiplications of the naive left-fold evaluation.
pub fn naive_cost(shapes: &[(usize, usize)]) -> u64 {
    let Some(&(rows, mut cols)) = shapes.first() else {
        return 0;
    };
    let rows = rows as u64;
    let mut total = 0u64;
    for &(_, next_cols) in &shapes[1..] {
        total = total.saturating_add(rows.saturating_mul(cols as u64).saturating_mul(next_cols as u64));
        cols = next_cols;
    }
    total
}
