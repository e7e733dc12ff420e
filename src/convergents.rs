//! Convergents p_i/q_i of the continued fraction of sqrt(n).
//!
//! The recurrence, seeded at the virtual index -1:
//!   p_{-1} = 1, p_0 = a_0, p_i = a_i * p_{i-1} + p_{i-2}
//!   q_{-1} = 0, q_0 = 1,   q_i = a_i * q_{i-1} + q_{i-2}
//! where a_i is read cyclically from the periodic digit block for i >= 1.
//!
//! Numerators and denominators grow exponentially with the index, so the
//! producer is a resumable iterator: nothing beyond the requested index is
//! ever materialized.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::cf::CfExpansion;

/// A single convergent p_i/q_i. Indexing starts at 0 with (a_0, 1); the
/// seed pair at index -1 lives only inside the iterator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Convergent {
    pub index: usize,
    pub p: BigUint,
    pub q: BigUint,
}

/// Lazy producer of convergents over an expansion, cyclic beyond the first
/// period. The iterator never ends; callers bound it by index.
pub struct ConvergentIter<'a> {
    expansion: &'a CfExpansion,
    p_prev2: BigUint,
    p_prev1: BigUint,
    q_prev2: BigUint,
    q_prev1: BigUint,
    next_index: usize,
}

impl<'a> ConvergentIter<'a> {
    pub fn new(expansion: &'a CfExpansion) -> Self {
        ConvergentIter {
            expansion,
            // Seed pairs (p_{-2}, p_{-1}) = (0, 1) and (q_{-2}, q_{-1}) = (1, 0)
            // make index 0 fall out of the same recurrence: p_0 = a_0, q_0 = 1.
            p_prev2: BigUint::zero(),
            p_prev1: BigUint::one(),
            q_prev2: BigUint::one(),
            q_prev1: BigUint::zero(),
            next_index: 0,
        }
    }
}

impl Iterator for ConvergentIter<'_> {
    type Item = Convergent;

    fn next(&mut self) -> Option<Convergent> {
        let index = self.next_index;
        let a = if index == 0 {
            &self.expansion.a0
        } else {
            self.expansion.digit(index)
        };
        let p = a * &self.p_prev1 + &self.p_prev2;
        let q = a * &self.q_prev1 + &self.q_prev2;

        self.p_prev2 = std::mem::replace(&mut self.p_prev1, p.clone());
        self.q_prev2 = std::mem::replace(&mut self.q_prev1, q.clone());
        self.next_index += 1;

        Some(Convergent { index, p, q })
    }
}

/// Convergent at a single index; iterates from the start, keeping only two
/// predecessor pairs in memory.
pub fn nth_convergent(expansion: &CfExpansion, index: usize) -> Convergent {
    ConvergentIter::new(expansion)
        .nth(index)
        .expect("convergent iterator is unbounded")
}
