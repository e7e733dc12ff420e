//! Fundamental solutions of x^2 - n*y^2 = +/-1 from the CF expansion.
//!
//! With period k of the expansion of sqrt(n), the convergent at index k-1
//! satisfies p^2 - n*q^2 = (-1)^k. So:
//! - positive equation: index k-1 for even k, index 2k-1 for odd k
//!   (running through two periods flips the sign);
//! - negative equation: index k-1 for odd k, no solution at all for even k.
//!
//! The positive path additionally requires squarefree n; the negative path
//! only requires non-square n. The restriction is asymmetric on purpose and
//! the solvers keep it that way.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::cf::{cf_expand, Budget, CfExpansion};
use crate::classify::{classify, is_perfect_square, Classification};
use crate::convergents::{nth_convergent, ConvergentIter};
use crate::error::SolveError;

/// Fundamental solution of the positive equation x^2 - n*y^2 = 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositivePellSolution {
    pub solution: (BigUint, BigUint),
    /// Index of the selected convergent: k-1 for even period, 2k-1 for odd.
    pub solution_index: usize,
    pub expansion: CfExpansion,
}

/// Fundamental solution of the negative equation x^2 - n*y^2 = -1, paired
/// with the auxiliary solution of the companion positive equation,
/// (x + y*sqrt(n))^2 = x' + y'*sqrt(n).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegativePellSolution {
    pub solution: (BigUint, BigUint),
    pub solution_index: usize,
    pub aux_solution: (BigUint, BigUint),
    pub aux_solution_index: usize,
    pub expansion: CfExpansion,
}

/// Outcome of the positive-equation solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositivePellOutcome {
    Solved(PositivePellSolution),
    NotSquarefree,
    IsSquare,
}

/// Outcome of the negative-equation solver. For an even period no solution
/// exists; the expansion is still returned so the caller can say why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegativePellOutcome {
    Solved(NegativePellSolution),
    NoSolution { expansion: CfExpansion },
    IsSquare,
}

/// Outcome of the generalized-equation placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralizedPellOutcome {
    NotSupported,
}

/// Check which Pell equation, if either, the pair (x, y) satisfies.
/// Returns Some(1) for x^2 - n*y^2 = 1, Some(-1) for = -1, None otherwise.
pub fn verify_pell_solution(n: &BigUint, x: &BigUint, y: &BigUint) -> Option<i8> {
    let x2 = x * x;
    let ny2 = n * y * y;

    if x2 > ny2 && &x2 - &ny2 == BigUint::one() {
        Some(1)
    } else if ny2 > x2 && &ny2 - &x2 == BigUint::one() {
        Some(-1)
    } else {
        None
    }
}

/// Solve x^2 - n*y^2 = 1 for squarefree n.
pub fn solve_pell(n: &BigUint, budget: &Budget) -> Result<PositivePellOutcome, SolveError> {
    if n.is_zero() {
        return Err(SolveError::InvalidInput);
    }
    match classify(n) {
        Classification::IsSquare => return Ok(PositivePellOutcome::IsSquare),
        Classification::NotSquarefree => return Ok(PositivePellOutcome::NotSquarefree),
        Classification::Squarefree => {}
    }

    let expansion = cf_expand(n, budget)?;
    let k = expansion.period();
    let solution_index = if k % 2 == 0 { k - 1 } else { 2 * k - 1 };
    let c = nth_convergent(&expansion, solution_index);

    if verify_pell_solution(n, &c.p, &c.q) != Some(1) {
        return Err(SolveError::Internal(format!(
            "convergent {} of sqrt({}) does not satisfy x^2 - n*y^2 = 1",
            solution_index, n
        )));
    }

    log::debug!(
        "pell n={}: period {}, solution at index {}",
        n,
        k,
        solution_index
    );
    Ok(PositivePellOutcome::Solved(PositivePellSolution {
        solution: (c.p, c.q),
        solution_index,
        expansion,
    }))
}

/// Solve x^2 - n*y^2 = -1 for non-square n.
///
/// A solution exists exactly when the period is odd. On success the
/// convergent at 2k-1 is returned as the auxiliary solution of the positive
/// equation; it equals (x^2 + n*y^2, 2*x*y).
pub fn solve_negative_pell(
    n: &BigUint,
    budget: &Budget,
) -> Result<NegativePellOutcome, SolveError> {
    if n.is_zero() {
        return Err(SolveError::InvalidInput);
    }
    if is_perfect_square(n).is_some() {
        return Ok(NegativePellOutcome::IsSquare);
    }

    let expansion = cf_expand(n, budget)?;
    let k = expansion.period();
    if k % 2 == 0 {
        log::debug!("negative pell n={}: period {} is even, no solution", n, k);
        return Ok(NegativePellOutcome::NoSolution { expansion });
    }

    let solution_index = k - 1;
    let aux_solution_index = 2 * k - 1;

    // One pass over the iterator picks up both convergents.
    let mut solution = None;
    let mut aux_solution = None;
    for c in ConvergentIter::new(&expansion).take(aux_solution_index + 1) {
        if c.index == solution_index {
            solution = Some((c.p.clone(), c.q.clone()));
        }
        if c.index == aux_solution_index {
            aux_solution = Some((c.p, c.q));
        }
    }
    let (x, y) = solution.ok_or_else(|| {
        SolveError::Internal("convergent iterator ended before the solution index".into())
    })?;
    let (ax, ay) = aux_solution.ok_or_else(|| {
        SolveError::Internal("convergent iterator ended before the aux index".into())
    })?;

    if verify_pell_solution(n, &x, &y) != Some(-1) {
        return Err(SolveError::Internal(format!(
            "convergent {} of sqrt({}) does not satisfy x^2 - n*y^2 = -1",
            solution_index, n
        )));
    }
    if verify_pell_solution(n, &ax, &ay) != Some(1) {
        return Err(SolveError::Internal(format!(
            "convergent {} of sqrt({}) does not satisfy x^2 - n*y^2 = 1",
            aux_solution_index, n
        )));
    }

    log::debug!(
        "negative pell n={}: period {}, solution at {}, aux at {}",
        n,
        k,
        solution_index,
        aux_solution_index
    );
    Ok(NegativePellOutcome::Solved(NegativePellSolution {
        solution: (x, y),
        solution_index,
        aux_solution: (ax, ay),
        aux_solution_index,
        expansion,
    }))
}

/// Placeholder for the generalized equation a*x^2 - b*y^2 = c.
///
/// No algorithm is implemented. Callers always get NotSupported; the
/// boundary must report that rather than approximate.
pub fn solve_generalized_pell(_n: &BigUint) -> GeneralizedPellOutcome {
    GeneralizedPellOutcome::NotSupported
}

/// Step from one solution of x^2 - n*y^2 = 1 to the next, given the
/// fundamental solution: (x, y) -> (x_f*x + n*y_f*y, y_f*x + x_f*y).
pub fn pell_next_solution(
    n: &BigUint,
    fundamental: &(BigUint, BigUint),
    current: &(BigUint, BigUint),
) -> (BigUint, BigUint) {
    let (xf, yf) = fundamental;
    let (x, y) = current;
    (xf * x + n * yf * y, yf * x + xf * y)
}
