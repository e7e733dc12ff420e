//! Input classification for the Pell pipeline.
//!
//! Before any expansion runs, n is classified as exactly one of:
//! - `IsSquare`: sqrt(n) is rational, so the periodic expansion does not exist;
//! - `NotSquarefree`: n has a repeated prime factor;
//! - `Squarefree`: the success path for the positive equation.
//!
//! The positive-equation solver requires `Squarefree`; the negative-equation
//! solver only requires non-square n. That asymmetry is part of the solver
//! contract and is preserved here rather than smoothed over.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Classification of a solve input, computed once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// n is a perfect square; sqrt(n) has no periodic expansion.
    IsSquare,
    /// n has no repeated prime factor.
    Squarefree,
    /// n has a repeated prime factor.
    NotSquarefree,
}

/// Compute floor(sqrt(n)) for BigUint using Newton's method.
///
/// Exact integer arithmetic throughout: a floating approximation of sqrt(n)
/// is off by one for large n, which would corrupt every digit downstream.
pub fn isqrt(n: &BigUint) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }
    if *n == BigUint::one() {
        return BigUint::one();
    }

    // Initial guess: 2^((bits+1)/2)
    let bits = n.bits();
    let mut x = BigUint::one() << ((bits + 1) / 2);

    loop {
        // x_next = (x + n/x) / 2
        let x_next = (&x + n / &x) >> 1;
        if x_next >= x {
            return x;
        }
        x = x_next;
    }
}

/// Check if n is a perfect square. Returns Some(sqrt) if so, None otherwise.
pub fn is_perfect_square(n: &BigUint) -> Option<BigUint> {
    if n.is_zero() {
        return Some(BigUint::zero());
    }
    let s = isqrt(n);
    if &(&s * &s) == n {
        Some(s)
    } else {
        None
    }
}

/// Check whether n is squarefree (no repeated prime factor).
///
/// Trial-divides by candidates d with d^3 <= cofactor, counting the
/// multiplicity of each divisor found. Once the loop ends, the remaining
/// cofactor has at most two prime factors, all above the cube root, so the
/// only way it can hide a repeated factor is by being a perfect square.
pub fn is_squarefree(n: &BigUint) -> bool {
    if n.is_zero() {
        return false;
    }

    let mut m = n.clone();
    let two = BigUint::from(2u32);

    // Strip factors of 2 first so the main loop can step by 2.
    let mut count = 0u32;
    while m.is_even() {
        m >>= 1u32;
        count += 1;
        if count >= 2 {
            return false;
        }
    }

    let mut d = BigUint::from(3u32);
    while &(&d * &d) * &d <= m {
        let mut count = 0u32;
        loop {
            let (q, r) = m.div_rem(&d);
            if !r.is_zero() {
                break;
            }
            m = q;
            count += 1;
            if count >= 2 {
                return false;
            }
        }
        d += &two;
    }

    if m > BigUint::one() && is_perfect_square(&m).is_some() {
        return false;
    }
    true
}

/// Classify n for the solving pipeline. IsSquare takes precedence.
///
/// The caller rejects n = 0 before this point; zero never reaches here from
/// the solver entry points.
pub fn classify(n: &BigUint) -> Classification {
    if is_perfect_square(n).is_some() {
        Classification::IsSquare
    } else if is_squarefree(n) {
        Classification::Squarefree
    } else {
        Classification::NotSquarefree
    }
}
