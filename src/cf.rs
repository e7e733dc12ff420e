//! Continued fraction expansion of sqrt(n).
//!
//! For non-square n the expansion is periodic:
//!   sqrt(n) = a_0 + 1/(a_1 + 1/(a_2 + ...))
//! with a repeating block [a_1, ..., a_k] whose closing digit is a_k = 2*a_0.
//!
//! The expander runs the integer recurrence on the triple (m_i, d_i, a_i):
//!   m_0 = 0, d_0 = 1, a_0 = floor(sqrt(n))
//!   m_{i+1} = d_i * a_i - m_i
//!   d_{i+1} = (n - m_{i+1}^2) / d_i        (always an exact division)
//!   a_{i+1} = floor((a_0 + m_{i+1}) / d_{i+1})
//! and stops at the first digit equal to 2*a_0, which closes the minimal
//! period. Exactness of the division is an invariant of the recurrence; a
//! nonzero remainder means the state is corrupt and the expansion aborts
//! with `SolveError::Internal` instead of truncating.

use std::time::{Duration, Instant};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::classify::isqrt;
use crate::error::SolveError;

/// Default ceiling on the number of expansion terms.
pub const DEFAULT_MAX_TERMS: usize = 100_000;

/// How many expansion steps run between time-budget checks.
const TIME_CHECK_INTERVAL: usize = 1024;

/// Work budget for a single solve.
///
/// Period length grows roughly with sqrt(n), so adversarial inputs need a
/// hard stop. Exhaustion surfaces as `ResourceExceeded` (or `Timeout`), not
/// as unbounded work.
#[derive(Debug, Clone)]
pub struct Budget {
    /// Maximum number of partial quotients to compute.
    pub max_terms: usize,
    /// Optional wall-clock limit for the expansion.
    pub time_limit: Option<Duration>,
}

impl Default for Budget {
    fn default() -> Self {
        Budget {
            max_terms: DEFAULT_MAX_TERMS,
            time_limit: None,
        }
    }
}

impl Budget {
    pub fn with_max_terms(max_terms: usize) -> Self {
        Budget {
            max_terms,
            ..Budget::default()
        }
    }
}

/// One minimal period of the continued fraction of sqrt(n).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfExpansion {
    /// The number whose square root is expanded.
    pub n: BigUint,
    /// Integer part a_0 = floor(sqrt(n)).
    pub a0: BigUint,
    /// The periodic digits [a_1, ..., a_k]; the last digit is 2*a_0.
    pub digits: Vec<BigUint>,
}

impl CfExpansion {
    /// Period length k of the expansion.
    pub fn period(&self) -> usize {
        self.digits.len()
    }

    /// Partial quotient a_i for i >= 1, reading the digit block cyclically
    /// once i runs past the first period.
    pub fn digit(&self, i: usize) -> &BigUint {
        debug_assert!(i >= 1, "digit index starts at 1; a_0 is the integer part");
        &self.digits[(i - 1) % self.digits.len()]
    }
}

/// Expand sqrt(n) into one minimal period of partial quotients.
///
/// The caller guarantees n > 0 and non-square; a perfect square reaching
/// this point is a pipeline defect and reports `Internal`. The budget bounds
/// both the number of terms and (optionally) wall-clock time.
pub fn cf_expand(n: &BigUint, budget: &Budget) -> Result<CfExpansion, SolveError> {
    if n.is_zero() {
        return Err(SolveError::InvalidInput);
    }

    let a0 = isqrt(n);
    if &(&a0 * &a0) == n {
        return Err(SolveError::Internal(format!(
            "cf_expand called on perfect square n = {}",
            n
        )));
    }

    let started = Instant::now();
    let two_a0 = &a0 << 1;

    let mut digits = Vec::new();
    let mut m = BigUint::zero();
    let mut d = BigUint::one();
    let mut a = a0.clone();

    for step in 0..budget.max_terms {
        if let Some(limit) = budget.time_limit {
            if step % TIME_CHECK_INTERVAL == 0 && started.elapsed() >= limit {
                return Err(SolveError::Timeout(started.elapsed()));
            }
        }

        m = &d * &a - &m;
        let m_sq = &m * &m;
        if &m_sq >= n {
            return Err(SolveError::Internal(format!(
                "expansion state out of range: m = {} with n = {}",
                m, n
            )));
        }
        let (q, r) = (n - &m_sq).div_rem(&d);
        if !r.is_zero() {
            return Err(SolveError::Internal(format!(
                "non-exact division (n - m^2) / d at term {}: remainder {}",
                step + 1,
                r
            )));
        }
        d = q;
        a = (&a0 + &m) / &d;
        digits.push(a.clone());

        if a == two_a0 {
            return Ok(CfExpansion {
                n: n.clone(),
                a0,
                digits,
            });
        }
    }

    Err(SolveError::ResourceExceeded {
        max_terms: budget.max_terms,
    })
}
