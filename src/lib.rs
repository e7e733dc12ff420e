//! # pell-cf
//!
//! Fundamental solutions of Pell equations x^2 - n*y^2 = +/-1 via the
//! regular continued fraction expansion of sqrt(n).
//!
//! The pipeline for a validated positive integer n:
//! classify (square / squarefree) -> expand one minimal period of sqrt(n)
//! -> generate convergents lazily -> select the solution-bearing convergent
//! by period parity. All arithmetic is arbitrary precision; solution
//! numerators and denominators grow exponentially with the period.
//!
//! ## Modules
//!
//! - **classify**: perfect-square and squarefree classification, exact isqrt
//! - **cf**: periodic continued fraction expansion with a work budget
//! - **convergents**: lazy convergent recurrence, cyclic past the period
//! - **pell**: positive and negative equation solvers, generalized stub
//! - **api**: the serde request/response boundary consumed by callers

pub mod api;
pub mod cf;
pub mod classify;
pub mod convergents;
pub mod error;
pub mod pell;

pub use api::{handle_generalized_pell, handle_negative_pell, handle_pell, PellRequest, PellResponse};
pub use cf::{cf_expand, Budget, CfExpansion, DEFAULT_MAX_TERMS};
pub use classify::{classify, is_perfect_square, is_squarefree, isqrt, Classification};
pub use convergents::{nth_convergent, Convergent, ConvergentIter};
pub use error::SolveError;
pub use pell::{
    pell_next_solution, solve_generalized_pell, solve_negative_pell, solve_pell,
    verify_pell_solution, NegativePellOutcome, NegativePellSolution, PositivePellOutcome,
    PositivePellSolution,
};
