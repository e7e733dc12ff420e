//! Error taxonomy for the solving pipeline.
//!
//! Domain outcomes (NotSquarefree, IsSquare, no negative-Pell solution,
//! NotSupported) are ordinary values on the solver enums, not errors.
//! `SolveError` covers only the defect and limit paths: bad input, an
//! exhausted iteration budget, and violated arithmetic invariants.

use std::time::Duration;

/// Failure modes of a solve call.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("n must be a positive integer")]
    InvalidInput,

    #[error("continued fraction of sqrt(n) did not close within {max_terms} terms")]
    ResourceExceeded { max_terms: usize },

    #[error("solve aborted after {0:?}")]
    Timeout(Duration),

    #[error("arithmetic invariant violated: {0}")]
    Internal(String),
}
