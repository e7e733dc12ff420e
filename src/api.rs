//! Request/response boundary for the solvers.
//!
//! The presentation layer binds to these field names: `outcome`, `solution`,
//! `aux_solution`, `period`, `cont_frac`, `solution_index`,
//! `aux_solution_index`. The response is a serde enum tagged by `outcome`,
//! one variant per outcome in the error taxonomy, so an impossible field
//! combination cannot be constructed.
//!
//! Numbers cross the wire as decimal strings: solutions grow far past the
//! range JSON numbers can carry exactly. `cont_frac` starts with the integer
//! part a_0 followed by one minimal period of digits.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::cf::{Budget, CfExpansion};
use crate::error::SolveError;
use crate::pell::{
    solve_negative_pell, solve_pell, GeneralizedPellOutcome, NegativePellOutcome,
    PositivePellOutcome,
};

/// A solve request: n as decimal text, parsed to arbitrary precision.
#[derive(Debug, Clone, Deserialize)]
pub struct PellRequest {
    pub n: String,
}

/// The boundary response, tagged by outcome.
///
/// `Success` covers both equations; the aux fields are populated only on
/// the negative-equation path and omitted from the JSON otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome")]
pub enum PellResponse {
    Success {
        solution: (String, String),
        solution_index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        aux_solution: Option<(String, String)>,
        #[serde(skip_serializing_if = "Option::is_none")]
        aux_solution_index: Option<usize>,
        period: usize,
        cont_frac: Vec<String>,
    },
    SuccessNoSolution {
        period: usize,
        cont_frac: Vec<String>,
    },
    NotSquarefree,
    IsSquare,
    NotSupported,
    InvalidInput,
    ResourceExceeded {
        max_terms: usize,
    },
    InternalError {
        detail: String,
    },
}

fn pair_to_strings(pair: &(BigUint, BigUint)) -> (String, String) {
    (pair.0.to_string(), pair.1.to_string())
}

fn cont_frac_strings(expansion: &CfExpansion) -> Vec<String> {
    std::iter::once(&expansion.a0)
        .chain(expansion.digits.iter())
        .map(|d| d.to_string())
        .collect()
}

fn error_response(err: SolveError, budget: &Budget) -> PellResponse {
    match err {
        SolveError::InvalidInput => PellResponse::InvalidInput,
        SolveError::ResourceExceeded { max_terms } => {
            PellResponse::ResourceExceeded { max_terms }
        }
        SolveError::Timeout(elapsed) => {
            log::warn!("solve hit the time budget after {:?}", elapsed);
            PellResponse::ResourceExceeded {
                max_terms: budget.max_terms,
            }
        }
        SolveError::Internal(detail) => {
            log::error!("internal solver defect: {}", detail);
            PellResponse::InternalError { detail }
        }
    }
}

fn parse_n(req: &PellRequest) -> Option<BigUint> {
    let n: BigUint = req.n.trim().parse().ok()?;
    if n.is_zero() {
        return None;
    }
    Some(n)
}

/// Handle a positive-equation request: x^2 - n*y^2 = 1.
pub fn handle_pell(req: &PellRequest, budget: &Budget) -> PellResponse {
    let n = match parse_n(req) {
        Some(n) => n,
        None => return PellResponse::InvalidInput,
    };
    log::info!("pell request: n = {}", n);

    match solve_pell(&n, budget) {
        Ok(PositivePellOutcome::Solved(s)) => PellResponse::Success {
            solution: pair_to_strings(&s.solution),
            solution_index: s.solution_index,
            aux_solution: None,
            aux_solution_index: None,
            period: s.expansion.period(),
            cont_frac: cont_frac_strings(&s.expansion),
        },
        Ok(PositivePellOutcome::NotSquarefree) => PellResponse::NotSquarefree,
        Ok(PositivePellOutcome::IsSquare) => PellResponse::IsSquare,
        Err(err) => error_response(err, budget),
    }
}

/// Handle a negative-equation request: x^2 - n*y^2 = -1.
pub fn handle_negative_pell(req: &PellRequest, budget: &Budget) -> PellResponse {
    let n = match parse_n(req) {
        Some(n) => n,
        None => return PellResponse::InvalidInput,
    };
    log::info!("negative pell request: n = {}", n);

    match solve_negative_pell(&n, budget) {
        Ok(NegativePellOutcome::Solved(s)) => PellResponse::Success {
            solution: pair_to_strings(&s.solution),
            solution_index: s.solution_index,
            aux_solution: Some(pair_to_strings(&s.aux_solution)),
            aux_solution_index: Some(s.aux_solution_index),
            period: s.expansion.period(),
            cont_frac: cont_frac_strings(&s.expansion),
        },
        Ok(NegativePellOutcome::NoSolution { expansion }) => PellResponse::SuccessNoSolution {
            period: expansion.period(),
            cont_frac: cont_frac_strings(&expansion),
        },
        Ok(NegativePellOutcome::IsSquare) => PellResponse::IsSquare,
        Err(err) => error_response(err, budget),
    }
}

/// Handle a generalized-equation request: a*x^2 - b*y^2 = c.
/// Deliberately unimplemented; always NotSupported.
pub fn handle_generalized_pell(req: &PellRequest) -> PellResponse {
    let n = match parse_n(req) {
        Some(n) => n,
        None => return PellResponse::InvalidInput,
    };
    match crate::pell::solve_generalized_pell(&n) {
        GeneralizedPellOutcome::NotSupported => PellResponse::NotSupported,
    }
}
