//! Integration tests for the pell-cf crate.
//!
//! Tests cover:
//! - Exact postconditions x^2 - n*y^2 = +/-1 across a range of n
//! - Minimality of the fundamental solution (exhaustive search for small n)
//! - The auxiliary-solution identity (x^2 + n*y^2, 2*x*y)
//! - Expansion idempotence and convergent self-consistency
//! - The wire contract: outcome tags and field presence

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use pell_cf::{
    cf_expand, classify, solve_negative_pell, solve_pell, verify_pell_solution, Budget,
    Classification, ConvergentIter, NegativePellOutcome, PellRequest, PellResponse,
    PositivePellOutcome,
};

fn big(v: u64) -> BigUint {
    BigUint::from(v)
}

fn positive_solution(n: u64) -> (BigUint, BigUint) {
    match solve_pell(&big(n), &Budget::default()).unwrap() {
        PositivePellOutcome::Solved(s) => s.solution,
        other => panic!("expected a solution for n = {}, got {:?}", n, other),
    }
}

// ---------------------------------------------------------------------------
// Postconditions
// ---------------------------------------------------------------------------

#[test]
fn positive_solutions_satisfy_equation_exactly() {
    for n in [2u64, 3, 5, 6, 7, 10, 11, 13, 14, 15, 19, 21, 29, 31, 46, 53, 61, 94, 109] {
        let (x, y) = positive_solution(n);
        assert_eq!(
            verify_pell_solution(&big(n), &x, &y),
            Some(1),
            "x^2 - {}*y^2 = 1 must hold for ({}, {})",
            n,
            x,
            y
        );
    }
}

#[test]
fn negative_solutions_satisfy_equation_exactly() {
    // n with odd period: the negative equation is solvable.
    for n in [2u64, 5, 10, 13, 17, 26, 29, 37, 41, 53, 58, 61, 65, 73] {
        match solve_negative_pell(&big(n), &Budget::default()).unwrap() {
            NegativePellOutcome::Solved(s) => {
                let (x, y) = &s.solution;
                assert_eq!(verify_pell_solution(&big(n), x, y), Some(-1), "n = {}", n);
                let (ax, ay) = &s.aux_solution;
                assert_eq!(verify_pell_solution(&big(n), ax, ay), Some(1), "aux, n = {}", n);
            }
            other => panic!("n = {} should have a negative solution, got {:?}", n, other),
        }
    }
}

#[test]
fn aux_solution_is_the_square_of_the_fundamental() {
    // (x + y*sqrt(n))^2 = (x^2 + n*y^2) + (2*x*y)*sqrt(n)
    for n in [2u64, 5, 10, 13, 29, 61] {
        match solve_negative_pell(&big(n), &Budget::default()).unwrap() {
            NegativePellOutcome::Solved(s) => {
                let (x, y) = &s.solution;
                let expected = (x * x + big(n) * y * y, BigUint::from(2u32) * x * y);
                assert_eq!(s.aux_solution, expected, "n = {}", n);
            }
            other => panic!("n = {} should have a negative solution, got {:?}", n, other),
        }
    }
}

// ---------------------------------------------------------------------------
// Minimality
// ---------------------------------------------------------------------------

/// Exhaustive search for the smallest y > 0 with n*y^2 + 1 a perfect square.
fn brute_force_fundamental(n: u64) -> (BigUint, BigUint) {
    let n = big(n);
    let mut y = BigUint::one();
    loop {
        let candidate = &n * &y * &y + BigUint::one();
        if let Some(x) = pell_cf::is_perfect_square(&candidate) {
            return (x, y);
        }
        y += BigUint::one();
    }
}

#[test]
fn returned_solution_is_minimal() {
    for n in [2u64, 3, 5, 6, 7, 10, 11, 13, 14, 15, 19, 21, 23, 29, 31, 33] {
        let got = positive_solution(n);
        let expected = brute_force_fundamental(n);
        assert_eq!(got, expected, "fundamental solution for n = {}", n);
    }
}

// ---------------------------------------------------------------------------
// Expansion and convergent consistency
// ---------------------------------------------------------------------------

#[test]
fn repeated_expansion_is_identical() {
    for n in [2u64, 13, 61, 1009] {
        let first = cf_expand(&big(n), &Budget::default()).unwrap();
        let second = cf_expand(&big(n), &Budget::default()).unwrap();
        assert_eq!(first, second, "n = {}", n);
    }
}

#[test]
fn convergents_have_unit_determinant_through_two_periods() {
    for n in [2u64, 3, 7, 13, 61, 109] {
        let expansion = cf_expand(&big(n), &Budget::default()).unwrap();
        let count = 2 * expansion.period() + 1;
        let convs: Vec<_> = ConvergentIter::new(&expansion).take(count).collect();
        for w in convs.windows(2) {
            let det = BigInt::from(w[1].p.clone()) * BigInt::from(w[0].q.clone())
                - BigInt::from(w[0].p.clone()) * BigInt::from(w[1].q.clone());
            let mag: BigInt = if det < BigInt::zero() { -det } else { det };
            assert!(mag.is_one(), "determinant at index {} for n = {}", w[1].index, n);
        }
    }
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_n2() {
    assert_eq!(classify(&big(2)), Classification::Squarefree);
    let exp = cf_expand(&big(2), &Budget::default()).unwrap();
    assert_eq!(exp.a0, big(1));
    assert_eq!(exp.digits, vec![big(2)]);
    assert_eq!(exp.period(), 1);
    assert_eq!(positive_solution(2), (big(3), big(2)));
}

#[test]
fn scenario_n3() {
    let exp = cf_expand(&big(3), &Budget::default()).unwrap();
    assert_eq!(exp.digits, vec![big(1), big(2)]);
    assert_eq!(positive_solution(3), (big(2), big(1)));
    // Even period: the negative equation has no solution.
    assert!(matches!(
        solve_negative_pell(&big(3), &Budget::default()).unwrap(),
        NegativePellOutcome::NoSolution { .. }
    ));
}

#[test]
fn scenario_disqualified_inputs() {
    for n in [4u64, 9] {
        assert_eq!(
            solve_negative_pell(&big(n), &Budget::default()).unwrap(),
            NegativePellOutcome::IsSquare,
            "n = {}",
            n
        );
    }
    assert_eq!(
        solve_pell(&big(12), &Budget::default()).unwrap(),
        PositivePellOutcome::NotSquarefree
    );
}

#[test]
fn large_input_stays_exact() {
    // n = 1234567891 (prime, squarefree). The solution is far beyond u64;
    // verify the postcondition holds under full-precision arithmetic.
    let n: BigUint = "1234567891".parse().unwrap();
    match solve_pell(&n, &Budget::default()).unwrap() {
        PositivePellOutcome::Solved(s) => {
            let (x, y) = &s.solution;
            assert_eq!(verify_pell_solution(&n, x, y), Some(1));
            assert!(x.bits() > 64, "solution should overflow fixed-width integers");
        }
        other => panic!("expected a solution, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Wire contract
// ---------------------------------------------------------------------------

#[test]
fn wire_outcomes_carry_only_their_fields() {
    let budget = Budget::default();

    let resp = pell_cf::handle_pell(&PellRequest { n: "12".into() }, &budget);
    assert_eq!(
        serde_json::to_string(&resp).unwrap(),
        "{\"outcome\":\"NotSquarefree\"}"
    );

    let resp = pell_cf::handle_negative_pell(&PellRequest { n: "3".into() }, &budget);
    let json = serde_json::to_string(&resp).unwrap();
    assert!(json.contains("\"outcome\":\"SuccessNoSolution\""));
    assert!(json.contains("\"period\":2"));
    assert!(json.contains("\"cont_frac\":[\"1\",\"1\",\"2\"]"));
    assert!(!json.contains("solution_index"));

    let resp = pell_cf::handle_generalized_pell(&PellRequest { n: "7".into() });
    assert_eq!(resp, PellResponse::NotSupported);
}

#[test]
fn wire_request_roundtrip() {
    let req: PellRequest = serde_json::from_str("{\"n\": \"61\"}").unwrap();
    let resp = pell_cf::handle_negative_pell(&req, &Budget::default());
    match resp {
        PellResponse::Success {
            solution,
            aux_solution,
            ..
        } => {
            assert_eq!(solution, ("29718".to_string(), "3805".to_string()));
            assert!(aux_solution.is_some());
        }
        other => panic!("expected Success, got {:?}", other),
    }
}
