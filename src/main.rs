//! pell-cf CLI: solve Pell equations from the command line.
//!
//! Usage:
//!   pell-cf --n=61                     Solve x^2 - 61*y^2 = 1
//!   pell-cf --equation=negative --n=2  Solve x^2 - 2*y^2 = -1
//!   pell-cf --n=13 --json              Emit the wire response as JSON
//!
//! Options:
//!   --equation=pell|negative|generalized   Which equation (default: pell)
//!   --n=<decimal>                          The input; without it a demo
//!                                          sweep over small n runs
//!   --max-terms=<N>                        Expansion term budget
//!   --json                                 Print the serialized response

use pell_cf::{
    handle_generalized_pell, handle_negative_pell, handle_pell, Budget, PellRequest, PellResponse,
};

struct CliConfig {
    equation: Equation,
    n: Option<String>,
    max_terms: Option<usize>,
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Equation {
    Pell,
    Negative,
    Generalized,
}

fn parse_args() -> CliConfig {
    let args: Vec<String> = std::env::args().collect();

    let equation = if args.iter().any(|a| a.contains("--equation=negative")) {
        Equation::Negative
    } else if args.iter().any(|a| a.contains("--equation=generalized")) {
        Equation::Generalized
    } else {
        Equation::Pell
    };

    let n = args
        .iter()
        .find(|a| a.starts_with("--n="))
        .map(|a| a.strip_prefix("--n=").unwrap().to_string());

    let max_terms = args
        .iter()
        .find(|a| a.starts_with("--max-terms="))
        .and_then(|a| a.strip_prefix("--max-terms=")?.parse::<usize>().ok());

    let json = args.iter().any(|a| a == "--json");

    CliConfig {
        equation,
        n,
        max_terms,
        json,
    }
}

fn solve_one(equation: Equation, n: &str, budget: &Budget) -> PellResponse {
    let req = PellRequest { n: n.to_string() };
    match equation {
        Equation::Pell => handle_pell(&req, budget),
        Equation::Negative => handle_negative_pell(&req, budget),
        Equation::Generalized => handle_generalized_pell(&req),
    }
}

fn print_response(n: &str, resp: &PellResponse) {
    match resp {
        PellResponse::Success {
            solution,
            solution_index,
            aux_solution,
            aux_solution_index,
            period,
            cont_frac,
        } => {
            println!(
                "  n={}: sqrt = [{}; {}], period {}",
                n,
                cont_frac[0],
                cont_frac[1..].join(", "),
                period
            );
            println!(
                "    solution (x, y) = ({}, {}) at convergent {}",
                solution.0, solution.1, solution_index
            );
            if let (Some((ax, ay)), Some(idx)) = (aux_solution, aux_solution_index) {
                println!(
                    "    auxiliary positive solution ({}, {}) at convergent {}",
                    ax, ay, idx
                );
            }
        }
        PellResponse::SuccessNoSolution { period, cont_frac } => {
            println!(
                "  n={}: period {} is even ([{}; {}]), the negative equation has no solution",
                n,
                period,
                cont_frac[0],
                cont_frac[1..].join(", ")
            );
        }
        other => println!("  n={}: {:?}", n, other),
    }
}

fn main() {
    env_logger::init();
    let config = parse_args();

    let budget = match config.max_terms {
        Some(max_terms) => Budget::with_max_terms(max_terms),
        None => Budget::default(),
    };

    if let Some(n) = &config.n {
        let resp = solve_one(config.equation, n, &budget);
        if config.json {
            println!("{}", serde_json::to_string_pretty(&resp).unwrap());
        } else {
            print_response(n, &resp);
        }
        return;
    }

    // No --n: demo sweep over small inputs.
    println!("=== pell-cf: x^2 - n*y^2 = 1 for small n ===");
    for n in ["2", "3", "5", "6", "7", "13", "61", "109"] {
        print_response(n, &solve_one(Equation::Pell, n, &budget));
    }

    println!("\n=== x^2 - n*y^2 = -1 for small n ===");
    for n in ["2", "3", "5", "10", "13", "61"] {
        print_response(n, &solve_one(Equation::Negative, n, &budget));
    }
}
