//! Cross-method properties: the three algorithms must agree with each other
//! (and with brute force) wherever none of them runs out of resources, and
//! resource exhaustion must surface as TIMEOUT / INDETERMINATE verdicts
//! rather than wrong answers or hangs.

use sat_classics::sat::budget::Budget;
use sat_classics::sat::cnf::Cnf;
use sat_classics::sat::solver::{Method, SolveOptions, Verdict, solve, solve_with};
use std::time::Duration;

const METHODS: [Method; 3] = [Method::Dp, Method::Dpll, Method::Res];

/// Brute-force satisfiability over all assignments; only for tiny domains.
fn brute_force(cnf: &Cnf) -> bool {
    let n = cnf.num_vars;
    (0..1u32 << n).any(|bits| {
        cnf.clauses.iter().all(|clause| {
            clause.iter().any(|lit| {
                let value = bits >> (lit.variable() - 1) & 1 == 1;
                if lit.polarity() { value } else { !value }
            })
        })
    })
}

/// The pigeonhole principle PHP(holes + 1, holes): variable `(i-1)*holes + j`
/// means pigeon `i` sits in hole `j`. Unsatisfiable, and pathologically hard
/// for all three procedures.
fn pigeonhole(holes: u32) -> Cnf {
    let pigeons = holes + 1;
    let var = |pigeon: u32, hole: u32| ((pigeon - 1) * holes + hole) as i32;

    let mut clauses: Vec<Vec<i32>> = Vec::new();
    for pigeon in 1..=pigeons {
        clauses.push((1..=holes).map(|hole| var(pigeon, hole)).collect());
    }
    for hole in 1..=holes {
        for first in 1..=pigeons {
            for second in (first + 1)..=pigeons {
                clauses.push(vec![-var(first, hole), -var(second, hole)]);
            }
        }
    }
    Cnf::from(clauses)
}

#[test]
fn methods_agree_with_brute_force_on_small_formulas() {
    // Every subset of up to three clauses from a small pool over vars 1..=3.
    let pool: Vec<Vec<i32>> = vec![
        vec![1],
        vec![-1, 2],
        vec![-2, 3],
        vec![-3],
        vec![1, 2, 3],
        vec![-1, -2, -3],
    ];

    for mask in 0u32..1 << pool.len() {
        if mask.count_ones() > 3 {
            continue;
        }
        let clauses: Vec<Vec<i32>> = pool
            .iter()
            .enumerate()
            .filter(|(i, _)| mask >> i & 1 == 1)
            .map(|(_, c)| c.clone())
            .collect();
        let cnf = Cnf::from(clauses.clone());
        let expected = if brute_force(&cnf) {
            Verdict::Sat
        } else {
            Verdict::Unsat
        };

        for method in METHODS {
            let verdict = solve(method, &cnf, &mut Budget::default());
            assert_eq!(verdict, expected, "{method} disagrees on {clauses:?}");
        }
    }
}

#[test]
fn pigeonhole_times_out_with_millisecond_deadline() {
    let cnf = pigeonhole(6);

    for method in METHODS {
        let mut budget = Budget::new(Duration::from_millis(5));
        let verdict = solve(method, &cnf, &mut budget);
        assert_eq!(verdict, Verdict::Timeout, "{method}");
        assert!(budget.operations() > 0, "{method} counted no operations");
    }
}

#[test]
fn small_pigeonhole_is_unsat_within_budget() {
    let cnf = pigeonhole(2);
    for method in METHODS {
        let verdict = solve(method, &cnf, &mut Budget::default());
        assert_eq!(verdict, Verdict::Unsat, "{method}");
    }
}

#[test]
fn capped_resolution_is_indeterminate() {
    let cnf = pigeonhole(3);
    let options = SolveOptions {
        max_clauses: 20,
        max_rounds: 1_000,
    };
    let verdict = solve_with(Method::Res, &cnf, &mut Budget::default(), options);
    assert_eq!(verdict, Verdict::Indeterminate);
}
