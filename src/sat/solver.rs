//! Verdicts, solver errors and per-method dispatch.
//!
//! Every algorithm reports plain satisfiability as `Ok(bool)` and resource
//! exhaustion as `Err(SolverError)`; [`solve`] folds both into a [`Verdict`].
//! Branch conflicts and empty resolvents are ordinary control flow inside the
//! algorithms, never errors.

use crate::sat::budget::Budget;
use crate::sat::cnf::Cnf;
use crate::sat::{dp, dpll, resolution};
use clap::ValueEnum;
use std::fmt;

/// The outcome of one solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The formula is satisfiable.
    Sat,
    /// The formula is unsatisfiable.
    Unsat,
    /// Resolution hit a resource cap before reaching a fixpoint or the empty
    /// clause; neither satisfiability nor unsatisfiability is proven.
    Indeterminate,
    /// The wall-clock deadline expired mid-search.
    Timeout,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sat => "SAT",
            Self::Unsat => "UNSAT",
            Self::Indeterminate => "INDETERMINATE",
            Self::Timeout => "TIMEOUT",
        };
        write!(f, "{name}")
    }
}

/// Conditions that abort a solve without producing a SAT/UNSAT answer.
///
/// These propagate by `?` out of arbitrarily deep recursion and nested
/// iteration; the dispatch layer converts them into verdicts so a timeout can
/// never be silently truncated to SAT or UNSAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverError {
    /// The operation budget's wall-clock deadline was exceeded.
    Timeout,
    /// Resolution exceeded its clause-set or iteration cap.
    ResourceCap,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "time limit exceeded"),
            Self::ResourceCap => write!(f, "resolution resource cap exceeded"),
        }
    }
}

impl std::error::Error for SolverError {}

/// The result type threaded through every algorithm.
pub type SolverResult = Result<bool, SolverError>;

/// The three solving algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Davis-Putnam variable elimination.
    Dp,
    /// DPLL backtracking search.
    Dpll,
    /// Resolution saturation.
    Res,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dp => "dp",
            Self::Dpll => "dpll",
            Self::Res => "res",
        };
        write!(f, "{name}")
    }
}

/// Tunable resource caps for a solve; only resolution consults them.
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    /// Cap on resolution's clause-set size.
    pub max_clauses: usize,
    /// Cap on resolution's saturation rounds.
    pub max_rounds: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_clauses: resolution::DEFAULT_MAX_CLAUSES,
            max_rounds: resolution::DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Runs `method` on a copy of `cnf` under `budget` with default caps.
pub fn solve(method: Method, cnf: &Cnf, budget: &mut Budget) -> Verdict {
    solve_with(method, cnf, budget, SolveOptions::default())
}

/// Runs `method` on a copy of `cnf` under `budget` and returns the verdict.
///
/// Each invocation works on its own copy of the formula, so no algorithm ever
/// observes another's mutations.
pub fn solve_with(method: Method, cnf: &Cnf, budget: &mut Budget, options: SolveOptions) -> Verdict {
    let result = match method {
        Method::Dp => dp::solve(cnf, budget),
        Method::Dpll => dpll::solve(cnf, budget),
        Method::Res => {
            resolution::Resolution::with_caps(cnf, options.max_clauses, options.max_rounds)
                .solve(budget)
        }
    };

    match result {
        Ok(true) => Verdict::Sat,
        Ok(false) => Verdict::Unsat,
        Err(SolverError::Timeout) => Verdict::Timeout,
        Err(SolverError::ResourceCap) => Verdict::Indeterminate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METHODS: [Method; 3] = [Method::Dp, Method::Dpll, Method::Res];

    fn verdict(method: Method, clauses: Vec<Vec<i32>>) -> Verdict {
        let cnf = Cnf::from(clauses);
        solve(method, &cnf, &mut Budget::default())
    }

    #[test]
    fn test_empty_formula_is_sat_everywhere() {
        for method in METHODS {
            assert_eq!(verdict(method, vec![]), Verdict::Sat, "{method}");
        }
    }

    #[test]
    fn test_empty_clause_is_unsat_everywhere() {
        for method in METHODS {
            assert_eq!(
                verdict(method, vec![vec![1, 2], vec![]]),
                Verdict::Unsat,
                "{method}"
            );
        }
    }

    #[test]
    fn test_methods_agree_on_small_instances() {
        let instances: Vec<(Vec<Vec<i32>>, Verdict)> = vec![
            (vec![vec![1]], Verdict::Sat),
            (vec![vec![1], vec![-1]], Verdict::Unsat),
            (vec![vec![1, 2], vec![-1, 2], vec![1, -2]], Verdict::Sat),
            (
                vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]],
                Verdict::Unsat,
            ),
            (vec![vec![1, -2], vec![2, 3], vec![-3, -1]], Verdict::Sat),
            (
                vec![
                    vec![1, 2, 3],
                    vec![-1, -2],
                    vec![-1, -3],
                    vec![-2, -3],
                    vec![-1, 2, 3],
                    vec![1, -2, 3],
                    vec![1, 2, -3],
                ],
                Verdict::Unsat,
            ),
        ];

        for (clauses, expected) in instances {
            for method in METHODS {
                assert_eq!(
                    verdict(method, clauses.clone()),
                    expected,
                    "{method} disagrees on {clauses:?}"
                );
            }
        }
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Sat.to_string(), "SAT");
        assert_eq!(Verdict::Unsat.to_string(), "UNSAT");
        assert_eq!(Verdict::Indeterminate.to_string(), "INDETERMINATE");
        assert_eq!(Verdict::Timeout.to_string(), "TIMEOUT");
    }
}
