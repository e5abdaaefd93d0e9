//! The Davis-Putnam variable-elimination procedure.
//!
//! Variables are eliminated strictly in ascending id order. For each
//! variable the clause set splits into clauses holding it positively,
//! clauses holding it negatively, and the untouched remainder; every
//! positive/negative pair is resolved and the variable disappears from the
//! formula. An empty resolvent proves unsatisfiability; running out of
//! clauses (or of variables) proves satisfiability.
//!
//! The fixed elimination order is a documented performance limitation of the
//! procedure, not something to paper over with a heuristic: pairwise
//! resolution is quadratic in the clauses per variable, so the resolvent set
//! is deduplicated by canonical clause content to bound the blow-up across
//! elimination steps.

use crate::sat::budget::Budget;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::{SolverError, SolverResult};
use rustc_hash::FxHashSet;

/// Decides satisfiability of `cnf` by variable elimination.
///
/// # Errors
///
/// Returns [`crate::sat::solver::SolverError::Timeout`] if the budget's
/// deadline expires mid-elimination.
pub fn solve(cnf: &Cnf, budget: &mut Budget) -> SolverResult {
    if cnf.has_empty_clause() {
        return Ok(false);
    }

    let mut clauses = cnf.clauses.clone();

    for var in cnf.variables() {
        match eliminate(&clauses, var, budget)? {
            // An empty resolvent was derived.
            None => return Ok(false),
            Some(next) => clauses = next,
        }

        if clauses.is_empty() {
            return Ok(true);
        }
    }

    // Every variable eliminated without deriving the empty clause.
    Ok(true)
}

/// Eliminates `var`, returning the remainder plus deduplicated resolvents,
/// or `None` when an empty resolvent proves the formula unsatisfiable.
fn eliminate(
    clauses: &[Clause],
    var: Variable,
    budget: &mut Budget,
) -> Result<Option<Vec<Clause>>, SolverError> {
    let positive = Literal::new(var, true);
    let negative = positive.negated();

    let mut pos_clauses = Vec::new();
    let mut neg_clauses = Vec::new();
    let mut rest = Vec::new();

    for clause in clauses {
        if clause.contains(positive) {
            pos_clauses.push(clause);
        } else if clause.contains(negative) {
            neg_clauses.push(clause);
        } else {
            rest.push(clause.clone());
        }
    }

    let mut seen: FxHashSet<Clause> = FxHashSet::default();

    for pos in &pos_clauses {
        for neg in &neg_clauses {
            budget.tick()?;

            let resolvent = pos.resolve(neg, var);
            if resolvent.is_empty() {
                return Ok(None);
            }
            if resolvent.is_tautology() {
                continue;
            }
            if seen.insert(resolvent.clone()) {
                rest.push(resolvent);
            }
        }
    }

    Ok(Some(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(clauses: Vec<Vec<i32>>) -> bool {
        solve(&Cnf::from(clauses), &mut Budget::default()).unwrap()
    }

    #[test]
    fn test_empty_formula_is_sat() {
        assert!(run(vec![]));
    }

    #[test]
    fn test_empty_clause_is_unsat() {
        assert!(!run(vec![vec![]]));
        assert!(!run(vec![vec![1, 2], vec![]]));
    }

    #[test]
    fn test_complementary_units_are_unsat() {
        assert!(!run(vec![vec![1], vec![-1]]));
    }

    #[test]
    fn test_simple_sat() {
        assert!(run(vec![vec![1, 2], vec![-1, 2], vec![1, -2]]));
    }

    #[test]
    fn test_full_binary_square_is_unsat() {
        assert!(!run(vec![
            vec![1, 2],
            vec![-1, 2],
            vec![1, -2],
            vec![-1, -2]
        ]));
    }

    #[test]
    fn test_chain_implication_sat() {
        // 1 -> 2 -> 3, with 1 forced: satisfiable by all-true.
        assert!(run(vec![vec![1], vec![-1, 2], vec![-2, 3]]));
    }

    #[test]
    fn test_resolvents_are_deduplicated() {
        // Both pairs resolve on 1 to the same clause [2]; dedup keeps one.
        let clauses = vec![
            Clause::new(vec![1, 2]),
            Clause::new(vec![1, 2]),
            Clause::new(vec![-1, 2]),
        ];
        let result = eliminate(&clauses, 1, &mut Budget::default())
            .unwrap()
            .unwrap();
        assert_eq!(result, vec![Clause::new(vec![2])]);
    }

    #[test]
    fn test_tautological_resolvents_are_dropped() {
        // Resolving on 1 yields [2, -2], a tautology; nothing remains.
        let clauses = vec![Clause::new(vec![1, 2]), Clause::new(vec![-1, -2])];
        let result = eliminate(&clauses, 1, &mut Budget::default())
            .unwrap()
            .unwrap();
        assert!(result.is_empty());
    }
}
