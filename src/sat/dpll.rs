//! The DPLL (Davis-Putnam-Logemann-Loveland) backtracking solver.
//!
//! A recursive state machine over (formula, assignment) pairs:
//!
//! 1. **Unit propagation**: every unit clause forces its literal; the
//!    formula is simplified after each binding until no unit clauses remain.
//!    A clashing binding or an emptied clause is a conflict and fails the
//!    branch.
//! 2. **Pure literal elimination**: a variable occurring with only one
//!    polarity is bound to that polarity for free and its clauses dropped.
//! 3. **Termination checks**: an empty formula is satisfied; if no
//!    unassigned variables remain in the formula, every clause is evaluated
//!    under the full assignment.
//! 4. **Case split**: otherwise the lowest-id unassigned variable is tried
//!    `true` then `false`, each branch on its own clone of the formula and
//!    assignment so branches never observe each other's mutations.
//!
//! The lowest-id-first split is a deliberate deterministic tie-break so runs
//! are reproducible. Only the boolean verdict is surfaced; the satisfying
//! assignment is discarded.

use crate::sat::assignment::Assignment;
use crate::sat::budget::Budget;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::{SolverError, SolverResult};
use rustc_hash::FxHashSet;

/// Decides satisfiability of `cnf` by backtracking search.
///
/// # Errors
///
/// Returns [`SolverError::Timeout`] if the budget's deadline expires at any
/// depth of the search; the error propagates out of the whole recursion.
pub fn solve(cnf: &Cnf, budget: &mut Budget) -> SolverResult {
    if cnf.has_empty_clause() {
        return Ok(false);
    }

    let assignment = Assignment::new(cnf.num_vars);
    search(cnf.clauses.clone(), assignment, budget)
}

/// One node of the search tree. Owns its formula and assignment; branches
/// receive clones.
fn search(clauses: Vec<Clause>, mut assignment: Assignment, budget: &mut Budget) -> SolverResult {
    let Some(mut clauses) = unit_propagate(clauses, &mut assignment, budget)? else {
        return Ok(false);
    };
    if clauses.is_empty() {
        return Ok(true);
    }

    clauses = eliminate_pures(clauses, &mut assignment, budget)?;
    if clauses.is_empty() {
        return Ok(true);
    }

    let Some(var) = pick_variable(&clauses, &assignment) else {
        // No unassigned variables left but clauses remain: evaluate them
        // under the full assignment.
        return Ok(clauses.iter().all(|c| assignment.satisfies(c)));
    };

    for value in [true, false] {
        budget.tick()?;

        let mut branch_assignment = assignment.clone();
        branch_assignment.assign(var, value);

        if let Some(branch_clauses) = simplify(clauses.clone(), var, value, budget)? {
            if search(branch_clauses, branch_assignment, budget)? {
                return Ok(true);
            }
        }
    }

    Ok(false)
}

/// Propagates unit clauses to a fixpoint.
///
/// Returns `None` on conflict: either a unit forces a variable against its
/// existing binding, or simplification empties a clause.
fn unit_propagate(
    mut clauses: Vec<Clause>,
    assignment: &mut Assignment,
    budget: &mut Budget,
) -> Result<Option<Vec<Clause>>, SolverError> {
    let mut changed = true;
    while changed {
        budget.tick()?;
        changed = false;

        let Some(unit) = clauses.iter().find(|c| c.is_unit()) else {
            break;
        };
        let lit = unit[0];
        let (var, value) = (lit.variable(), lit.polarity());

        match assignment.var_value(var) {
            Some(existing) if existing != value => return Ok(None),
            Some(_) => {}
            None => {
                assignment.assign(var, value);
                match simplify(clauses, var, value, budget)? {
                    None => return Ok(None),
                    Some(next) => clauses = next,
                }
                changed = true;
            }
        }
    }

    Ok(Some(clauses))
}

/// Binds every pure literal and drops the clauses it satisfies.
///
/// Removing whole clauses can create new pure variables but never new unit
/// clauses, so this iterates to its own fixpoint without re-entering
/// propagation.
fn eliminate_pures(
    mut clauses: Vec<Clause>,
    assignment: &mut Assignment,
    budget: &mut Budget,
) -> Result<Vec<Clause>, SolverError> {
    loop {
        let pures = find_pures(&clauses);
        if pures.is_empty() {
            return Ok(clauses);
        }

        for &lit in &pures {
            budget.tick()?;
            assignment.assign(lit.variable(), lit.polarity());
        }

        clauses.retain(|clause| !clause.iter().any(|lit| pures.contains(lit)));
    }
}

/// Collects the literals whose variables occur with a single polarity.
fn find_pures(clauses: &[Clause]) -> FxHashSet<Literal> {
    let mut pures: FxHashSet<Literal> = FxHashSet::default();
    let mut impures: FxHashSet<Variable> = FxHashSet::default();

    for clause in clauses {
        for &lit in clause.iter() {
            if impures.contains(&lit.variable()) {
                continue;
            }
            if pures.contains(&lit.negated()) {
                pures.remove(&lit.negated());
                impures.insert(lit.variable());
                continue;
            }
            pures.insert(lit);
        }
    }

    pures
}

/// Simplifies the formula under the binding `var := value`: clauses
/// satisfied by the binding are dropped and the falsified literal is removed
/// from the rest. Returns `None` when a clause empties out (conflict).
fn simplify(
    clauses: Vec<Clause>,
    var: Variable,
    value: bool,
    budget: &mut Budget,
) -> Result<Option<Vec<Clause>>, SolverError> {
    let satisfied = Literal::new(var, value);
    let falsified = satisfied.negated();

    let mut next = Vec::with_capacity(clauses.len());
    for clause in clauses {
        budget.tick()?;

        if clause.contains(satisfied) {
            continue;
        }
        let reduced = clause.without(falsified);
        if reduced.is_empty() {
            return Ok(None);
        }
        next.push(reduced);
    }

    Ok(Some(next))
}

/// The lowest-id unassigned variable occurring in the formula.
fn pick_variable(clauses: &[Clause], assignment: &Assignment) -> Option<Variable> {
    clauses
        .iter()
        .flat_map(Clause::iter)
        .map(|lit| lit.variable())
        .filter(|&var| !assignment.is_assigned(var))
        .min()
}
