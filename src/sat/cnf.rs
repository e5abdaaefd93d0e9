//! CNF formulas: a conjunction of clauses over a dense variable domain.

use crate::sat::clause::Clause;
use crate::sat::literal::Variable;
use std::fmt;

/// A formula in conjunctive normal form.
///
/// `num_vars` is the size of the variable domain `1..=num_vars` declared by
/// the problem header; it may exceed the variables actually mentioned in the
/// clauses. The clause collection is order-preserving but semantically
/// unordered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// The clauses of the formula.
    pub clauses: Vec<Clause>,
    /// The declared number of variables.
    pub num_vars: usize,
}

impl Cnf {
    /// Creates a formula from raw DIMACS clauses and a declared domain size.
    #[must_use]
    pub fn new(clauses: Vec<Vec<i32>>, num_vars: usize) -> Self {
        Self {
            clauses: clauses.into_iter().map(Clause::from).collect(),
            num_vars,
        }
    }

    /// The variable domain in ascending order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> {
        1..=u32::try_from(self.num_vars).unwrap_or(u32::MAX)
    }

    /// A formula with no clauses is trivially satisfiable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether any clause is the empty clause, which makes the whole formula
    /// immediately unsatisfiable.
    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }
}

/// Derives the variable domain from the largest variable mentioned. Useful
/// for formulas built in code rather than parsed from a header.
impl From<Vec<Vec<i32>>> for Cnf {
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        let num_vars = clauses
            .iter()
            .flatten()
            .map(|lit| lit.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        Self::new(clauses, num_vars)
    }
}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}
