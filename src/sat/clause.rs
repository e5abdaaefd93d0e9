//! Clauses as canonical literal sets.
//!
//! A clause is the disjunction of its literals. Literals are kept sorted and
//! deduplicated, so two clauses with the same literal content compare equal
//! and hash identically regardless of the order they were built in. That
//! canonical form is what makes resolvent deduplication in the eliminator and
//! the saturator cheap.

use crate::sat::literal::{Literal, Variable};
use core::ops::Index;
use smallvec::SmallVec;
use std::fmt;

/// Inline storage for the common case of short clauses.
type Literals = SmallVec<[Literal; 8]>;

/// A disjunction of distinct literals in canonical (sorted) order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: Literals,
}

impl Clause {
    /// Builds a clause from raw DIMACS literals, sorting and deduplicating.
    #[must_use]
    pub fn new(literals: Vec<i32>) -> Self {
        Self::from_literals(literals.into_iter().map(Literal::from))
    }

    /// Builds a clause from literals, establishing the canonical form.
    pub fn from_literals<I: IntoIterator<Item = Literal>>(literals: I) -> Self {
        let mut literals: Literals = literals.into_iter().collect();
        literals.sort_unstable();
        literals.dedup();
        Self { literals }
    }

    /// The number of literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Iterates the literals in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// A unit clause forces its single literal.
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// The empty clause is the contradiction.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Whether `lit` occurs in this clause.
    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.binary_search(&lit).is_ok()
    }

    /// Whether either polarity of `var` occurs in this clause.
    pub fn contains_variable(&self, var: Variable) -> bool {
        self.literals.iter().any(|lit| lit.variable() == var)
    }

    /// A tautology contains some literal together with its negation and is
    /// therefore always true.
    pub fn is_tautology(&self) -> bool {
        self.literals.iter().any(|lit| self.contains(lit.negated()))
    }

    /// The resolvent of `self` and `other` on `var`: the union of both
    /// literal sets minus both polarities of `var`.
    #[must_use]
    pub fn resolve(&self, other: &Self, var: Variable) -> Self {
        Self::from_literals(
            self.iter()
                .chain(other.iter())
                .copied()
                .filter(|lit| lit.variable() != var),
        )
    }

    /// A copy of this clause with `lit` removed.
    #[must_use]
    pub fn without(&self, lit: Literal) -> Self {
        Self {
            literals: self.literals.iter().copied().filter(|&l| l != lit).collect(),
        }
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals)
    }
}

impl From<&Vec<i32>> for Clause {
    fn from(literals: &Vec<i32>) -> Self {
        Self::new(literals.clone())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lit in &self.literals {
            write!(f, "{lit} ")?;
        }
        write!(f, "0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_dedups() {
        let clause = Clause::new(vec![3, -2, 3, 1]);
        assert_eq!(clause.len(), 3);
        assert_eq!(clause, Clause::new(vec![1, 3, -2]));
    }

    #[test]
    fn test_unit_and_empty() {
        assert!(Clause::new(vec![5]).is_unit());
        assert!(Clause::new(vec![]).is_empty());
        assert!(!Clause::new(vec![1, 2]).is_unit());
    }

    #[test]
    fn test_tautology() {
        assert!(Clause::new(vec![1, -1, 2]).is_tautology());
        assert!(!Clause::new(vec![1, 2, -3]).is_tautology());
        assert!(!Clause::new(vec![]).is_tautology());
    }

    #[test]
    fn test_resolve() {
        let pos = Clause::new(vec![1, 2]);
        let neg = Clause::new(vec![-1, 3]);
        assert_eq!(pos.resolve(&neg, 1), Clause::new(vec![2, 3]));

        // Resolving complementary units derives the empty clause.
        let unit = Clause::new(vec![4]);
        assert!(unit.resolve(&Clause::new(vec![-4]), 4).is_empty());
    }

    #[test]
    fn test_without() {
        let clause = Clause::new(vec![1, -2, 3]);
        assert_eq!(clause.without(Literal::from(-2)), Clause::new(vec![1, 3]));
        assert_eq!(clause.without(Literal::from(9)), clause);
    }
}
