//! Partial truth assignments over a dense variable domain.

use crate::sat::clause::Clause;
use crate::sat::literal::{Literal, Variable};

/// The state of one variable in an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum VarState {
    /// Not yet bound.
    #[default]
    Unassigned,
    /// Bound to a value for the current branch.
    Assigned(bool),
}

impl VarState {
    /// Whether this state carries a binding.
    pub const fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }
}

/// A partial mapping from variable id to boolean value.
///
/// Slot 0 is unused; variables are indexed by their id directly. Within one
/// search branch a bound variable is never rebound; a clashing rebind attempt
/// is a conflict and fails the branch. Branches clone the assignment, so no
/// branch ever observes another's bindings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<VarState>);

impl Assignment {
    /// An empty assignment over the domain `1..=n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self(vec![VarState::Unassigned; n + 1])
    }

    /// Binds `var` to `value`. The variable must be inside the domain.
    pub fn assign(&mut self, var: Variable, value: bool) {
        self.0[var as usize] = VarState::Assigned(value);
    }

    /// The value bound to `var`, if any.
    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        match self.0.get(var as usize) {
            Some(VarState::Assigned(b)) => Some(*b),
            _ => None,
        }
    }

    /// Whether `var` is bound.
    #[must_use]
    pub fn is_assigned(&self, var: Variable) -> bool {
        self.var_value(var).is_some()
    }

    /// The truth value of `lit` under this assignment, if its variable is
    /// bound.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        let value = self.var_value(lit.variable())?;
        Some(if lit.polarity() { value } else { !value })
    }

    /// Evaluates a clause under the assignment, treating unbound variables as
    /// false. Used for the residual check once no unassigned variables
    /// remain in the formula.
    #[must_use]
    pub fn satisfies(&self, clause: &Clause) -> bool {
        clause
            .iter()
            .any(|&lit| self.literal_value(lit).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_read_back() {
        let mut assignment = Assignment::new(3);
        assert!(!assignment.is_assigned(2));

        assignment.assign(2, true);
        assert_eq!(assignment.var_value(2), Some(true));
        assert_eq!(assignment.literal_value(Literal::from(2)), Some(true));
        assert_eq!(assignment.literal_value(Literal::from(-2)), Some(false));
        assert_eq!(assignment.literal_value(Literal::from(1)), None);
    }

    #[test]
    fn test_satisfies() {
        let mut assignment = Assignment::new(2);
        assignment.assign(1, false);

        let clause = Clause::new(vec![1, 2]);
        assert!(!assignment.satisfies(&clause), "2 is unbound, treated false");

        assignment.assign(2, true);
        assert!(assignment.satisfies(&clause));
        assert!(!assignment.satisfies(&Clause::new(vec![])));
    }
}
