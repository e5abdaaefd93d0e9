#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Signed-integer literals.
//!
//! A literal is a variable or its negation, encoded as a non-zero `i32`:
//! the magnitude is the variable id (dense ids starting at 1) and the sign
//! is the polarity (positive = asserted true).

use core::ops::{Neg, Not};
use std::fmt;

/// A variable identifier. Variables are numbered densely from 1.
pub type Variable = u32;

/// A propositional literal: a variable together with a polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal(i32);

impl Literal {
    /// Creates a literal for `var` with the given polarity.
    ///
    /// # Panics
    ///
    /// Panics if `var` does not fit in an `i32`; variable ids are far below
    /// that bound for any realistic DIMACS input.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        let var = i32::try_from(var).expect("variable id overflowed i32");
        if polarity { Self(var) } else { Self(-var) }
    }

    /// The variable this literal mentions.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    /// `true` for a positive literal, `false` for a negated one.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.is_positive()
    }

    /// The complementary literal over the same variable.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }

    /// The raw DIMACS encoding of this literal.
    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        debug_assert!(value != 0, "0 is not a literal");
        Self(value)
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
