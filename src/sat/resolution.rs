//! Resolution saturation.
//!
//! Closes the clause set under the resolution rule. Each round scans every
//! unordered pair of known clauses, resolving on each complementary literal
//! pair; tautological resolvents are discarded and a seen-set of canonical
//! clauses keeps previously derived resolvents from being regenerated. An
//! empty resolvent proves unsatisfiability; a round producing no genuinely
//! new clause means the set is saturated and, since the empty clause was
//! never derived, the formula is satisfiable.
//!
//! Resolution is refutation-complete with unbounded resources, but pairwise
//! closure can grow the clause set explosively, so two caps bound the run: a
//! maximum clause-set size and a maximum round count. Hitting either yields
//! an INDETERMINATE verdict, which is a deliberate incompleteness under
//! bounded resources rather than a claim about the formula.

use crate::sat::budget::Budget;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::solver::{SolverError, SolverResult};
use rustc_hash::FxHashSet;

/// Default cap on the number of distinct clauses.
pub const DEFAULT_MAX_CLAUSES: usize = 50_000;

/// Default cap on saturation rounds.
pub const DEFAULT_MAX_ROUNDS: usize = 1_000;

/// The outcome of one saturation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    /// The empty clause was derived; the formula is unsatisfiable.
    Unsat,
    /// No new clause was derived; the set is saturated.
    Saturated,
    /// This many new clauses joined the set.
    Extended(usize),
}

/// A clause set being closed under resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    clauses: Vec<Clause>,
    seen: FxHashSet<Clause>,
    max_clauses: usize,
    max_rounds: usize,
}

impl Resolution {
    /// Starts a saturation over the clauses of `cnf` with default caps.
    /// Duplicate input clauses (by literal content) are merged.
    #[must_use]
    pub fn new(cnf: &Cnf) -> Self {
        Self::with_caps(cnf, DEFAULT_MAX_CLAUSES, DEFAULT_MAX_ROUNDS)
    }

    /// Starts a saturation with explicit resource caps.
    #[must_use]
    pub fn with_caps(cnf: &Cnf, max_clauses: usize, max_rounds: usize) -> Self {
        let mut seen = FxHashSet::default();
        let mut clauses = Vec::with_capacity(cnf.clauses.len());

        for clause in &cnf.clauses {
            if seen.insert(clause.clone()) {
                clauses.push(clause.clone());
            }
        }

        Self {
            clauses,
            seen,
            max_clauses,
            max_rounds,
        }
    }

    /// The number of distinct clauses currently known.
    #[must_use]
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Saturates until the empty clause, a fixpoint, or a resource cap.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Timeout`] when the budget expires and
    /// [`SolverError::ResourceCap`] when either cap is hit; the caller maps
    /// the latter to an INDETERMINATE verdict.
    pub fn solve(&mut self, budget: &mut Budget) -> SolverResult {
        if self.clauses.iter().any(Clause::is_empty) {
            return Ok(false);
        }

        let mut rounds = 0;
        loop {
            if rounds >= self.max_rounds || self.clauses.len() > self.max_clauses {
                return Err(SolverError::ResourceCap);
            }

            match self.round(budget)? {
                Round::Unsat => return Ok(false),
                Round::Saturated => return Ok(true),
                Round::Extended(_) => rounds += 1,
            }
        }
    }

    /// Runs one full pair scan and merges the frontier of new clauses.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Timeout`] when the budget expires mid-scan.
    pub fn round(&mut self, budget: &mut Budget) -> Result<Round, SolverError> {
        let mut frontier: Vec<Clause> = Vec::new();

        for i in 0..self.clauses.len() {
            for j in (i + 1)..self.clauses.len() {
                budget.tick()?;

                for lit_index in 0..self.clauses[i].len() {
                    let lit = self.clauses[i][lit_index];
                    if !self.clauses[j].contains(lit.negated()) {
                        continue;
                    }

                    let resolvent = self.clauses[i].resolve(&self.clauses[j], lit.variable());
                    if resolvent.is_empty() {
                        return Ok(Round::Unsat);
                    }
                    if resolvent.is_tautology() {
                        continue;
                    }
                    if self.seen.insert(resolvent.clone()) {
                        frontier.push(resolvent);
                    }
                }
            }
        }

        if frontier.is_empty() {
            return Ok(Round::Saturated);
        }

        let added = frontier.len();
        self.clauses.extend(frontier);
        Ok(Round::Extended(added))
    }
}
