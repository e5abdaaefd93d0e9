#![warn(missing_docs)]
//! Classical SAT algorithms with benchmarking.
//!
//! This crate decides satisfiability of propositional CNF formulas with
//! three classical procedures: Davis-Putnam variable elimination, DPLL
//! backtracking with unit propagation and pure-literal elimination, and
//! full resolution saturation. Every algorithm runs under a cooperative
//! operation budget that counts elementary steps and enforces a wall-clock
//! deadline, so a runaway search ends in a TIMEOUT verdict instead of a
//! hang.
//!
//! The `sat` module is the solving engine; `bench` persists benchmark rows
//! to an append-only ledger; `command_line` wraps both in a CLI with a
//! directory batch mode.

/// Benchmark records and the append-only ledger.
pub mod bench;

/// The command-line interface: single solves, directory batches, shell
/// completions.
pub mod command_line;

/// The solving engine: parsing, the three algorithms, and the operation
/// budget.
pub mod sat;

/// Process introspection (peak memory, CPU time) for benchmark records.
pub mod util;
