#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
pub mod assignment;
pub mod budget;
pub mod clause;
pub mod cnf;
pub mod dimacs;
pub mod dp;
pub mod dpll;
pub mod literal;
pub mod resolution;
pub mod solver;
