#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! A parser for the DIMACS CNF (Conjunctive Normal Form) file format.
//!
//! The DIMACS CNF format is a standard text-based format for representing
//! boolean satisfiability problems:
//! - Comment lines starting with 'c'.
//! - A problem line `p cnf <num_variables> <num_clauses>` declaring the
//!   variable domain `1..=num_variables`.
//! - Clause lines of whitespace-separated signed integers, each terminated
//!   by a trailing '0' which is stripped.
//! - An optional '%' line to indicate end-of-data (often used in
//!   competitions).
//!
//! Unlike lenient parsers that derive the variable count from the clauses,
//! this one requires the problem line before any clause and rejects a
//! malformed one outright: a silently empty variable domain would make the
//! eliminator skip every variable and misreport the verdict.

use crate::sat::cnf::Cnf;
use itertools::Itertools;
use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;

/// Errors produced while reading a DIMACS problem.
///
/// A parse failure is fatal to the single solve it belongs to, never to a
/// batch run.
#[derive(Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    Io(io::Error),
    /// A clause line contained a token that is not a signed integer.
    InvalidLiteral {
        /// The offending token.
        token: String,
        /// 1-based line number.
        line: usize,
    },
    /// A problem line that is not of the form `p cnf <nvars> <nclauses>`.
    InvalidHeader {
        /// 1-based line number.
        line: usize,
    },
    /// A literal whose variable lies outside the declared domain.
    LiteralOutOfDomain {
        /// The offending literal.
        literal: i32,
        /// The `<nvars>` the problem line declared.
        num_vars: usize,
        /// 1-based line number.
        line: usize,
    },
    /// A clause appeared before any problem line, or no problem line exists.
    MissingHeader,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::InvalidLiteral { token, line } => {
                write!(f, "invalid literal '{token}' on line {line}")
            }
            Self::InvalidHeader { line } => write!(f, "malformed problem line on line {line}"),
            Self::LiteralOutOfDomain {
                literal,
                num_vars,
                line,
            } => write!(
                f,
                "literal {literal} on line {line} outside the declared domain 1..={num_vars}"
            ),
            Self::MissingHeader => write!(f, "no 'p cnf' problem line before clause data"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parses DIMACS formatted data from a `BufRead` source into a `Cnf`.
///
/// Comment lines ('c'), blank lines and pure-terminator lines (a lone '0')
/// are ignored; a '%' line ends the data. Clause lines require a preceding
/// problem line.
///
/// # Errors
///
/// Returns a [`ParseError`] when the reader fails, when a clause line holds a
/// non-integer token, an embedded '0' or a literal outside the declared
/// variable domain, when the problem line is malformed, or when no problem
/// line precedes the clauses.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, ParseError> {
    let mut num_vars: Option<usize> = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if trimmed.starts_with('%') {
            break;
        }

        if trimmed.starts_with('p') {
            num_vars = Some(parse_header(trimmed, line_no)?);
            continue;
        }

        let Some(domain) = num_vars else {
            return Err(ParseError::MissingHeader);
        };

        let mut literals: Vec<i32> = trimmed
            .split_whitespace()
            .map(|token| {
                token.parse::<i32>().map_err(|_| ParseError::InvalidLiteral {
                    token: token.to_string(),
                    line: line_no,
                })
            })
            .try_collect()?;

        // Strip the trailing terminator; any other '0' is malformed.
        if literals.last() == Some(&0) {
            literals.pop();
        }
        if literals.contains(&0) {
            return Err(ParseError::InvalidLiteral {
                token: "0".to_string(),
                line: line_no,
            });
        }

        // The problem line fixes the variable domain; a literal past it would
        // index out of the assignment's backing vector deep in the solvers.
        if let Some(&literal) = literals
            .iter()
            .find(|lit| lit.unsigned_abs() as usize > domain)
        {
            return Err(ParseError::LiteralOutOfDomain {
                literal,
                num_vars: domain,
                line: line_no,
            });
        }

        // A pure-terminator line carries no clause.
        if !literals.is_empty() {
            clauses.push(literals);
        }
    }

    let num_vars = num_vars.ok_or(ParseError::MissingHeader)?;
    Ok(Cnf::new(clauses, num_vars))
}

/// Parses a `p cnf <nvars> <nclauses>` line, returning the variable count.
fn parse_header(line: &str, line_no: usize) -> Result<usize, ParseError> {
    let parts = line.split_whitespace().collect_vec();
    match parts.as_slice() {
        ["p", "cnf", nvars, nclauses] => {
            let nvars = nvars.parse::<usize>();
            let nclauses = nclauses.parse::<usize>();
            match (nvars, nclauses) {
                (Ok(nvars), Ok(_)) => Ok(nvars),
                _ => Err(ParseError::InvalidHeader { line: line_no }),
            }
        }
        _ => Err(ParseError::InvalidHeader { line: line_no }),
    }
}

/// Parses a DIMACS CNF file specified by its path.
///
/// This is a convenience function that opens the file, wraps it in a
/// `BufReader`, and then calls [`parse_dimacs`].
///
/// # Errors
///
/// Returns a [`ParseError`] if the file cannot be opened or read, or if its
/// content is malformed.
pub fn parse_file<P: AsRef<Path>>(file_path: P) -> Result<Cnf, ParseError> {
    let file = std::fs::File::open(file_path)?;
    parse_dimacs(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::clause::Clause;
    use std::io::Cursor;

    #[test]
    fn test_parse_simple_dimacs() {
        let dimacs_content = "c This is a comment\n\
                              p cnf 3 2\n\
                              1 -2 0\n\
                              2 3 0\n";
        let cnf = parse_dimacs(Cursor::new(dimacs_content)).unwrap();

        assert_eq!(cnf.num_vars, 3, "variable domain mismatch");
        assert_eq!(cnf.clauses.len(), 2, "should parse 2 clauses");
        assert_eq!(cnf.clauses[0], Clause::new(vec![1, -2]));
        assert_eq!(cnf.clauses[1], Clause::new(vec![2, 3]));
    }

    #[test]
    fn test_parse_dimacs_with_empty_lines_and_end_marker() {
        let dimacs_content = "p cnf 2 2\n\
                              \n\
                              1 0\n\
                              \n\
                              -2 0\n\
                              %\n\
                              1 this would be an error if read";
        let cnf = parse_dimacs(Cursor::new(dimacs_content)).unwrap();

        assert_eq!(cnf.clauses.len(), 2);
        assert_eq!(cnf.num_vars, 2);
        assert_eq!(cnf.clauses[0], Clause::new(vec![1]));
        assert_eq!(cnf.clauses[1], Clause::new(vec![-2]));
    }

    #[test]
    fn test_parse_dimacs_pure_terminator_line() {
        let cnf = parse_dimacs(Cursor::new("p cnf 1 1\n0\n")).unwrap();
        assert!(cnf.clauses.is_empty(), "a lone '0' line is not a clause");
    }

    #[test]
    fn test_parse_dimacs_missing_terminator() {
        let cnf = parse_dimacs(Cursor::new("p cnf 2 1\n1 -2\n")).unwrap();
        assert_eq!(cnf.clauses[0], Clause::new(vec![1, -2]));
    }

    #[test]
    fn test_parse_dimacs_malformed_literal() {
        let err = parse_dimacs(Cursor::new("p cnf 2 1\n1 abc 0\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidLiteral { ref token, line: 2 } if token == "abc"
        ));
    }

    #[test]
    fn test_parse_dimacs_clause_before_header() {
        let err = parse_dimacs(Cursor::new("1 2 0\np cnf 2 1\n")).unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader));
    }

    #[test]
    fn test_parse_dimacs_no_header_at_all() {
        let err = parse_dimacs(Cursor::new("c only comments\n")).unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader));
    }

    #[test]
    fn test_parse_dimacs_malformed_header() {
        let err = parse_dimacs(Cursor::new("p cnf three 2\n1 0\n")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidHeader { line: 1 }));

        let err = parse_dimacs(Cursor::new("p dnf 3 2\n")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidHeader { line: 1 }));
    }

    #[test]
    fn test_parse_dimacs_literal_outside_declared_domain() {
        // An understated header must not parse: variable 2 would later index
        // past the end of a 1-variable assignment inside the solvers.
        let err = parse_dimacs(Cursor::new("p cnf 1 1\n1 2 0\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::LiteralOutOfDomain {
                literal: 2,
                num_vars: 1,
                line: 2
            }
        ));

        let err = parse_dimacs(Cursor::new("p cnf 3 1\n1 -4 0\n")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::LiteralOutOfDomain { literal: -4, .. }
        ));

        // The boundary variable itself is fine.
        let cnf = parse_dimacs(Cursor::new("p cnf 2 1\n1 2 0\n")).unwrap();
        assert_eq!(cnf.clauses.len(), 1);
    }

    #[test]
    fn test_parse_dimacs_embedded_zero() {
        let err = parse_dimacs(Cursor::new("p cnf 3 1\n1 0 2 0\n")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidLiteral { .. }));
    }
}
