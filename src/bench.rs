//! Benchmark records and the append-only ledger.
//!
//! Every solve attempt produces one [`BenchRecord`]; [`append`] writes it as
//! a single CSV row to a persisted ledger, creating the file and writing the
//! header exactly once. The ledger is append-only: rows are never rewritten.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Column header, written when the ledger file is first created.
pub const LEDGER_HEADER: &str =
    "timestamp,input,method,operations,wall_time_s,cpu_time_s,memory_kib,verdict";

/// One benchmark row: the outcome and cost of a single solve attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchRecord {
    /// Unix timestamp (seconds) when the record was taken.
    pub timestamp: u64,
    /// Input identifier, normally the problem file path.
    pub input: String,
    /// The method that ran (`dp`, `dpll`, `res`).
    pub method: String,
    /// Total operations counted by the budget.
    pub operations: u64,
    /// Wall-clock duration of the solve.
    pub wall_time: Duration,
    /// CPU time in seconds, when the platform exposes it.
    pub cpu_time: Option<f64>,
    /// Peak virtual memory in KiB, when the platform exposes it.
    pub memory_kib: Option<u64>,
    /// Verdict string: SAT, UNSAT, INDETERMINATE, TIMEOUT or ERROR.
    pub verdict: String,
}

impl BenchRecord {
    /// A record stamped with the current time.
    #[must_use]
    pub fn now(input: &str, method: &str, verdict: &str) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            timestamp,
            input: input.to_string(),
            method: method.to_string(),
            operations: 0,
            wall_time: Duration::ZERO,
            cpu_time: None,
            memory_kib: None,
            verdict: verdict.to_string(),
        }
    }
}

/// Quotes a CSV field when its content would otherwise shift the columns.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

impl fmt::Display for BenchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cpu = self
            .cpu_time
            .map_or_else(String::new, |secs| format!("{secs:.2}"));
        let mem = self
            .memory_kib
            .map_or_else(String::new, |kib| kib.to_string());
        write!(
            f,
            "{},{},{},{},{:.3},{},{},{}",
            self.timestamp,
            csv_field(&self.input),
            self.method,
            self.operations,
            self.wall_time.as_secs_f64(),
            cpu,
            mem,
            self.verdict
        )
    }
}

/// Appends one record to the ledger at `path`, writing the header first if
/// the file does not exist yet or is empty.
///
/// # Errors
///
/// Returns an [`io::Error`] if the ledger cannot be opened or written.
pub fn append<P: AsRef<Path>>(path: P, record: &BenchRecord) -> io::Result<()> {
    let path = path.as_ref();
    let needs_header = std::fs::metadata(path).map_or(true, |meta| meta.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_header {
        writeln!(file, "{LEDGER_HEADER}")?;
    }
    writeln!(file, "{record}")
}
