//! Defines the command-line interface of the solver.
//!
//! Two work commands: `solve` runs one method on one DIMACS file, `batch`
//! walks a directory of `.cnf` files and runs every requested method on each
//! one, optionally skipping files whose content duplicates an earlier file in
//! the same run. Every solve appends a row to the benchmark ledger unless
//! disabled. Per-(file, method) failures in a batch are logged and the run
//! continues; they never abort the batch.
//!
//! Uses `clap` for parsing arguments.

use crate::bench::{self, BenchRecord};
use crate::sat::budget::Budget;
use crate::sat::cnf::Cnf;
use crate::sat::dimacs::{ParseError, parse_file};
use crate::sat::solver::{self, Method, SolveOptions, Verdict};
use crate::util;
use clap::{Args, CommandFactory, Parser, Subcommand};
use log::{error, info, warn};
use rustc_hash::{FxHashSet, FxHasher};
use std::hash::Hasher;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// A benchmark-oriented solver for classical SAT algorithms.
#[derive(Parser, Debug)]
#[command(name = "sat-classics", version, about = "Classical SAT algorithms with benchmarking")]
pub struct Cli {
    /// The command to execute.
    #[clap(subcommand)]
    pub command: Commands,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a single CNF file in DIMACS format with one method.
    Solve {
        /// The algorithm to run.
        #[arg(value_enum)]
        method: Method,

        /// Path to the DIMACS .cnf file.
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Run methods over every .cnf file in a directory tree.
    Batch {
        /// Path to the directory to scan.
        dir: PathBuf,

        /// The methods to run on each file.
        #[arg(long, value_enum, value_delimiter = ',',
              default_values_t = [Method::Dp, Method::Dpll, Method::Res])]
        methods: Vec<Method>,

        /// Skip files whose content hashes identically to an earlier file in
        /// this run.
        #[arg(long, default_value_t = false)]
        skip_duplicates: bool,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
pub struct CommonOptions {
    /// Wall-clock limit per solve, in seconds.
    #[arg(long, default_value_t = 10)]
    pub time_limit: u64,

    /// Resolution only: cap on the clause-set size before giving up.
    #[arg(long, default_value_t = crate::sat::resolution::DEFAULT_MAX_CLAUSES)]
    pub max_clauses: usize,

    /// Resolution only: cap on saturation rounds before giving up.
    #[arg(long, default_value_t = crate::sat::resolution::DEFAULT_MAX_ROUNDS)]
    pub max_rounds: usize,

    /// Path of the append-only benchmark ledger.
    #[arg(long, default_value = "benchmarks.csv")]
    pub ledger: PathBuf,

    /// Do not record benchmark rows.
    #[arg(long, default_value_t = false)]
    pub no_ledger: bool,

    /// Print the benchmark block after each solve.
    #[arg(long, default_value_t = true)]
    pub stats: bool,
}

impl CommonOptions {
    fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            max_clauses: self.max_clauses,
            max_rounds: self.max_rounds,
        }
    }

    fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit)
    }
}

/// Dispatches a parsed command line.
///
/// # Errors
///
/// Returns an error for a failed single-file solve (parse failure) or an
/// unreadable batch directory. Batch-internal failures are logged instead.
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Solve {
            method,
            path,
            common,
        } => {
            solve_file(method, &path, &common)?;
            Ok(())
        }
        Commands::Batch {
            dir,
            methods,
            skip_duplicates,
            common,
        } => run_batch(&dir, &methods, skip_duplicates, &common),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "sat-classics", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Parses and solves one file, printing the verdict and benchmark block and
/// appending a ledger row.
///
/// # Errors
///
/// Returns the [`ParseError`] for malformed input; an ERROR row is still
/// recorded so the ledger accounts for every attempt.
pub fn solve_file(method: Method, path: &Path, common: &CommonOptions) -> Result<Verdict, ParseError> {
    let parse_start = Instant::now();
    let cnf = match parse_file(path) {
        Ok(cnf) => cnf,
        Err(e) => {
            record(
                common,
                &BenchRecord::now(&path.display().to_string(), &method.to_string(), "ERROR"),
            );
            return Err(e);
        }
    };
    let parse_time = parse_start.elapsed();

    println!("Solving: {} [{method}]", path.display());

    let mut budget = Budget::new(common.time_limit());
    let verdict = solver::solve_with(method, &cnf, &mut budget, common.solve_options());

    println!("{verdict}");

    if common.stats {
        print_stats(&cnf, parse_time, &budget);
    }

    record(
        common,
        &BenchRecord {
            operations: budget.operations(),
            wall_time: budget.elapsed(),
            cpu_time: util::cpu_time(),
            memory_kib: util::mem_used_peak(),
            ..BenchRecord::now(
                &path.display().to_string(),
                &method.to_string(),
                &verdict.to_string(),
            )
        },
    );

    Ok(verdict)
}

/// Runs every requested method over every `.cnf` file under `dir`.
///
/// Failures are isolated per (file, method) combination: each is logged and
/// the batch moves on.
///
/// # Errors
///
/// Returns an error only when `dir` is not a directory.
pub fn run_batch(
    dir: &Path,
    methods: &[Method],
    skip_duplicates: bool,
    common: &CommonOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Err(format!("not a directory: {}", dir.display()).into());
    }

    let mut seen_hashes: FxHashSet<u64> = FxHashSet::default();

    for entry in walkdir::WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "cnf") {
            continue;
        }

        if skip_duplicates {
            match content_hash(path) {
                Ok(hash) => {
                    if !seen_hashes.insert(hash) {
                        info!("skipping duplicate input: {}", path.display());
                        continue;
                    }
                }
                Err(e) => {
                    warn!("could not hash {}: {e}", path.display());
                }
            }
        }

        for &method in methods {
            if let Err(e) = solve_file(method, path, common) {
                error!("{method} failed on {}: {e}", path.display());
            }
        }
    }

    Ok(())
}

/// Hashes a file's entire content for duplicate detection within one run.
pub(crate) fn content_hash(path: &Path) -> std::io::Result<u64> {
    let bytes = std::fs::read(path)?;
    let mut hasher = FxHasher::default();
    hasher.write(&bytes);
    Ok(hasher.finish())
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<24} {value:>18}  |");
}

/// Prints the benchmark block for one finished solve.
fn print_stats(cnf: &Cnf, parse_time: Duration, budget: &Budget) {
    // Advance the jemalloc epoch so the figures reflect this solve.
    let allocated_mib = epoch::advance()
        .ok()
        .and_then(|_| stats::allocated::read().ok())
        .map(|bytes| bytes as f64 / (1024.0 * 1024.0));

    println!("========================[ Benchmark ]========================");
    stat_line("Variables", cnf.num_vars);
    stat_line("Clauses", cnf.clauses.len());
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Total operations", budget.operations());
    stat_line(
        "Wall time (s)",
        format!("{:.3}", budget.elapsed().as_secs_f64()),
    );
    if let Some(secs) = util::cpu_time() {
        stat_line("CPU time (s)", format!("{secs:.2}"));
    }
    if let Some(kib) = util::mem_used_peak() {
        stat_line("Peak memory (MiB)", format!("{:.2}", kib as f64 / 1024.0));
    }
    if let Some(mib) = allocated_mib {
        stat_line("Allocated (MiB)", format!("{mib:.2}"));
    }
    println!("=============================================================");
}

/// Appends a ledger row, logging instead of failing: a broken ledger must
/// not take the solve down with it.
fn record(common: &CommonOptions, rec: &BenchRecord) {
    if common.no_ledger {
        return;
    }
    if let Err(e) = bench::append(&common.ledger, rec) {
        error!("could not append to ledger {}: {e}", common.ledger.display());
    }
}
