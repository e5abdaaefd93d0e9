//! The cooperative operation budget.
//!
//! Every algorithm calls [`Budget::tick`] from each of its hot loops: once
//! per candidate resolvent pair, per propagation pass and per branch
//! decision. A tick increments the operation counter, emits a progress line
//! once per reporting interval, and checks the wall-clock deadline.
//! Cancellation is purely cooperative; granularity is "per elementary step",
//! so a single unchecked inner operation cannot be interrupted mid-flight.
//!
//! The budget is an explicit per-solve context value rather than process
//! state, which keeps solves independently testable and lets a batch run give
//! every (file, method) pair a fresh counter and deadline.

use crate::sat::solver::SolverError;
use crate::util;
use log::info;
use std::time::{Duration, Instant};

/// Operation counter and deadline for one solve attempt.
#[derive(Debug, Clone)]
pub struct Budget {
    ops: u64,
    last_report: u64,
    report_interval: u64,
    start: Instant,
    time_limit: Duration,
}

impl Budget {
    /// Default wall-clock deadline for one solve.
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(10);

    /// Operations between progress reports.
    pub const REPORT_INTERVAL: u64 = 1_000_000;

    /// Creates a budget with the given deadline; the clock starts now.
    #[must_use]
    pub fn new(time_limit: Duration) -> Self {
        Self {
            ops: 0,
            last_report: 0,
            report_interval: Self::REPORT_INTERVAL,
            start: Instant::now(),
            time_limit,
        }
    }

    /// Records one elementary step.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Timeout`] once the deadline has passed. The
    /// caller propagates it with `?`; it must reach the dispatch layer and
    /// become a TIMEOUT verdict, never be swallowed.
    pub fn tick(&mut self) -> Result<(), SolverError> {
        self.ops += 1;

        if self.ops - self.last_report >= self.report_interval {
            self.report_progress();
            self.last_report = self.ops;
        }

        if self.start.elapsed() > self.time_limit {
            return Err(SolverError::Timeout);
        }

        Ok(())
    }

    /// Total operations counted so far.
    #[must_use]
    pub const fn operations(&self) -> u64 {
        self.ops
    }

    /// Wall-clock time since the budget was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn report_progress(&self) {
        match util::mem_used_peak() {
            Some(kib) => info!(
                "ops: {} | elapsed: {:.2}s | peak mem: {:.1} MiB",
                self.ops,
                self.start.elapsed().as_secs_f64(),
                kib as f64 / 1024.0
            ),
            None => info!(
                "ops: {} | elapsed: {:.2}s",
                self.ops,
                self.start.elapsed().as_secs_f64()
            ),
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIME_LIMIT)
    }
}
