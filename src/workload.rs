//! Workload trait and timing helper
//!
//! A [`Workload`] wraps an external numerical computation (a multibody, FSI
//! or FEA simulation). The harness only asks it to run, to decide whether it
//! passed, and to say how long its measured portion took.

use std::time::{Duration, Instant};

use crate::metric::Metrics;

/// A timed numerical computation driven by an [`Experiment`](crate::Experiment).
///
/// Implementations time themselves, usually with a [`Stopwatch`] around the
/// hot loop only, so setup cost can be excluded from `elapsed_seconds`.
pub trait Workload {
    /// Run the computation, recording metrics as it goes.
    ///
    /// Returns whether the run passed. Numerical failure (instability,
    /// non-convergence) should return `false` rather than panic, so the
    /// report is still written.
    fn run_workload(&mut self, metrics: &mut Metrics) -> bool;

    /// Time spent in the measured portion of the last run, in seconds.
    fn elapsed_seconds(&self) -> f64;
}

impl<W: Workload + ?Sized> Workload for Box<W> {
    fn run_workload(&mut self, metrics: &mut Metrics) -> bool {
        (**self).run_workload(metrics)
    }

    fn elapsed_seconds(&self) -> f64 {
        (**self).elapsed_seconds()
    }
}

/// Accumulating wall-clock timer.
///
/// Each `start`/`stop` pair adds its interval to the total, so a loop can
/// time only the step call of every iteration.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    accumulated: Duration,
    started: Option<Instant>,
}

impl Stopwatch {
    /// Create a stopped stopwatch with zero accumulated time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing an interval. No-op if already running.
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    /// Stop timing and add the interval to the total. No-op if stopped.
    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.accumulated += started.elapsed();
        }
    }

    /// Clear the accumulated time and stop.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started = None;
    }

    /// Whether an interval is currently being timed.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Total accumulated time, including a running interval.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started
            .map_or(self.accumulated, |started| self.accumulated + started.elapsed())
    }

    /// Total accumulated time in seconds.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Time a closure, adding its duration to the total.
    pub fn time<T>(&mut self, f: impl FnOnce() -> T) -> T {
        self.start();
        let out = f();
        self.stop();
        out
    }
}
