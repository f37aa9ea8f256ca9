//! Per-iteration convergence records.

use std::time::{Duration, Instant};

/// Score of the incumbent route at the start of one search iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Iteration {
    /// Route score going into the iteration.
    pub score: f64,
    /// Wall time since the run started.
    pub elapsed: Duration,
}

impl Iteration {
    /// Elapsed wall time in fractional seconds.
    pub const fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Collects [`Iteration`] entries against the instant a run started.
///
/// # Examples
/// ```
/// use veloroute_core::IterationTracker;
///
/// let mut tracker = IterationTracker::start();
/// tracker.record(0.0);
/// tracker.record(2.5);
/// let iterations = tracker.finish();
/// assert_eq!(iterations.len(), 2);
/// assert_eq!(iterations[1].score, 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct IterationTracker {
    started: Instant,
    entries: Vec<Iteration>,
}

impl IterationTracker {
    /// Begin tracking now.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            entries: Vec::new(),
        }
    }

    /// Append an entry for `score` stamped with the current elapsed time.
    pub fn record(&mut self, score: f64) {
        self.entries.push(Iteration {
            score,
            elapsed: self.started.elapsed(),
        });
    }

    /// Wall time since tracking began.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Entries recorded so far.
    pub fn entries(&self) -> &[Iteration] {
        &self.entries
    }

    /// Consume the tracker, returning its entries in recording order.
    pub fn finish(self) -> Vec<Iteration> {
        self.entries
    }
}
