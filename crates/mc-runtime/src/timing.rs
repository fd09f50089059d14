//! Periodic tick scheduling and timing observability.
//!
//! The [`Ticker`] runs on absolute deadlines: each deadline is the previous
//! one plus the period, so per-tick sleep error does not accumulate into
//! drift. An overrun (work spilled past its deadline) re-anchors the
//! schedule instead of bursting to catch up, and is counted and logged —
//! degraded timing is an observability concern, not a failure.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Outcome of waiting for one tick deadline.
#[derive(Clone, Copy, Debug)]
pub struct TickOutcome {
    /// How far past the deadline the tick actually fired.
    pub jitter: Duration,
    /// True if the previous tick's work consumed the entire period.
    pub overrun: bool,
}

/// Absolute-deadline periodic sleeper.
///
/// The first tick fires immediately on the first `wait`; each subsequent
/// deadline advances by exactly one period from the previous one.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: None,
        }
    }

    /// Nominal period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next deadline and advance the schedule.
    ///
    /// Uses a spin-assisted sleep for sub-millisecond wake accuracy. If the
    /// deadline has already passed on entry, returns immediately with
    /// `overrun = true`; a miss of a full period or more re-anchors the
    /// schedule at the current instant instead of bursting to catch up.
    pub fn wait(&mut self) -> TickOutcome {
        let entered = Instant::now();
        let deadline = self.next_deadline.unwrap_or(entered);

        let outcome = if entered < deadline {
            spin_sleep::sleep(deadline - entered);
            TickOutcome {
                jitter: Instant::now().saturating_duration_since(deadline),
                overrun: false,
            }
        } else {
            let lateness = entered - deadline;
            TickOutcome {
                jitter: lateness,
                overrun: lateness > Duration::ZERO,
            }
        };

        self.next_deadline = if entered.saturating_duration_since(deadline) >= self.period {
            Some(entered + self.period)
        } else {
            Some(deadline + self.period)
        };
        outcome
    }
}

/// Lock-free per-task timing counters, shared between the worker thread and
/// observers.
#[derive(Debug, Default)]
pub struct TimingStats {
    ticks: AtomicU64,
    overruns: AtomicU64,
    max_jitter_ns: AtomicU64,
}

impl TimingStats {
    pub fn record(&self, outcome: &TickOutcome) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        if outcome.overrun {
            self.overruns.fetch_add(1, Ordering::Relaxed);
        }
        let jitter_ns = outcome.jitter.as_nanos().min(u64::MAX as u128) as u64;
        self.max_jitter_ns.fetch_max(jitter_ns, Ordering::Relaxed);
    }

    pub fn report(&self) -> TimingReport {
        TimingReport {
            ticks: self.ticks.load(Ordering::Relaxed),
            overruns: self.overruns.load(Ordering::Relaxed),
            max_jitter_s: self.max_jitter_ns.load(Ordering::Relaxed) as f64 / 1e9,
        }
    }
}

/// Snapshot of a task's timing counters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingReport {
    /// Ticks executed.
    pub ticks: u64,
    /// Ticks that fired after their entire period had elapsed.
    pub overruns: u64,
    /// Worst observed lateness past a deadline (seconds).
    pub max_jitter_s: f64,
}
