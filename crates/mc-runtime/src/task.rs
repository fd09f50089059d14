//! Periodic task spawning and orderly shutdown.
//!
//! Each task runs on its own named thread with an absolute-deadline
//! [`Ticker`]. Ticks are strictly sequential within a task — there is no
//! re-entry, and a late tick runs once, not retroactively for every missed
//! deadline. [`TaskHandle::stop`] signals the worker, joins it, and only
//! returns once the task (and any bus handles it owns) has been dropped.

use crate::error::{RuntimeError, RuntimeResult};
use crate::timing::{Ticker, TimingReport, TimingStats};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// A periodically triggered unit of work.
pub trait PeriodicTask: Send {
    /// Task name, used for the thread name and logging.
    fn name(&self) -> &'static str;

    /// Execute one tick. Must not block on peers; read the latest bus
    /// snapshots and return.
    fn tick(&mut self);
}

/// Handle to a running periodic task.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct TaskHandle {
    name: &'static str,
    shutdown: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
    stats: Arc<TimingStats>,
}

impl TaskHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current timing counters for this task.
    pub fn stats(&self) -> TimingReport {
        self.stats.report()
    }

    /// Stop the task and wait for its thread to exit.
    ///
    /// Idempotent. On return the timer no longer fires and the task value
    /// has been dropped, releasing its bus handles. Worst-case latency is
    /// one period (the worker may be asleep until its next deadline).
    pub fn stop(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            // Disconnecting the channel is the signal; an explicit send
            // also covers the case where the worker polls before we drop.
            let _ = sender.try_send(());
            drop(sender);
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!(task = self.name, "periodic task thread panicked");
            }
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn `task` on its own thread, ticking at the given fixed period.
pub fn spawn_periodic<T>(mut task: T, period: Duration) -> RuntimeResult<TaskHandle>
where
    T: PeriodicTask + 'static,
{
    if period.is_zero() {
        return Err(RuntimeError::InvalidArg {
            what: "task period must be positive",
        });
    }

    let name = task.name();
    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(1);
    let stats = Arc::new(TimingStats::default());
    let worker_stats = Arc::clone(&stats);

    let thread = std::thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            debug!(task = name, period_s = period.as_secs_f64(), "task started");
            let mut ticker = Ticker::new(period);
            while !stop_requested(&shutdown_rx) {
                let outcome = ticker.wait();
                // Re-check after the sleep so stop() never lets another
                // tick through once it has been requested.
                if stop_requested(&shutdown_rx) {
                    break;
                }
                worker_stats.record(&outcome);
                if outcome.overrun {
                    warn!(
                        task = name,
                        lateness_s = outcome.jitter.as_secs_f64(),
                        "tick overran its period"
                    );
                }
                task.tick();
            }
            debug!(task = name, "task stopped");
        })?;

    Ok(TaskHandle {
        name,
        shutdown: Some(shutdown_tx),
        thread: Some(thread),
        stats,
    })
}

fn stop_requested(shutdown: &Receiver<()>) -> bool {
    match shutdown.try_recv() {
        Ok(()) => true,
        Err(TryRecvError::Disconnected) => true,
        Err(TryRecvError::Empty) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct Counter {
        count: Arc<AtomicU64>,
    }

    impl PeriodicTask for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        fn tick(&mut self) {
            self.count.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn rejects_zero_period() {
        let count = Arc::new(AtomicU64::new(0));
        let task = Counter {
            count: Arc::clone(&count),
        };
        assert!(spawn_periodic(task, Duration::ZERO).is_err());
    }

    #[test]
    fn ticks_and_stops() {
        let count = Arc::new(AtomicU64::new(0));
        let task = Counter {
            count: Arc::clone(&count),
        };
        let mut handle = spawn_periodic(task, Duration::from_millis(2)).unwrap();

        std::thread::sleep(Duration::from_millis(40));
        handle.stop();

        let at_stop = count.load(Ordering::Relaxed);
        assert!(at_stop >= 5, "expected several ticks, got {at_stop}");
        assert!(handle.stats().ticks >= at_stop);

        // No dangling callbacks after stop() returns
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::Relaxed), at_stop);
    }

    #[test]
    fn stop_is_idempotent() {
        let count = Arc::new(AtomicU64::new(0));
        let task = Counter {
            count: Arc::clone(&count),
        };
        let mut handle = spawn_periodic(task, Duration::from_millis(2)).unwrap();
        handle.stop();
        handle.stop();
    }
}
