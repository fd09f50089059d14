//! Last-value-wins publish/subscribe bus.
//!
//! Each topic is a single lock-free cell holding the most recently published
//! snapshot. Readers poll and always observe the latest value, never a
//! backlog; an empty topic reads as "no message yet". Delivery ordering is
//! whatever the producer's stamps say — the bus itself adds no guarantee
//! beyond last-value-wins.

use arc_swap::ArcSwapOption;
use mc_core::{ControlCommand, MeasuredOutput, SetpointSample};
use std::sync::Arc;

/// A named last-value topic.
///
/// `publish` atomically replaces the stored snapshot; `latest` is a
/// wait-free read of the current one.
#[derive(Debug)]
pub struct Topic<T> {
    name: &'static str,
    cell: ArcSwapOption<T>,
}

impl<T: Clone> Topic<T> {
    /// Create an empty topic.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: ArcSwapOption::const_empty(),
        }
    }

    /// Topic name (diagnostic only).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replace the stored snapshot. The previous value is discarded.
    pub fn publish(&self, message: T) {
        self.cell.store(Some(Arc::new(message)));
    }

    /// The most recently published snapshot, if any.
    pub fn latest(&self) -> Option<T> {
        self.cell.load_full().map(|message| (*message).clone())
    }
}

/// The three control-loop topics.
#[derive(Debug)]
pub struct Bus {
    /// Reference signal, produced by the setpoint generator.
    pub setpoint: Topic<SetpointSample>,
    /// Actuation command, produced by the controller.
    pub command: Topic<ControlCommand>,
    /// Measured process variable, produced by the plant.
    pub measurement: Topic<MeasuredOutput>,
}

impl Bus {
    pub fn new() -> Self {
        Self {
            setpoint: Topic::new("setpoint"),
            command: Topic::new("command"),
            measurement: Topic::new("measurement"),
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
