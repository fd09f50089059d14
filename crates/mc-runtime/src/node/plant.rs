//! Plant simulator node.

use crate::bus::Bus;
use crate::task::PeriodicTask;
use mc_core::{MeasuredOutput, Stamp};
use mc_plant::PlantSimulator;
use std::sync::Arc;

/// Steps the motor model once per period and publishes the measured output.
///
/// Startup policy: until the first `ControlCommand` arrives, the applied
/// command is zero. Absence of input is a defined state, not an error.
pub struct PlantNode {
    simulator: PlantSimulator,
    bus: Arc<Bus>,
    seq: u64,
}

impl PlantNode {
    pub fn new(simulator: PlantSimulator, bus: Arc<Bus>) -> Self {
        Self {
            simulator,
            bus,
            seq: 0,
        }
    }
}

impl PeriodicTask for PlantNode {
    fn name(&self) -> &'static str {
        "plant"
    }

    fn tick(&mut self) {
        let command = self
            .bus
            .command
            .latest()
            .map(|command| command.value)
            .unwrap_or(0.0);
        let output = self.simulator.step(command);
        let stamp = Stamp::at_tick(self.seq, self.simulator.sample_time_s());
        self.bus
            .measurement
            .publish(MeasuredOutput::new(output, stamp));
        self.seq += 1;
    }
}
