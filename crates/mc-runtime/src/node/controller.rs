//! PID controller node.

use crate::bus::Bus;
use crate::task::PeriodicTask;
use mc_control::{Pid, PidState, NEUTRAL_COMMAND};
use mc_core::{ControlCommand, Stamp};
use std::sync::Arc;
use tracing::debug;

/// Runs the PID law once per period against the latest bus snapshots.
///
/// Two logical states:
/// - **Uninitialized** (`state == None`): one or both input signals have
///   never been observed. Emits the neutral command.
/// - **Running**: both signals observed at least once. The first running
///   tick seeds the previous error, so no derivative is computed against an
///   undefined value.
///
/// After entering Running, a tick with a missing input republishes the last
/// command unchanged rather than computing against undefined values.
pub struct ControllerNode {
    pid: Pid,
    bus: Arc<Bus>,
    seq: u64,
    state: Option<PidState>,
    last_command: f64,
}

impl ControllerNode {
    pub fn new(pid: Pid, bus: Arc<Bus>) -> Self {
        Self {
            pid,
            bus,
            seq: 0,
            state: None,
            last_command: NEUTRAL_COMMAND,
        }
    }

    fn publish(&self, value: f64, stamp: Stamp) {
        self.bus.command.publish(ControlCommand::new(value, stamp));
    }
}

impl PeriodicTask for ControllerNode {
    fn name(&self) -> &'static str {
        "controller"
    }

    fn tick(&mut self) {
        let stamp = Stamp::at_tick(self.seq, self.pid.config().sample_time_s);
        self.seq += 1;

        let setpoint = self.bus.setpoint.latest();
        let measurement = self.bus.measurement.latest();
        let (Some(setpoint), Some(measurement)) = (setpoint, measurement) else {
            self.publish(self.last_command, stamp);
            return;
        };

        let state = match self.state {
            Some(state) => state,
            None => {
                debug!("controller running: both input signals observed");
                self.pid.initial_state(setpoint.value - measurement.value)
            }
        };
        let (next, command) = self.pid.update(&state, setpoint.value, measurement.value);
        self.state = Some(next);
        self.last_command = command;
        self.publish(command, stamp);
    }
}
