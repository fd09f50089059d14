//! Rig assembly: build the bus and the three nodes from a validated
//! configuration, start them, tear them down deterministically.

use crate::bus::Bus;
use crate::config::RigConfig;
use crate::error::RuntimeResult;
use crate::node::{ControllerNode, PlantNode, SetpointNode};
use crate::task::{spawn_periodic, TaskHandle};
use crate::timing::TimingReport;
use mc_control::{Pid, SetpointGenerator};
use mc_plant::PlantSimulator;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Timing report for one stopped task.
#[derive(Clone, Copy, Debug)]
pub struct TaskReport {
    pub name: &'static str,
    pub timing: TimingReport,
}

/// A validated rig, ready to start.
pub struct Rig {
    config: RigConfig,
}

impl Rig {
    /// Validate the configuration and build a rig.
    pub fn new(config: RigConfig) -> RuntimeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Spawn the three periodic tasks, leaves first (plant and setpoint
    /// depend only on the bus; the controller needs both their signals).
    pub fn start(&self) -> RuntimeResult<RunningRig> {
        let bus = Arc::new(Bus::new());

        let plant = PlantNode::new(PlantSimulator::new(&self.config.plant)?, Arc::clone(&bus));
        let setpoint = SetpointNode::new(
            SetpointGenerator::new(self.config.setpoint.waveform)?,
            self.config.setpoint_period_s(),
            Arc::clone(&bus),
        );
        let controller = ControllerNode::new(
            Pid::new(self.config.controller.clone())?,
            Arc::clone(&bus),
        );

        let tasks = vec![
            spawn_periodic(
                plant,
                Duration::from_secs_f64(self.config.plant.sample_time_s),
            )?,
            spawn_periodic(
                setpoint,
                Duration::from_secs_f64(self.config.setpoint_period_s()),
            )?,
            spawn_periodic(
                controller,
                Duration::from_secs_f64(self.config.controller.sample_time_s),
            )?,
        ];
        debug!("rig started");

        Ok(RunningRig { bus, tasks })
    }
}

/// A running rig. Stop it explicitly for timing reports; dropping it also
/// stops every task.
pub struct RunningRig {
    bus: Arc<Bus>,
    tasks: Vec<TaskHandle>,
}

impl RunningRig {
    /// Observe the live bus (the latest snapshot on each topic).
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Shared handle to the bus; clones stay readable after `stop`.
    pub fn bus_arc(&self) -> &Arc<Bus> {
        &self.bus
    }

    /// Stop all tasks — consumers before producers — and return their
    /// timing reports. On return no timer fires and every task's bus
    /// handles have been released.
    pub fn stop(mut self) -> Vec<TaskReport> {
        let mut reports = Vec::with_capacity(self.tasks.len());
        for task in self.tasks.iter_mut().rev() {
            task.stop();
            reports.push(TaskReport {
                name: task.name(),
                timing: task.stats(),
            });
        }
        debug!("rig stopped");
        reports.reverse();
        reports
    }
}
