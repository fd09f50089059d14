//! Deterministic lockstep execution of the closed loop.
//!
//! Runs the same nodes as the real-time rig, but advanced on a shared
//! virtual clock: per round, any node whose period divides the elapsed base
//! steps ticks once, in dependency order (setpoint, controller, plant).
//! Results are bitwise reproducible, which is what the closed-loop tests
//! and the CLI `simulate` command want.

use crate::bus::Bus;
use crate::config::RigConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::node::{ControllerNode, PlantNode, SetpointNode};
use crate::task::PeriodicTask;
use mc_control::{Pid, SetpointGenerator};
use mc_plant::PlantSimulator;
use std::sync::Arc;

/// Options for lockstep runs.
#[derive(Clone, Debug)]
pub struct LockstepOptions {
    /// Final virtual time (seconds).
    pub t_end_s: f64,
    /// Maximum number of base rounds (safety limit).
    pub max_steps: usize,
    /// Record every N-th round (decimation).
    pub record_every: usize,
}

impl Default for LockstepOptions {
    fn default() -> Self {
        Self {
            t_end_s: 5.0,
            max_steps: 1_000_000,
            record_every: 1,
        }
    }
}

/// Recorded closed-loop timeseries.
#[derive(Clone, Debug, Default)]
pub struct LockstepRecord {
    /// Virtual time of each recorded round (seconds).
    pub t_s: Vec<f64>,
    /// Latest reference value at that round.
    pub setpoint: Vec<f64>,
    /// Latest control command at that round.
    pub command: Vec<f64>,
    /// Latest measured output at that round.
    pub output: Vec<f64>,
}

impl LockstepRecord {
    pub fn len(&self) -> usize {
        self.t_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t_s.is_empty()
    }
}

/// Run the closed loop on a virtual clock.
///
/// The base round is the smallest configured period; every other period
/// must be an integer multiple of it.
pub fn run_lockstep(config: &RigConfig, opts: &LockstepOptions) -> RuntimeResult<LockstepRecord> {
    config.validate()?;
    if !opts.t_end_s.is_finite() || opts.t_end_s < 0.0 {
        return Err(RuntimeError::InvalidArg {
            what: "t_end_s must be non-negative",
        });
    }
    if opts.max_steps == 0 {
        return Err(RuntimeError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(RuntimeError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let plant_period = config.plant.sample_time_s;
    let setpoint_period = config.setpoint_period_s();
    let controller_period = config.controller.sample_time_s;
    let base = plant_period.min(setpoint_period).min(controller_period);

    let setpoint_every = steps_per_tick(setpoint_period, base)?;
    let controller_every = steps_per_tick(controller_period, base)?;
    let plant_every = steps_per_tick(plant_period, base)?;

    let bus = Arc::new(Bus::new());
    let mut setpoint = SetpointNode::new(
        SetpointGenerator::new(config.setpoint.waveform)?,
        setpoint_period,
        Arc::clone(&bus),
    );
    let mut controller = ControllerNode::new(Pid::new(config.controller.clone())?, Arc::clone(&bus));
    let mut plant = PlantNode::new(PlantSimulator::new(&config.plant)?, Arc::clone(&bus));

    let mut record = LockstepRecord::default();
    let mut recorded_last = false;
    let mut round: usize = 0;
    while (round as f64) * base < opts.t_end_s && round < opts.max_steps {
        if round % setpoint_every == 0 {
            setpoint.tick();
        }
        if round % controller_every == 0 {
            controller.tick();
        }
        if round % plant_every == 0 {
            plant.tick();
        }

        recorded_last = round % opts.record_every == 0;
        if recorded_last {
            push_row(&mut record, round as f64 * base, &bus);
        }
        round += 1;
    }

    // Always record the final round
    if round > 0 && !recorded_last {
        push_row(&mut record, (round - 1) as f64 * base, &bus);
    }

    Ok(record)
}

fn steps_per_tick(period: f64, base: f64) -> RuntimeResult<usize> {
    let ratio = period / base;
    let rounded = ratio.round();
    if rounded < 1.0 || (ratio - rounded).abs() > 1e-6 {
        return Err(RuntimeError::Config {
            message: format!(
                "period {period} s is not an integer multiple of the base round {base} s"
            ),
        });
    }
    Ok(rounded as usize)
}

fn push_row(record: &mut LockstepRecord, t_s: f64, bus: &Bus) {
    record.t_s.push(t_s);
    record
        .setpoint
        .push(bus.setpoint.latest().map(|s| s.value).unwrap_or(0.0));
    record
        .command
        .push(bus.command.latest().map(|c| c.value).unwrap_or(0.0));
    record
        .output
        .push(bus.measurement.latest().map(|m| m.value).unwrap_or(0.0));
}
