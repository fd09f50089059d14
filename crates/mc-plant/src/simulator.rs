//! Plant simulator: discrete-time stepping of the motor model.

use crate::error::PlantResult;
use crate::integrator::IntegratorKind;
use crate::model::MotorModel;
use mc_core::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// Plant simulator configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantConfig {
    /// Static gain K.
    pub gain_k: f64,
    /// Time constant T (seconds).
    pub tau_t: f64,
    /// Integration step / publish period (seconds).
    pub sample_time_s: f64,
    /// Initial output y[0].
    #[serde(default)]
    pub initial_output: f64,
    /// Integration scheme.
    #[serde(default)]
    pub integrator: IntegratorKind,
}

impl PlantConfig {
    /// Validate all numeric parameters, failing fast on anything that would
    /// corrupt the integration (`tau_t = 0`, non-finite values).
    pub fn validate(&self) -> PlantResult<()> {
        ensure_finite(self.gain_k, "gain_k")?;
        ensure_positive(self.tau_t, "tau_t must be positive")?;
        ensure_positive(self.sample_time_s, "sample_time_s must be positive")?;
        ensure_finite(self.initial_output, "initial_output")?;
        Ok(())
    }
}

/// Plant state: owned exclusively by the plant task, mutated only inside
/// its periodic step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantState {
    /// Measured process variable.
    pub output: f64,
    /// Nominal elapsed time (steps * sample time), seconds.
    pub time_s: f64,
    /// Last applied control command.
    pub input: f64,
}

/// Discrete-time simulator for the first-order motor plant.
///
/// Each call to [`step`](PlantSimulator::step) advances the state by exactly
/// one sample period. Time advances nominally; drift between wall-clock tick
/// arrival and the nominal period is not compensated.
#[derive(Clone, Debug)]
pub struct PlantSimulator {
    model: MotorModel,
    integrator: IntegratorKind,
    sample_time_s: f64,
    state: PlantState,
    ticks: u64,
}

impl PlantSimulator {
    /// Build a simulator from a validated configuration.
    pub fn new(config: &PlantConfig) -> PlantResult<Self> {
        config.validate()?;
        let model = MotorModel::new(config.gain_k, config.tau_t)?;
        Ok(Self {
            model,
            integrator: config.integrator,
            sample_time_s: config.sample_time_s,
            state: PlantState {
                output: config.initial_output,
                time_s: 0.0,
                input: 0.0,
            },
            ticks: 0,
        })
    }

    /// Advance one sample period under the given command and return the new
    /// output.
    ///
    /// A missing upstream command is the caller's concern; by the startup
    /// policy the plant node passes `0.0` until the first command arrives.
    pub fn step(&mut self, command: f64) -> f64 {
        let y = self
            .integrator
            .step(&self.model, self.state.output, command, self.sample_time_s);
        self.ticks += 1;
        self.state = PlantState {
            output: y,
            time_s: self.ticks as f64 * self.sample_time_s,
            input: command,
        };
        y
    }

    /// Current state snapshot.
    pub fn state(&self) -> PlantState {
        self.state
    }

    /// Configured sample period (seconds).
    pub fn sample_time_s(&self) -> f64 {
        self.sample_time_s
    }

    /// The underlying model.
    pub fn model(&self) -> &MotorModel {
        &self.model
    }
}
