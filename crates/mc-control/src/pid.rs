//! PID controller with a config/state split and a pure update.
//!
//! The default algorithm is the textbook discrete PID law:
//!
//! ```text
//! error      = setpoint - measurement
//! integral  += error * dt
//! derivative = (error - previous_error) / dt
//! command    = kp*error + ki*integral + kd*derivative
//! ```
//!
//! Output saturation, integral clamping, and derivative low-pass filtering
//! are explicit opt-in configuration — none of them is applied silently.

use crate::error::{ControlError, ControlResult};
use mc_core::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// Command emitted before the controller has seen both input signals.
pub const NEUTRAL_COMMAND: f64 = 0.0;

/// Output saturation bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputLimits {
    /// Minimum command value.
    pub min: f64,
    /// Maximum command value.
    pub max: f64,
}

/// PID controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidConfig {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
    /// Controller sample period (seconds), the dt used in the integral and
    /// derivative terms.
    pub sample_time_s: f64,
    /// Optional output saturation. When the raw output saturates, the
    /// integral is frozen for that step (conditional integration).
    #[serde(default)]
    pub output_limits: Option<OutputLimits>,
    /// Optional symmetric clamp on the integral accumulator.
    #[serde(default)]
    pub integral_limit: Option<f64>,
    /// Optional first-order low-pass time constant (seconds) applied to the
    /// derivative input. Without it the derivative differentiates the raw
    /// error, which amplifies per-sample changes by `kd/dt`.
    #[serde(default)]
    pub derivative_filter_tau_s: Option<f64>,
}

impl PidConfig {
    /// Validate all numeric parameters, failing fast on anything that would
    /// produce `NaN`/`inf` at runtime.
    pub fn validate(&self) -> ControlResult<()> {
        ensure_finite(self.kp, "kp")?;
        ensure_finite(self.ki, "ki")?;
        ensure_finite(self.kd, "kd")?;
        ensure_positive(self.sample_time_s, "sample_time_s must be positive")?;
        if let Some(limits) = &self.output_limits {
            ensure_finite(limits.min, "output_limits.min")?;
            ensure_finite(limits.max, "output_limits.max")?;
            if limits.min >= limits.max {
                return Err(ControlError::InvalidArg {
                    what: "output_limits.min must be less than output_limits.max",
                });
            }
        }
        if let Some(limit) = self.integral_limit {
            ensure_positive(limit, "integral_limit must be positive")?;
        }
        if let Some(tau) = self.derivative_filter_tau_s {
            ensure_positive(tau, "derivative_filter_tau_s must be positive")?;
        }
        Ok(())
    }
}

/// PID controller state, persisted by the owner across steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidState {
    /// Integral accumulator.
    pub integral: f64,
    /// Error from the previous step.
    pub previous_error: f64,
    /// Low-pass-filtered error used by the derivative term when filtering
    /// is configured; mirrors the raw error otherwise.
    pub filtered_error: f64,
}

/// Discrete PID controller.
#[derive(Debug, Clone)]
pub struct Pid {
    config: PidConfig,
}

impl Pid {
    /// Create a controller from a validated configuration.
    pub fn new(config: PidConfig) -> ControlResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The controller configuration.
    pub fn config(&self) -> &PidConfig {
        &self.config
    }

    /// State for the first running step, seeded with the first observed
    /// error so that step computes a zero derivative instead of
    /// differentiating against an undefined previous error.
    pub fn initial_state(&self, error: f64) -> PidState {
        PidState {
            integral: 0.0,
            previous_error: error,
            filtered_error: error,
        }
    }

    /// Compute one control step.
    ///
    /// Returns the updated state and the command. The state is not mutated
    /// in place; the owner decides whether to commit it.
    pub fn update(&self, state: &PidState, setpoint: f64, measurement: f64) -> (PidState, f64) {
        let dt = self.config.sample_time_s;
        let error = setpoint - measurement;

        let new_integral = state.integral + error * dt;
        let clamped_integral = match self.config.integral_limit {
            Some(limit) => new_integral.clamp(-limit, limit),
            None => new_integral,
        };

        // Derivative input: raw error, or first-order low-pass of it.
        let (derivative, new_filtered) = match self.config.derivative_filter_tau_s {
            Some(tau) => {
                let alpha = tau / (tau + dt);
                let filtered = alpha * state.filtered_error + (1.0 - alpha) * error;
                ((filtered - state.filtered_error) / dt, filtered)
            }
            None => ((error - state.previous_error) / dt, error),
        };

        let raw = self.config.kp * error
            + self.config.ki * clamped_integral
            + self.config.kd * derivative;

        let output = match &self.config.output_limits {
            Some(limits) => raw.clamp(limits.min, limits.max),
            None => raw,
        };

        // Conditional integration: freeze the accumulator while saturated.
        let final_integral = if output == raw {
            clamped_integral
        } else {
            state.integral
        };

        let new_state = PidState {
            integral: final_integral,
            previous_error: error,
            filtered_error: new_filtered,
        };
        (new_state, output)
    }
}
