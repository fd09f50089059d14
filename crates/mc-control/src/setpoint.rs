//! Setpoint waveforms, sampled as pure functions of elapsed time.

use crate::error::ControlResult;
use mc_core::ensure_finite;
use serde::{Deserialize, Serialize};

/// Reference waveform shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Waveform {
    /// `r(t) = amplitude * sin(omega_rad_s * t)`
    Sine { amplitude: f64, omega_rad_s: f64 },
    /// `r(t) = value` (step reference, applied from t = 0)
    Constant { value: f64 },
}

/// Setpoint generator: stateless beyond its waveform parameters.
///
/// `sample` is a pure function of elapsed time, so the published reference
/// depends only on *when* it is sampled, never on how often — changing the
/// publish period changes the sampling density, not the values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetpointGenerator {
    waveform: Waveform,
}

impl SetpointGenerator {
    /// Create a generator from a validated waveform.
    pub fn new(waveform: Waveform) -> ControlResult<Self> {
        match waveform {
            Waveform::Sine {
                amplitude,
                omega_rad_s,
            } => {
                ensure_finite(amplitude, "amplitude")?;
                ensure_finite(omega_rad_s, "omega_rad_s")?;
            }
            Waveform::Constant { value } => {
                ensure_finite(value, "value")?;
            }
        }
        Ok(Self { waveform })
    }

    /// The configured waveform.
    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    /// Reference value at the given elapsed time (seconds).
    pub fn sample(&self, elapsed_s: f64) -> f64 {
        match self.waveform {
            Waveform::Sine {
                amplitude,
                omega_rad_s,
            } => amplitude * (omega_rad_s * elapsed_s).sin(),
            Waveform::Constant { value } => value,
        }
    }
}
