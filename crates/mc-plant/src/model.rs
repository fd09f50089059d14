//! First-order DC motor model.

use crate::error::PlantResult;
use mc_core::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// First-order linear motor model.
///
/// Dynamics: `dy/dt = (gain_k * u - y) / tau_t`.
///
/// For a constant input the output converges to `gain_k * u` with time
/// constant `tau_t`.
///
/// # Example
///
/// ```
/// use mc_plant::MotorModel;
///
/// let model = MotorModel::new(2.16, 0.05).unwrap();
/// assert!((model.steady_state(1.0) - 2.16).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotorModel {
    /// Static gain K.
    pub gain_k: f64,
    /// Time constant T (seconds), must be positive.
    pub tau_t: f64,
}

impl MotorModel {
    /// Create a new motor model.
    ///
    /// # Errors
    ///
    /// Returns an error if `gain_k` is not finite or `tau_t` is not a
    /// positive finite number. A zero time constant would divide by zero in
    /// the plant equation, so it is rejected here rather than producing
    /// `NaN` at runtime.
    pub fn new(gain_k: f64, tau_t: f64) -> PlantResult<Self> {
        ensure_finite(gain_k, "gain_k")?;
        ensure_positive(tau_t, "tau_t must be positive")?;
        Ok(Self { gain_k, tau_t })
    }

    /// Output derivative given current output and applied command.
    pub fn dydt(&self, output: f64, input: f64) -> f64 {
        (self.gain_k * input - output) / self.tau_t
    }

    /// Steady-state output for a constant input.
    pub fn steady_state(&self, input: f64) -> f64 {
        self.gain_k * input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_creation() {
        let m = MotorModel::new(2.16, 0.05).unwrap();
        assert_eq!(m.gain_k, 2.16);
        assert_eq!(m.tau_t, 0.05);
    }

    #[test]
    fn invalid_parameters() {
        assert!(MotorModel::new(2.16, 0.0).is_err());
        assert!(MotorModel::new(2.16, -0.05).is_err());
        assert!(MotorModel::new(f64::NAN, 0.05).is_err());
        assert!(MotorModel::new(2.16, f64::INFINITY).is_err());
    }

    #[test]
    fn derivative_sign() {
        let m = MotorModel::new(2.0, 0.1).unwrap();
        // Below steady state: output rises
        assert!(m.dydt(0.0, 1.0) > 0.0);
        // Above steady state: output falls
        assert!(m.dydt(5.0, 1.0) < 0.0);
        // At steady state: derivative is zero
        assert_eq!(m.dydt(2.0, 1.0), 0.0);
    }
}
