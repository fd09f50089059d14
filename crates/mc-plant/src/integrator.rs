//! Fixed-step time integrators for the scalar plant state.
//!
//! The applied command is held constant over each step (zero-order hold),
//! matching the sampled execution of the control loop.

use crate::model::MotorModel;
use serde::{Deserialize, Serialize};

/// Trait for fixed-step integrators of the scalar plant ODE.
pub trait Integrator {
    /// Advance the output by one step of size `dt` under constant input `u`.
    fn step(&self, model: &MotorModel, y: f64, u: f64, dt: f64) -> f64;
}

/// Explicit (forward) Euler: `y[k+1] = y[k] + dt * f(y[k], u[k])`.
///
/// For the motor model this is exactly the discretization
/// `y[k+1] = y[k] + (dt/T) * (K*u[k] - y[k])`.
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step(&self, model: &MotorModel, y: f64, u: f64, dt: f64) -> f64 {
        y + dt * model.dydt(y, u)
    }
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct Rk4;

impl Integrator for Rk4 {
    fn step(&self, model: &MotorModel, y: f64, u: f64, dt: f64) -> f64 {
        let k1 = model.dydt(y, u);
        let k2 = model.dydt(y + 0.5 * dt * k1, u);
        let k3 = model.dydt(y + 0.5 * dt * k2, u);
        let k4 = model.dydt(y + dt * k3, u);
        y + (dt / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
    }
}

/// Integrator selection for the plant simulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    /// Forward Euler (1st-order, 1 rhs call per step, default).
    #[default]
    ForwardEuler,
    /// 4th-order Runge-Kutta (4 rhs calls per step).
    Rk4,
}

impl IntegratorKind {
    /// Advance one step with the selected scheme.
    pub fn step(&self, model: &MotorModel, y: f64, u: f64, dt: f64) -> f64 {
        match self {
            IntegratorKind::ForwardEuler => ForwardEuler.step(model, y, u, dt),
            IntegratorKind::Rk4 => Rk4.step(model, y, u, dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(model: &MotorModel, y0: f64, u: f64, t: f64) -> f64 {
        let y_ss = model.steady_state(u);
        y_ss + (y0 - y_ss) * (-t / model.tau_t).exp()
    }

    #[test]
    fn euler_matches_spec_discretization() {
        let model = MotorModel::new(2.16, 0.05).unwrap();
        let (y, u, dt) = (0.3, 0.7, 0.01);
        let expected = y + (dt / model.tau_t) * (model.gain_k * u - y);
        assert_eq!(ForwardEuler.step(&model, y, u, dt), expected);
    }

    #[test]
    fn rk4_beats_euler_against_exact_solution() {
        let model = MotorModel::new(2.16, 0.05).unwrap();
        let (y0, u, dt) = (0.0, 1.0, 0.01);

        let mut y_euler = y0;
        let mut y_rk4 = y0;
        let steps = 20;
        for _ in 0..steps {
            y_euler = ForwardEuler.step(&model, y_euler, u, dt);
            y_rk4 = Rk4.step(&model, y_rk4, u, dt);
        }

        let y_true = exact(&model, y0, u, steps as f64 * dt);
        let err_euler = (y_euler - y_true).abs();
        let err_rk4 = (y_rk4 - y_true).abs();
        assert!(err_rk4 < err_euler);
        assert!(err_rk4 < 1e-6, "rk4 error too large: {err_rk4}");
    }

    #[test]
    fn kind_dispatch_matches_impls() {
        let model = MotorModel::new(1.5, 0.2).unwrap();
        let (y, u, dt) = (0.1, 0.4, 0.005);
        assert_eq!(
            IntegratorKind::ForwardEuler.step(&model, y, u, dt),
            ForwardEuler.step(&model, y, u, dt)
        );
        assert_eq!(
            IntegratorKind::Rk4.step(&model, y, u, dt),
            Rk4.step(&model, y, u, dt)
        );
    }

    #[test]
    fn default_kind_is_euler() {
        assert_eq!(IntegratorKind::default(), IntegratorKind::ForwardEuler);
    }
}
