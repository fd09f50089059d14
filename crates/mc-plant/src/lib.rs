//! First-order motor plant model and fixed-step simulation for motorloop.
//!
//! The plant is a first-order linear system with static gain `K` and time
//! constant `T`:
//!
//! ```text
//! dy/dt = (K*u - y) / T
//! ```
//!
//! discretized at a fixed sample period. The integration scheme is a
//! configuration choice: explicit (forward) Euler by default, classical RK4
//! as the higher-order alternative.

pub mod error;
pub mod integrator;
pub mod model;
pub mod simulator;

pub use error::{PlantError, PlantResult};
pub use integrator::{ForwardEuler, Integrator, IntegratorKind, Rk4};
pub use model::MotorModel;
pub use simulator::{PlantConfig, PlantSimulator, PlantState};
