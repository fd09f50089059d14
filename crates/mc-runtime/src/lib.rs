//! Periodic scheduling and messaging runtime for motorloop.
//!
//! Ties the pure components (plant simulator, PID controller, setpoint
//! generator) together into a closed loop, two ways:
//!
//! - **Real-time**: each node runs on its own thread with a fixed-period
//!   timer ([`spawn_periodic`]), exchanging stamped snapshots over a
//!   last-value-wins [`Bus`]. Tasks never block on each other; a missing
//!   input is a policy decision (zero command / hold last), not an error.
//! - **Lockstep**: the same nodes advanced on a shared virtual clock
//!   ([`lockstep::run_lockstep`]) for deterministic simulation and testing.
//!
//! Timing jitter and overruns are metered per task and logged, never fatal.

pub mod bus;
pub mod config;
pub mod error;
pub mod lockstep;
pub mod node;
pub mod rig;
pub mod task;
pub mod timing;

pub use bus::{Bus, Topic};
pub use config::{RigConfig, SetpointConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use lockstep::{run_lockstep, LockstepOptions, LockstepRecord};
pub use node::{ControllerNode, PlantNode, SetpointNode};
pub use rig::{Rig, RunningRig, TaskReport};
pub use task::{spawn_periodic, PeriodicTask, TaskHandle};
pub use timing::{TickOutcome, Ticker, TimingReport, TimingStats};
