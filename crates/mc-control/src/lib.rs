//! Controller and reference-signal primitives for motorloop.
//!
//! This crate holds the pure control math, independent of scheduling and
//! messaging:
//! - **PID controller** with a config/state split and a functionally pure
//!   update, plus opt-in output saturation, integral clamping, and
//!   derivative low-pass filtering
//! - **Setpoint waveforms** (sine, constant) sampled as pure functions of
//!   elapsed time
//!
//! Periodic execution and the startup/hold policies around missing inputs
//! live in `mc-runtime`; everything here is deterministic and directly
//! testable.

pub mod error;
pub mod pid;
pub mod setpoint;

pub use error::{ControlError, ControlResult};
pub use pid::{OutputLimits, Pid, PidConfig, PidState, NEUTRAL_COMMAND};
pub use setpoint::{SetpointGenerator, Waveform};
