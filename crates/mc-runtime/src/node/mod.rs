//! Bus adapters for the three control-loop components.
//!
//! Each node owns its component state exclusively and touches the bus only
//! through published immutable snapshots. The startup and missing-input
//! policies live here, not in the pure components.

mod controller;
mod plant;
mod setpoint;

pub use controller::ControllerNode;
pub use plant::PlantNode;
pub use setpoint::SetpointNode;
