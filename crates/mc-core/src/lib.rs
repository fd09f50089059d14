//! mc-core: stable foundation for motorloop.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - message (stamped signal snapshots exchanged over the bus)
//! - error (shared error types)

pub mod error;
pub mod message;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use message::*;
pub use numeric::*;
