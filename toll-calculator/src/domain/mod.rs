//! Domain types for the toll calculator.
//!
//! Vehicles, and the errors a fee calculation can surface to its caller.

mod error;
mod vehicle;

pub use error::{TollError, YearOutOfRange};
pub use vehicle::{InvalidVehicleKind, Vehicle, VehicleKind};
