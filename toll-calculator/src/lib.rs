//! Toll fee calculator.
//!
//! Computes what a vehicle owes for a day of road-toll passages: fees by
//! time of day, one charge per hour-long window, a daily cap, and no charge
//! on weekends, in July, on public holidays, or for exempt vehicles.

pub mod domain;
pub mod fees;
pub mod holidays;
pub mod policy;
pub mod schedule;
pub mod web;
