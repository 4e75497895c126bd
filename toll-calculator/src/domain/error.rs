//! Domain error types.
//!
//! These are the only failures that abort a fee calculation and reach the
//! caller. Holiday fetch failures are absorbed by the resolver and never
//! show up here.

use chrono::NaiveDate;

/// Error returned when holidays are requested for a year outside the
/// supported range (negative, or after the latest known year).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("year {year} is out of range (expected 0..={latest})")]
pub struct YearOutOfRange {
    pub year: i32,
    pub latest: i32,
}

/// Errors from toll fee calculation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TollError {
    /// No passages were supplied
    #[error("invalid passages: passage list cannot be empty")]
    InvalidPassages,

    /// A single-day calculation was given passages on more than one date
    #[error("all passages must be on the same day (found {first} and {other})")]
    MultipleDays { first: NaiveDate, other: NaiveDate },

    /// Holiday lookup was asked about an unsupported year
    #[error(transparent)]
    OutOfRange(#[from] YearOutOfRange),
}
