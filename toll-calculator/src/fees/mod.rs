//! Fee aggregation.
//!
//! [`TollCalculator`] validates and prices passages, and [`aggregate`]
//! collapses one day's priced passages into charged intervals under the
//! single-charge window and the daily cap.

mod aggregate;
mod calculator;


pub use aggregate::{ChargedInterval, DailyCharge, aggregate, capped_total, charge_intervals};
pub use calculator::{DefaultTollCalculator, TollCalculator};
