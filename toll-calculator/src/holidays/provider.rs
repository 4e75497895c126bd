//! Holiday source abstraction.

use std::future::Future;

use super::error::HolidayError;
use super::types::HolidayRecord;

/// A source of public holidays for a calendar year.
///
/// The resolver chains several of these. An `Ok` with an empty list means
/// "this source has nothing for that year" and is treated like a failure.
pub trait HolidayProvider: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Fetch or compute holidays for `year`.
    fn holidays(
        &self,
        year: i32,
    ) -> impl Future<Output = Result<Vec<HolidayRecord>, HolidayError>> + Send;
}
