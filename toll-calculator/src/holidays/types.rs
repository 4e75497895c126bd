//! Holiday data types.
//!
//! `HolidayDto` mirrors the remote API's JSON; `HolidayRecord` is the
//! validated form the rest of the crate works with.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::HolidayError;

/// Localised holiday name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayName {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub sv: String,
}

impl HolidayName {
    pub fn new(en: impl Into<String>, sv: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            sv: sv.into(),
        }
    }
}

/// A single public holiday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayRecord {
    pub date: NaiveDate,
    pub name: HolidayName,
}

impl HolidayRecord {
    pub fn new(date: NaiveDate, name: HolidayName) -> Self {
        Self { date, name }
    }
}

/// Which tier of the resolution chain produced a set of holidays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidaySource {
    /// Computed from local holiday rules
    LocalRules,
    /// Fetched from the remote holidays API
    Remote,
    /// Fixed-date fallback table
    Fallback,
}

/// The resolved holidays for one year, tagged with where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayLookup {
    pub year: i32,
    pub source: HolidaySource,
    pub holidays: Vec<HolidayRecord>,
}

impl HolidayLookup {
    /// Whether `date` is one of the resolved holidays.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.date == date)
    }

    /// All holiday dates, in the order the source returned them.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.holidays.iter().map(|h| h.date)
    }
}

/// Raw holiday entry as returned by the remote API.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayDto {
    /// ISO date, optionally followed by a time (`2013-01-01T00:00:00`)
    pub date: String,
    #[serde(default)]
    pub name: HolidayName,
}

impl HolidayDto {
    /// Validate into a [`HolidayRecord`].
    pub fn into_record(self) -> Result<HolidayRecord, HolidayError> {
        let date_part = self.date.get(..10).unwrap_or(&self.date);
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| {
            HolidayError::Json {
                message: format!("invalid holiday date {:?}: {e}", self.date),
            }
        })?;
        Ok(HolidayRecord::new(date, self.name))
    }
}
