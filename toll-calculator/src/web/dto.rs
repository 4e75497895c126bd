//! Data transfer objects for web requests and responses.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::VehicleKind;
use crate::fees::{ChargedInterval, DailyCharge};
use crate::holidays::{HolidayLookup, HolidayName, HolidayRecord, HolidaySource};

/// Accepted passage timestamp formats, tried in order.
const PASSAGE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a passage timestamp such as `2013-05-15T07:00:00` or `2013-05-15 07:00`.
pub fn parse_passage(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    PASSAGE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Request to calculate fees.
#[derive(Debug, Deserialize)]
pub struct FeeRequest {
    /// Vehicle kind (e.g., "car", "motorbike")
    pub vehicle: String,

    /// Passage timestamps
    pub passages: Vec<String>,
}

impl FeeRequest {
    /// Validate the vehicle kind and timestamps.
    pub fn parse(&self) -> Result<(VehicleKind, Vec<NaiveDateTime>), String> {
        let vehicle = self
            .vehicle
            .parse::<VehicleKind>()
            .map_err(|e| e.to_string())?;

        let passages = self
            .passages
            .iter()
            .map(|p| parse_passage(p).ok_or_else(|| format!("Invalid passage timestamp: {p}")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((vehicle, passages))
    }
}

/// A charged interval in a fee breakdown.
#[derive(Debug, Serialize)]
pub struct IntervalResult {
    /// Time of the first passage (HH:MM:SS)
    pub start: String,

    /// Number of passages charged together
    pub passages: usize,

    /// Fee charged for the interval
    pub fee: u32,
}

impl From<&ChargedInterval> for IntervalResult {
    fn from(interval: &ChargedInterval) -> Self {
        Self {
            start: interval.start.format("%H:%M:%S").to_string(),
            passages: interval.passages,
            fee: interval.fee,
        }
    }
}

/// One day in a fee response.
#[derive(Debug, Serialize)]
pub struct DayResult {
    /// Date (YYYY-MM-DD)
    pub date: String,

    /// Total fee for the day
    pub fee: u32,

    /// Charged intervals; empty on toll-free days
    pub intervals: Vec<IntervalResult>,
}

impl From<&DailyCharge> for DayResult {
    fn from(charge: &DailyCharge) -> Self {
        Self {
            date: format_date(charge.date),
            fee: charge.fee,
            intervals: charge.intervals.iter().map(IntervalResult::from).collect(),
        }
    }
}

/// Response for a multi-day fee calculation.
#[derive(Debug, Serialize)]
pub struct FeesResponse {
    pub vehicle: VehicleKind,
    pub days: Vec<DayResult>,

    /// Sum over all days
    pub total: u32,
}

impl FeesResponse {
    pub fn new(vehicle: VehicleKind, charges: &[DailyCharge]) -> Self {
        Self {
            vehicle,
            days: charges.iter().map(DayResult::from).collect(),
            total: charges.iter().map(|c| c.fee).sum(),
        }
    }
}

/// Response for a single-day fee calculation.
#[derive(Debug, Serialize)]
pub struct DailyFeeResponse {
    pub date: String,
    pub fee: u32,
}

/// A holiday in a holidays response.
#[derive(Debug, Serialize)]
pub struct HolidayResult {
    pub date: String,
    pub name: HolidayName,
}

impl From<&HolidayRecord> for HolidayResult {
    fn from(record: &HolidayRecord) -> Self {
        Self {
            date: format_date(record.date),
            name: record.name.clone(),
        }
    }
}

/// Response listing a year's holidays.
#[derive(Debug, Serialize)]
pub struct HolidaysResponse {
    pub year: i32,

    /// Which tier produced the list
    pub source: HolidaySource,

    pub holidays: Vec<HolidayResult>,
}

impl From<&HolidayLookup> for HolidaysResponse {
    fn from(lookup: &HolidayLookup) -> Self {
        Self {
            year: lookup.year,
            source: lookup.source,
            holidays: lookup.holidays.iter().map(HolidayResult::from).collect(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
