//! Fee schedule: time-of-day bands, toll-free months and charging limits.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};

/// Maximum total charged for one vehicle on one day.
pub const MAX_DAILY_FEE: u32 = 60;

/// Passages within this many minutes of an interval's first passage are
/// charged once.
pub const SINGLE_CHARGE_WINDOW_MINS: i64 = 60;

/// Months (1-based) in which no tolls are charged.
pub const TOLL_FREE_MONTHS: [u32; 1] = [7];

/// Error returned when a fee band ends before it starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fee interval: start {start} is after end {end}")]
pub struct InvalidFeeInterval {
    start: NaiveTime,
    end: NaiveTime,
}

/// A time-of-day band with its fee. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeInterval {
    start: NaiveTime,
    end: NaiveTime,
    fee: u32,
}

impl FeeInterval {
    /// Create a band. Fails if `start > end`.
    pub fn new(start: NaiveTime, end: NaiveTime, fee: u32) -> Result<Self, InvalidFeeInterval> {
        if start > end {
            return Err(InvalidFeeInterval { start, end });
        }
        Ok(Self { start, end, fee })
    }

    /// Band from `(hour, min, sec)` triples, for static tables.
    fn hms(start: (u32, u32, u32), end: (u32, u32, u32), fee: u32) -> Option<Self> {
        let start = NaiveTime::from_hms_opt(start.0, start.1, start.2)?;
        let end = NaiveTime::from_hms_opt(end.0, end.1, end.2)?;
        Self::new(start, end, fee).ok()
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn fee(&self) -> u32 {
        self.fee
    }

    /// Whether `time` falls inside this band.
    ///
    /// Fractional seconds are dropped first, so 06:29:59.5 still matches a
    /// band ending at 06:29:59.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let time = time.with_nanosecond(0).unwrap_or(time);
        self.start <= time && time <= self.end
    }
}

/// The complete fee table plus the limits applied on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSchedule {
    /// Fee bands, searched in order; the first match wins.
    pub intervals: Vec<FeeInterval>,

    /// Months (1-based) that are toll-free in their entirety.
    pub toll_free_months: Vec<u32>,

    /// Cap on the sum of a day's interval fees.
    pub max_daily_fee: u32,

    /// Single-charge window length (minutes).
    pub single_charge_window_mins: i64,
}

impl FeeSchedule {
    /// Create a schedule with the given parameters.
    pub fn new(
        intervals: Vec<FeeInterval>,
        toll_free_months: Vec<u32>,
        max_daily_fee: u32,
        single_charge_window_mins: i64,
    ) -> Self {
        Self {
            intervals,
            toll_free_months,
            max_daily_fee,
            single_charge_window_mins,
        }
    }

    /// The fixed nine-band table, 06:00 to 18:29:59.
    pub fn standard() -> Self {
        let intervals = [
            ((6, 0, 0), (6, 29, 59), 8),
            ((6, 30, 0), (6, 59, 59), 13),
            ((7, 0, 0), (7, 59, 59), 18),
            ((8, 0, 0), (8, 29, 59), 13),
            ((8, 30, 0), (14, 59, 59), 8),
            ((15, 0, 0), (15, 29, 59), 13),
            ((15, 30, 0), (16, 59, 59), 18),
            ((17, 0, 0), (17, 59, 59), 13),
            ((18, 0, 0), (18, 29, 59), 8),
        ]
        .into_iter()
        .filter_map(|(start, end, fee)| FeeInterval::hms(start, end, fee))
        .collect();

        Self::new(
            intervals,
            TOLL_FREE_MONTHS.to_vec(),
            MAX_DAILY_FEE,
            SINGLE_CHARGE_WINDOW_MINS,
        )
    }

    /// Fee for a passage at `time`, or 0 outside every band.
    pub fn fee_for(&self, time: NaiveTime) -> u32 {
        self.intervals
            .iter()
            .find(|interval| interval.contains(time))
            .map_or(0, FeeInterval::fee)
    }

    /// Whether `date` falls in a toll-free month.
    pub fn is_toll_free_month(&self, date: NaiveDate) -> bool {
        self.toll_free_months.contains(&date.month())
    }

    /// Returns the single-charge window as a Duration.
    pub fn single_charge_window(&self) -> Duration {
        Duration::minutes(self.single_charge_window_mins)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn standard_table() {
        let schedule = FeeSchedule::standard();
        assert_eq!(schedule.intervals.len(), 9);
        assert_eq!(schedule.toll_free_months, vec![7]);
        assert_eq!(schedule.max_daily_fee, 60);
        assert_eq!(schedule.single_charge_window(), Duration::minutes(60));
        assert_eq!(schedule, FeeSchedule::default());
    }

    #[test]
    fn fee_per_band() {
        let schedule = FeeSchedule::standard();
        assert_eq!(schedule.fee_for(t(6, 0, 0)), 8);
        assert_eq!(schedule.fee_for(t(6, 29, 59)), 8);
        assert_eq!(schedule.fee_for(t(6, 30, 0)), 13);
        assert_eq!(schedule.fee_for(t(7, 0, 0)), 18);
        assert_eq!(schedule.fee_for(t(7, 59, 59)), 18);
        assert_eq!(schedule.fee_for(t(8, 15, 0)), 13);
        assert_eq!(schedule.fee_for(t(12, 0, 0)), 8);
        assert_eq!(schedule.fee_for(t(15, 0, 0)), 13);
        assert_eq!(schedule.fee_for(t(16, 59, 59)), 18);
        assert_eq!(schedule.fee_for(t(17, 30, 0)), 13);
        assert_eq!(schedule.fee_for(t(18, 29, 59)), 8);
    }

    #[test]
    fn free_outside_bands() {
        let schedule = FeeSchedule::standard();
        assert_eq!(schedule.fee_for(t(0, 0, 0)), 0);
        assert_eq!(schedule.fee_for(t(1, 0, 0)), 0);
        assert_eq!(schedule.fee_for(t(5, 59, 59)), 0);
        assert_eq!(schedule.fee_for(t(18, 30, 0)), 0);
        assert_eq!(schedule.fee_for(t(23, 59, 59)), 0);
    }

    #[test]
    fn fractional_seconds_stay_in_band() {
        let schedule = FeeSchedule::standard();
        let time = NaiveTime::from_hms_milli_opt(6, 29, 59, 500).unwrap();
        assert_eq!(schedule.fee_for(time), 8);
    }

    #[test]
    fn first_matching_band_wins() {
        let overlapping = FeeSchedule::new(
            vec![
                FeeInterval::new(t(6, 0, 0), t(8, 0, 0), 5).unwrap(),
                FeeInterval::new(t(7, 0, 0), t(9, 0, 0), 50).unwrap(),
            ],
            vec![],
            60,
            60,
        );
        assert_eq!(overlapping.fee_for(t(7, 30, 0)), 5);
        assert_eq!(overlapping.fee_for(t(8, 30, 0)), 50);
    }

    #[test]
    fn reject_inverted_interval() {
        let err = FeeInterval::new(t(9, 0, 0), t(8, 0, 0), 8).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid fee interval: start 09:00:00 is after end 08:00:00"
        );
        assert!(FeeInterval::new(t(8, 0, 0), t(8, 0, 0), 8).is_ok());
    }

    #[test]
    fn toll_free_month() {
        let schedule = FeeSchedule::standard();
        let july = NaiveDate::from_ymd_opt(2013, 7, 1).unwrap();
        let june = NaiveDate::from_ymd_opt(2013, 6, 28).unwrap();
        assert!(schedule.is_toll_free_month(july));
        assert!(!schedule.is_toll_free_month(june));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every time of day maps to one of the published fees
        #[test]
        fn fee_is_from_table(h in 0u32..24, m in 0u32..60, s in 0u32..60) {
            let schedule = FeeSchedule::standard();
            let fee = schedule.fee_for(NaiveTime::from_hms_opt(h, m, s).unwrap());
            prop_assert!([0, 8, 13, 18].contains(&fee));
        }

        /// Nothing is charged before 06:00 or from 18:30 onwards
        #[test]
        fn free_at_night(h in prop_oneof![0u32..6, 19u32..24], m in 0u32..60) {
            let schedule = FeeSchedule::standard();
            prop_assert_eq!(schedule.fee_for(NaiveTime::from_hms_opt(h, m, 0).unwrap()), 0);
        }
    }
}
