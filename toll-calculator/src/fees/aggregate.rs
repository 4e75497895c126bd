//! Single-charge interval sweep.
//!
//! Passages are grouped into intervals: an interval opens at a passage and
//! absorbs every later passage no more than the single-charge window after
//! that opening passage. Each interval is charged once, at the highest fee
//! among its passages. A passage exactly one window after the interval
//! start still belongs to it; anything later opens a new interval.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::schedule::FeeSchedule;

/// A group of passages charged as one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargedInterval {
    /// Time of the passage that opened the interval.
    pub start: NaiveDateTime,

    /// Number of passages in the interval.
    pub passages: usize,

    /// Highest single-passage fee in the interval.
    pub fee: u32,
}

/// One day's charge for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCharge {
    pub date: NaiveDate,

    /// Charged intervals in time order. Empty when the day is toll-free.
    pub intervals: Vec<ChargedInterval>,

    /// Sum of interval fees, clamped to the daily maximum.
    pub fee: u32,
}

impl DailyCharge {
    /// Build from intervals, applying the daily cap.
    pub fn new(date: NaiveDate, intervals: Vec<ChargedInterval>, max_daily_fee: u32) -> Self {
        let fee = capped_total(&intervals, max_daily_fee);
        Self {
            date,
            intervals,
            fee,
        }
    }

    /// A day on which nothing is charged.
    pub fn free(date: NaiveDate) -> Self {
        Self {
            date,
            intervals: Vec::new(),
            fee: 0,
        }
    }
}

/// Sweep `(timestamp, fee)` pairs into charged intervals.
///
/// `passages` must be sorted by timestamp.
pub fn charge_intervals(
    window: Duration,
    passages: &[(NaiveDateTime, u32)],
) -> Vec<ChargedInterval> {
    debug_assert!(passages.windows(2).all(|w| w[0].0 <= w[1].0));

    let mut intervals: Vec<ChargedInterval> = Vec::new();

    for &(at, fee) in passages {
        match intervals.last_mut() {
            Some(current) if at - current.start <= window => {
                current.passages += 1;
                current.fee = current.fee.max(fee);
            }
            _ => intervals.push(ChargedInterval {
                start: at,
                passages: 1,
                fee,
            }),
        }
    }

    intervals
}

/// Sum interval fees and clamp to `max_daily_fee`.
pub fn capped_total(intervals: &[ChargedInterval], max_daily_fee: u32) -> u32 {
    intervals
        .iter()
        .fold(0u32, |total, interval| total.saturating_add(interval.fee))
        .min(max_daily_fee)
}

/// Total charge for one day of sorted, already-priced passages.
pub fn aggregate(schedule: &FeeSchedule, passages: &[(NaiveDateTime, u32)]) -> u32 {
    let intervals = charge_intervals(schedule.single_charge_window(), passages);
    capped_total(&intervals, schedule.max_daily_fee)
}
