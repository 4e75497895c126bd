//! Last-resort holiday table.
//!
//! Only fixed-date national holidays, so it can be produced for any year
//! without computation and is never empty.

use chrono::NaiveDate;

use super::types::{HolidayName, HolidayRecord};

const FIXED_HOLIDAYS: [(u32, u32, &str, &str); 8] = [
    (1, 1, "New Year's Day", "Nyårsdagen"),
    (1, 6, "Epiphany", "Trettondedag jul"),
    (5, 1, "May Day", "Första maj"),
    (6, 6, "National Day of Sweden", "Sveriges nationaldag"),
    (12, 24, "Christmas Eve", "Julafton"),
    (12, 25, "Christmas Day", "Juldagen"),
    (12, 26, "Boxing Day", "Annandag jul"),
    (12, 31, "New Year's Eve", "Nyårsafton"),
];

/// Fixed-date holidays for `year`.
pub fn fallback_holidays(year: i32) -> Vec<HolidayRecord> {
    FIXED_HOLIDAYS
        .iter()
        .filter_map(|&(month, day, en, sv)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|date| HolidayRecord::new(date, HolidayName::new(en, sv)))
        })
        .collect()
}
