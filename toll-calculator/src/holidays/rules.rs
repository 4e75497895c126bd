//! Swedish public holidays computed locally.
//!
//! Fixed-date holidays plus the movable ones: the Easter cycle (Good
//! Friday through Whit Sunday), Midsummer and All Saints' Day. De facto
//! holidays (Midsummer Eve, Christmas Eve, New Year's Eve) are included
//! because toll stations treat them as holidays too.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::error::HolidayError;
use super::provider::HolidayProvider;
use super::types::{HolidayName, HolidayRecord};

/// Gregorian Easter Sunday (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// First `weekday` on or after `month`/`day`.
fn weekday_on_or_after(year: i32, month: u32, day: u32, weekday: Weekday) -> Option<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(year, month, day)?;
    let offset = (7 + weekday.num_days_from_monday() - start.weekday().num_days_from_monday()) % 7;
    Some(start + Duration::days(i64::from(offset)))
}

/// Local holiday rules for Sweden.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwedishHolidayRules;

impl SwedishHolidayRules {
    pub fn new() -> Self {
        Self
    }

    /// All holidays in `year`, in calendar order.
    ///
    /// Returns an empty list only if `year` is outside chrono's date range.
    pub fn holidays_in(&self, year: i32) -> Vec<HolidayRecord> {
        let fixed = |m: u32, d: u32| NaiveDate::from_ymd_opt(year, m, d);
        let easter = easter_sunday(year);
        let from_easter = |days: i64| easter.map(|e| e + Duration::days(days));
        let midsummer_day = weekday_on_or_after(year, 6, 20, Weekday::Sat);

        let entries = [
            (fixed(1, 1), "New Year's Day", "Nyårsdagen"),
            (fixed(1, 6), "Epiphany", "Trettondedag jul"),
            (from_easter(-2), "Good Friday", "Långfredagen"),
            (easter, "Easter Sunday", "Påskdagen"),
            (from_easter(1), "Easter Monday", "Annandag påsk"),
            (fixed(5, 1), "May Day", "Första maj"),
            (from_easter(39), "Ascension Day", "Kristi himmelsfärdsdag"),
            (from_easter(49), "Whit Sunday", "Pingstdagen"),
            (fixed(6, 6), "National Day of Sweden", "Sveriges nationaldag"),
            (
                midsummer_day.map(|d| d - Duration::days(1)),
                "Midsummer Eve",
                "Midsommarafton",
            ),
            (midsummer_day, "Midsummer Day", "Midsommardagen"),
            (
                weekday_on_or_after(year, 10, 31, Weekday::Sat),
                "All Saints' Day",
                "Alla helgons dag",
            ),
            (fixed(12, 24), "Christmas Eve", "Julafton"),
            (fixed(12, 25), "Christmas Day", "Juldagen"),
            (fixed(12, 26), "Boxing Day", "Annandag jul"),
            (fixed(12, 31), "New Year's Eve", "Nyårsafton"),
        ];

        let mut holidays: Vec<HolidayRecord> = entries
            .into_iter()
            .filter_map(|(date, en, sv)| {
                date.map(|d| HolidayRecord::new(d, HolidayName::new(en, sv)))
            })
            .collect();
        holidays.sort_by_key(|h| h.date);
        holidays
    }
}

impl HolidayProvider for SwedishHolidayRules {
    fn name(&self) -> &'static str {
        "local rules"
    }

    async fn holidays(&self, year: i32) -> Result<Vec<HolidayRecord>, HolidayError> {
        Ok(self.holidays_in(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn easter_dates() {
        assert_eq!(easter_sunday(2013), Some(date(2013, 3, 31)));
        assert_eq!(easter_sunday(2019), Some(date(2019, 4, 21)));
        assert_eq!(easter_sunday(2024), Some(date(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(date(2025, 4, 20)));
        // Earliest and latest possible Easter
        assert_eq!(easter_sunday(1818), Some(date(1818, 3, 22)));
        assert_eq!(easter_sunday(1943), Some(date(1943, 4, 25)));
    }

    #[test]
    fn holidays_2013() {
        let dates: Vec<_> = SwedishHolidayRules::new()
            .holidays_in(2013)
            .into_iter()
            .map(|h| h.date)
            .collect();

        assert_eq!(
            dates,
            vec![
                date(2013, 1, 1),
                date(2013, 1, 6),
                date(2013, 3, 29),
                date(2013, 3, 31),
                date(2013, 4, 1),
                date(2013, 5, 1),
                date(2013, 5, 9),
                date(2013, 5, 19),
                date(2013, 6, 6),
                date(2013, 6, 21),
                date(2013, 6, 22),
                date(2013, 11, 2),
                date(2013, 12, 24),
                date(2013, 12, 25),
                date(2013, 12, 26),
                date(2013, 12, 31),
            ]
        );
    }

    #[test]
    fn midsummer_and_all_saints_fall_on_weekends() {
        let rules = SwedishHolidayRules::new();
        for year in 1990..2030 {
            let holidays = rules.holidays_in(year);
            let find = |sv: &str| {
                holidays
                    .iter()
                    .find(|h| h.name.sv == sv)
                    .map(|h| h.date)
                    .unwrap()
            };
            assert_eq!(find("Midsommarafton").weekday(), Weekday::Fri);
            assert_eq!(find("Midsommardagen").weekday(), Weekday::Sat);
            assert_eq!(find("Alla helgons dag").weekday(), Weekday::Sat);
            assert_eq!(find("Långfredagen").weekday(), Weekday::Fri);
            assert_eq!(find("Kristi himmelsfärdsdag").weekday(), Weekday::Thu);
        }
    }

    #[tokio::test]
    async fn provider_returns_rules() {
        let rules = SwedishHolidayRules::new();
        let holidays = rules.holidays(2025).await.unwrap();
        assert_eq!(holidays.len(), 16);
        assert!(holidays.iter().any(|h| h.date == date(2025, 6, 20)));
    }
}
