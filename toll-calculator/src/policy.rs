//! Toll-free rules: weekends, toll-free months, public holidays and
//! exempt vehicle kinds.

use std::future::Future;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Vehicle, YearOutOfRange};
use crate::holidays::{HolidayProvider, HolidayResolver};
use crate::schedule::FeeSchedule;

/// Answers whether a date is a public holiday.
///
/// This abstraction allows the policy to be tested without a resolver.
pub trait HolidayCalendar: Send + Sync {
    fn is_holiday(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<bool, YearOutOfRange>> + Send;
}

impl<L: HolidayProvider, R: HolidayProvider> HolidayCalendar for HolidayResolver<L, R> {
    async fn is_holiday(&self, date: NaiveDate) -> Result<bool, YearOutOfRange> {
        HolidayResolver::is_holiday(self, date).await
    }
}

/// Whether `date` is a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Decides whether a date or a vehicle is exempt from tolls.
///
/// Date results are memoised for the lifetime of the policy; the cache is
/// never invalidated.
pub struct TollFreePolicy<C> {
    calendar: Arc<C>,
    schedule: Arc<FeeSchedule>,
    toll_free_dates: MokaCache<NaiveDate, bool>,
}

impl<C: HolidayCalendar> TollFreePolicy<C> {
    /// Create a new policy.
    pub fn new(calendar: Arc<C>, schedule: Arc<FeeSchedule>) -> Self {
        Self {
            calendar,
            schedule,
            toll_free_dates: MokaCache::builder().build(),
        }
    }

    /// The holiday calendar backing this policy.
    pub fn calendar(&self) -> &Arc<C> {
        &self.calendar
    }

    /// Whether no tolls are charged on `date` for any vehicle.
    ///
    /// Weekends and toll-free months are decided without consulting the
    /// holiday calendar, so they never fail.
    pub async fn is_toll_free_date(&self, date: NaiveDate) -> Result<bool, YearOutOfRange> {
        if let Some(cached) = self.toll_free_dates.get(&date).await {
            return Ok(cached);
        }

        let toll_free = is_weekend(date)
            || self.schedule.is_toll_free_month(date)
            || self.calendar.is_holiday(date).await?;

        trace!(%date, toll_free, "Classified date");
        self.toll_free_dates.insert(date, toll_free).await;
        Ok(toll_free)
    }

    /// Whether `vehicle` never pays tolls.
    pub fn is_toll_free_vehicle<V: Vehicle + ?Sized>(&self, vehicle: &V) -> bool {
        vehicle.kind().is_toll_free()
    }

    /// Whether `vehicle` passing on `date` is exempt.
    pub async fn is_exempt<V: Vehicle + ?Sized>(
        &self,
        date: NaiveDate,
        vehicle: &V,
    ) -> Result<bool, YearOutOfRange> {
        if self.is_toll_free_vehicle(vehicle) {
            return Ok(true);
        }
        self.is_toll_free_date(date).await
    }

    /// Number of dates currently memoised.
    pub async fn cached_dates(&self) -> u64 {
        self.toll_free_dates.run_pending_tasks().await;
        self.toll_free_dates.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::domain::VehicleKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Calendar with a fixed holiday list that counts lookups.
    struct MockCalendar {
        holidays: Vec<NaiveDate>,
        latest: i32,
        call_count: Mutex<usize>,
    }

    impl MockCalendar {
        fn new(holidays: Vec<NaiveDate>) -> Self {
            Self {
                holidays,
                latest: 2026,
                call_count: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    impl HolidayCalendar for MockCalendar {
        async fn is_holiday(&self, date: NaiveDate) -> Result<bool, YearOutOfRange> {
            *self.call_count.lock().unwrap() += 1;
            if date.year() > self.latest {
                return Err(YearOutOfRange {
                    year: date.year(),
                    latest: self.latest,
                });
            }
            Ok(self.holidays.contains(&date))
        }
    }

    fn policy(holidays: Vec<NaiveDate>) -> TollFreePolicy<MockCalendar> {
        TollFreePolicy::new(
            Arc::new(MockCalendar::new(holidays)),
            Arc::new(FeeSchedule::standard()),
        )
    }

    #[test]
    fn weekend_detection() {
        assert!(is_weekend(date(2013, 5, 18)));
        assert!(is_weekend(date(2013, 5, 19)));
        assert!(!is_weekend(date(2013, 5, 17)));
        assert!(!is_weekend(date(2013, 5, 20)));
    }

    #[tokio::test]
    async fn weekends_are_free_without_holiday_lookup() {
        let policy = policy(vec![]);
        assert!(policy.is_toll_free_date(date(2013, 5, 18)).await.unwrap());
        assert!(policy.is_toll_free_date(date(2013, 5, 19)).await.unwrap());
        assert_eq!(policy.calendar().calls(), 0);
    }

    #[tokio::test]
    async fn july_is_free() {
        let policy = policy(vec![]);
        assert!(policy.is_toll_free_date(date(2013, 7, 1)).await.unwrap());
        assert!(policy.is_toll_free_date(date(2013, 7, 31)).await.unwrap());
        assert_eq!(policy.calendar().calls(), 0);
    }

    #[tokio::test]
    async fn holidays_are_free() {
        let policy = policy(vec![date(2013, 5, 1)]);
        assert!(policy.is_toll_free_date(date(2013, 5, 1)).await.unwrap());
        assert!(!policy.is_toll_free_date(date(2013, 5, 15)).await.unwrap());
    }

    #[tokio::test]
    async fn date_results_are_memoised() {
        let policy = policy(vec![date(2013, 5, 1)]);
        for _ in 0..5 {
            assert!(!policy.is_toll_free_date(date(2013, 5, 15)).await.unwrap());
            assert!(policy.is_toll_free_date(date(2013, 5, 1)).await.unwrap());
        }
        assert_eq!(policy.calendar().calls(), 2);
        assert_eq!(policy.cached_dates().await, 2);
    }

    #[tokio::test]
    async fn future_weekday_fails_but_future_weekend_does_not() {
        let policy = policy(vec![]);
        // 2027-01-04 is a Monday, 2027-01-02 a Saturday
        let err = policy
            .is_toll_free_date(date(2027, 1, 4))
            .await
            .unwrap_err();
        assert_eq!(err.year, 2027);
        assert!(policy.is_toll_free_date(date(2027, 1, 2)).await.unwrap());
    }

    #[tokio::test]
    async fn exempt_vehicles() {
        let policy = policy(vec![]);
        let weekday = date(2013, 5, 15);
        for kind in VehicleKind::TOLL_FREE {
            assert!(policy.is_toll_free_vehicle(&kind));
            assert!(policy.is_exempt(weekday, &kind).await.unwrap());
        }
        assert!(!policy.is_exempt(weekday, &VehicleKind::Car).await.unwrap());
        assert!(!policy.is_exempt(weekday, &VehicleKind::Bus).await.unwrap());
        assert!(policy.is_exempt(date(2013, 5, 18), &VehicleKind::Car).await.unwrap());
    }

    #[tokio::test]
    async fn resolver_backed_policy() {
        use crate::holidays::{HolidayError, HolidayRecord, ResolverConfig, SwedishHolidayRules};

        struct Unreachable;
        impl HolidayProvider for Unreachable {
            fn name(&self) -> &'static str {
                "unreachable"
            }
            async fn holidays(&self, _year: i32) -> Result<Vec<HolidayRecord>, HolidayError> {
                Err(HolidayError::EmptyResponse)
            }
        }

        let resolver = HolidayResolver::new(
            SwedishHolidayRules::new(),
            Unreachable,
            ResolverConfig::new().with_latest_year(2026),
        );
        let policy = TollFreePolicy::new(Arc::new(resolver), Arc::new(FeeSchedule::standard()));

        // Ascension Day 2013
        assert!(policy.is_toll_free_date(date(2013, 5, 9)).await.unwrap());
        assert!(!policy.is_toll_free_date(date(2013, 5, 8)).await.unwrap());
    }
}
