//! Toll fee calculation over one or many days.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use futures::future::join_all;
use tracing::debug;

use crate::domain::{TollError, Vehicle};
use crate::holidays::DefaultHolidayResolver;
use crate::policy::{HolidayCalendar, TollFreePolicy};
use crate::schedule::FeeSchedule;

use super::aggregate::{DailyCharge, charge_intervals};

/// Calculator wired with the production holiday resolver.
pub type DefaultTollCalculator = TollCalculator<DefaultHolidayResolver>;

/// Check that `passages` is non-empty and confined to one date.
fn single_day(passages: &[NaiveDateTime]) -> Result<NaiveDate, TollError> {
    let first = passages.first().ok_or(TollError::InvalidPassages)?.date();

    match passages.iter().map(NaiveDateTime::date).find(|d| *d != first) {
        Some(other) => Err(TollError::MultipleDays { first, other }),
        None => Ok(first),
    }
}

/// Computes toll fees for a vehicle's passages.
pub struct TollCalculator<C> {
    schedule: Arc<FeeSchedule>,
    policy: TollFreePolicy<C>,
}

impl<C: HolidayCalendar> TollCalculator<C> {
    /// Create a calculator using `calendar` for holiday lookups.
    pub fn new(calendar: Arc<C>, schedule: FeeSchedule) -> Self {
        let schedule = Arc::new(schedule);
        Self {
            policy: TollFreePolicy::new(calendar, schedule.clone()),
            schedule,
        }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    pub fn policy(&self) -> &TollFreePolicy<C> {
        &self.policy
    }

    /// Total fee for one day.
    ///
    /// Fails with [`TollError::InvalidPassages`] if `passages` is empty and
    /// [`TollError::MultipleDays`] if it spans more than one date, even for
    /// exempt vehicles.
    pub async fn daily_fee<V: Vehicle + ?Sized>(
        &self,
        vehicle: &V,
        passages: &[NaiveDateTime],
    ) -> Result<u32, TollError> {
        Ok(self.daily_charge(vehicle, passages).await?.fee)
    }

    /// One day's charge with its interval breakdown.
    pub async fn daily_charge<V: Vehicle + ?Sized>(
        &self,
        vehicle: &V,
        passages: &[NaiveDateTime],
    ) -> Result<DailyCharge, TollError> {
        let date = single_day(passages)?;

        if self.policy.is_toll_free_vehicle(vehicle) {
            return Ok(DailyCharge::free(date));
        }

        let mut sorted = passages.to_vec();
        sorted.sort_unstable();

        let mut priced = Vec::with_capacity(sorted.len());
        for at in sorted {
            priced.push((at, self.passage_fee(vehicle, at).await?));
        }

        let intervals = charge_intervals(self.schedule.single_charge_window(), &priced);
        let charge = DailyCharge::new(date, intervals, self.schedule.max_daily_fee);

        debug!(
            %date,
            vehicle = %vehicle.kind(),
            passages = passages.len(),
            intervals = charge.intervals.len(),
            fee = charge.fee,
            "Calculated daily fee"
        );

        Ok(charge)
    }

    /// Fees per date for passages spanning any number of days.
    pub async fn fees<V: Vehicle + ?Sized>(
        &self,
        vehicle: &V,
        passages: &[NaiveDateTime],
    ) -> Result<BTreeMap<NaiveDate, u32>, TollError> {
        Ok(self
            .passage_breakdown(vehicle, passages)
            .await?
            .into_iter()
            .map(|charge| (charge.date, charge.fee))
            .collect())
    }

    /// Per-day charges, in date order.
    ///
    /// Toll-free dates are reported as free without running the interval
    /// sweep. All distinct dates are classified up front, concurrently.
    pub async fn passage_breakdown<V: Vehicle + ?Sized>(
        &self,
        vehicle: &V,
        passages: &[NaiveDateTime],
    ) -> Result<Vec<DailyCharge>, TollError> {
        if passages.is_empty() {
            return Err(TollError::InvalidPassages);
        }

        let mut by_date: BTreeMap<NaiveDate, Vec<NaiveDateTime>> = BTreeMap::new();
        for &at in passages {
            by_date.entry(at.date()).or_default().push(at);
        }

        let toll_free = join_all(
            by_date
                .keys()
                .map(|date| self.policy.is_toll_free_date(*date)),
        )
        .await;

        let mut charges = Vec::with_capacity(by_date.len());
        for ((date, day), toll_free) in by_date.into_iter().zip(toll_free) {
            if toll_free? {
                charges.push(DailyCharge::free(date));
                continue;
            }
            charges.push(self.daily_charge(vehicle, &day).await?);
        }

        Ok(charges)
    }

    /// Fee for a single passage, ignoring other passages that day.
    async fn passage_fee<V: Vehicle + ?Sized>(
        &self,
        vehicle: &V,
        at: NaiveDateTime,
    ) -> Result<u32, TollError> {
        if self.policy.is_exempt(at.date(), vehicle).await? {
            return Ok(0);
        }
        Ok(self.schedule.fee_for(at.time()))
    }
}
