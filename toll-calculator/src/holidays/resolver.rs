//! Holiday resolution with caching and fallback.
//!
//! Each year is resolved once and then served from an in-memory cache for
//! the lifetime of the resolver. Cached entries never expire: holiday data
//! for a past or current year does not change while the process runs.
//!
//! Resolution tries, in order:
//! 1. local holiday rules,
//! 2. the remote holidays API,
//! 3. a fixed-date fallback table.
//!
//! The first two are bounded by a timeout; any failure, timeout, or empty
//! answer is logged and the next tier is tried. The fallback always
//! succeeds, so callers only ever see [`YearOutOfRange`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use moka::future::Cache as MokaCache;
use tracing::{debug, info, warn};

use crate::domain::YearOutOfRange;

use super::client::{HolidayApiClient, HolidayApiConfig};
use super::error::HolidayError;
use super::fallback::fallback_holidays;
use super::provider::HolidayProvider;
use super::rules::SwedishHolidayRules;
use super::types::{HolidayLookup, HolidayRecord, HolidaySource};

/// Default timeout for each holiday tier.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the holiday resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Upper bound on how long each tier may take.
    pub timeout: Duration,

    /// Latest year that may be queried. `None` means the current local year.
    pub latest_year: Option<i32>,
}

impl ResolverConfig {
    /// Create a config with the default 5 second timeout.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            latest_year: None,
        }
    }

    /// Set the per-tier timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pin the latest queryable year instead of using the clock.
    pub fn with_latest_year(mut self, year: i32) -> Self {
        self.latest_year = Some(year);
        self
    }

    /// The latest queryable year.
    pub fn latest_year(&self) -> i32 {
        self.latest_year.unwrap_or_else(|| Local::now().year())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolver wired with the production tiers.
pub type DefaultHolidayResolver = HolidayResolver<SwedishHolidayRules, HolidayApiClient>;

/// Resolves public holidays per year through a cached tier chain.
pub struct HolidayResolver<L, R> {
    local: L,
    remote: R,
    /// Resolved years. Unbounded, no TTL.
    cache: MokaCache<i32, Arc<HolidayLookup>>,
    config: ResolverConfig,
}

impl DefaultHolidayResolver {
    /// Build a resolver using the Swedish rules and the holidays API.
    pub fn standard(
        api_config: HolidayApiConfig,
        config: ResolverConfig,
    ) -> Result<Self, HolidayError> {
        let remote = HolidayApiClient::new(api_config)?;
        Ok(Self::new(SwedishHolidayRules::new(), remote, config))
    }
}

impl<L: HolidayProvider, R: HolidayProvider> HolidayResolver<L, R> {
    /// Create a resolver over the given local and remote tiers.
    pub fn new(local: L, remote: R, config: ResolverConfig) -> Self {
        Self {
            local,
            remote,
            cache: MokaCache::builder().build(),
            config,
        }
    }

    /// Holidays for `year`.
    ///
    /// Concurrent first requests for the same year share one resolution.
    pub async fn holidays_for(&self, year: i32) -> Result<Arc<HolidayLookup>, YearOutOfRange> {
        let latest = self.config.latest_year();
        if year < 0 || year > latest {
            return Err(YearOutOfRange { year, latest });
        }

        Ok(self.cache.get_with(year, self.resolve(year)).await)
    }

    /// Whether `date` is a public holiday.
    pub async fn is_holiday(&self, date: NaiveDate) -> Result<bool, YearOutOfRange> {
        let lookup = self.holidays_for(date.year()).await?;
        Ok(lookup.contains(date))
    }

    /// Number of years currently cached.
    pub async fn cached_years(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    /// Walk the tier chain for a year that is not cached yet.
    async fn resolve(&self, year: i32) -> Arc<HolidayLookup> {
        let (source, holidays) = if let Some(holidays) = self.try_tier(&self.local, year).await {
            (HolidaySource::LocalRules, holidays)
        } else if let Some(holidays) = self.try_tier(&self.remote, year).await {
            (HolidaySource::Remote, holidays)
        } else {
            warn!(year, "Using fallback holidays");
            (HolidaySource::Fallback, fallback_holidays(year))
        };

        info!(year, ?source, count = holidays.len(), "Resolved holidays");

        Arc::new(HolidayLookup {
            year,
            source,
            holidays,
        })
    }

    /// Run one tier under the timeout. `None` means "try the next one".
    async fn try_tier<P: HolidayProvider>(
        &self,
        provider: &P,
        year: i32,
    ) -> Option<Vec<HolidayRecord>> {
        let result = match tokio::time::timeout(self.config.timeout, provider.holidays(year)).await
        {
            Ok(result) => result,
            Err(_) => Err(HolidayError::Timeout(self.config.timeout)),
        };

        match result {
            Ok(holidays) if !holidays.is_empty() => Some(holidays),
            Ok(_) => {
                debug!(source = provider.name(), year, "Holiday source returned no data");
                None
            }
            Err(e) => {
                warn!(
                    source = provider.name(),
                    year,
                    error = %e,
                    "Holiday source failed"
                );
                None
            }
        }
    }
}
