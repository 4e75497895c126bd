//! Public holiday resolution.
//!
//! Holidays come from three tiers: locally computed Swedish holiday rules,
//! the remote holidays API, and a fixed-date fallback table. The
//! [`HolidayResolver`] walks them in that order and caches the result per
//! year, so a fee calculation never fails or blocks indefinitely because a
//! remote service is unavailable.

mod client;
mod error;
mod fallback;
mod provider;
mod resolver;
mod rules;
mod types;

pub use client::{DEFAULT_BASE_URL, HolidayApiClient, HolidayApiConfig};
pub use error::HolidayError;
pub use fallback::fallback_holidays;
pub use provider::HolidayProvider;
pub use resolver::{DefaultHolidayResolver, HolidayResolver, ResolverConfig};
pub use rules::{SwedishHolidayRules, easter_sunday};
pub use types::{HolidayDto, HolidayLookup, HolidayName, HolidayRecord, HolidaySource};
