//! Application state for the web layer.

use std::sync::Arc;

use crate::fees::DefaultTollCalculator;
use crate::holidays::DefaultHolidayResolver;
use crate::schedule::FeeSchedule;

/// Shared application state.
///
/// One calculator (and so one set of caches) serves every request.
#[derive(Clone)]
pub struct AppState {
    /// Holiday resolver, shared with the calculator
    pub holidays: Arc<DefaultHolidayResolver>,

    /// Toll fee calculator
    pub calculator: Arc<DefaultTollCalculator>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(holidays: DefaultHolidayResolver, schedule: FeeSchedule) -> Self {
        let holidays = Arc::new(holidays);
        let calculator = DefaultTollCalculator::new(holidays.clone(), schedule);
        Self {
            holidays,
            calculator: Arc::new(calculator),
        }
    }
}
