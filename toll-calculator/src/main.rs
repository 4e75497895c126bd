use std::net::SocketAddr;
use std::time::Duration;

use toll_calculator::holidays::{DefaultHolidayResolver, HolidayApiConfig, ResolverConfig};
use toll_calculator::schedule::FeeSchedule;
use toll_calculator::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Holidays API location and per-tier timeout
    let mut api_config = HolidayApiConfig::new();
    if let Ok(url) = std::env::var("HOLIDAY_API_URL") {
        api_config = api_config.with_base_url(url);
    }

    let mut resolver_config = ResolverConfig::new();
    if let Ok(secs) = std::env::var("HOLIDAY_TIMEOUT_SECS") {
        match secs.parse::<u64>() {
            Ok(secs) => resolver_config = resolver_config.with_timeout(Duration::from_secs(secs)),
            Err(_) => warn!(value = %secs, "Ignoring invalid HOLIDAY_TIMEOUT_SECS"),
        }
    }

    let addr: SocketAddr = match std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
    {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Invalid BIND_ADDR");
            std::process::exit(1);
        }
    };

    let resolver = match DefaultHolidayResolver::standard(api_config.clone(), resolver_config) {
        Ok(resolver) => resolver,
        Err(e) => {
            error!(error = %e, "Failed to create holidays client");
            std::process::exit(1);
        }
    };

    let state = AppState::new(resolver, FeeSchedule::standard());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(%addr, holidays_api = %api_config.base_url, "Toll calculator listening");
    info!("  GET  /health          - Health check");
    info!("  POST /fees            - Fees per day for any number of days");
    info!("  POST /fees/daily      - Fee for a single day");
    info!("  GET  /holidays/:year  - Public holidays for a year");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
