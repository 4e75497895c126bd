//! Holidays API client.
//!
//! Queries `GET {base}/holidays?year=Y&weekends=false`, which answers with
//! a JSON array of `{"date": ..., "name": {"en": ..., "sv": ...}}`.

use std::sync::Arc;

use chrono::Datelike;
use tokio::sync::Semaphore;

use super::error::HolidayError;
use super::provider::HolidayProvider;
use super::types::{HolidayDto, HolidayRecord};

/// Default base URL for the holidays API.
pub const DEFAULT_BASE_URL: &str = "https://api.dagsmart.se";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the holidays API client.
#[derive(Debug, Clone)]
pub struct HolidayApiConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
}

impl HolidayApiConfig {
    /// Create a new config pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }
}

impl Default for HolidayApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the remote holidays API.
#[derive(Debug, Clone)]
pub struct HolidayApiClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl HolidayApiClient {
    /// Create a new holidays API client.
    pub fn new(config: HolidayApiConfig) -> Result<Self, HolidayError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Fetch holidays for one year.
    ///
    /// Weekends are excluded server-side; the calculator checks those itself.
    /// Records dated outside `year` are dropped.
    pub async fn fetch_year(&self, year: i32) -> Result<Vec<HolidayRecord>, HolidayError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| HolidayError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/holidays", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("year", year.to_string()), ("weekends", "false".to_string())])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HolidayError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        if body.trim().is_empty() {
            return Err(HolidayError::EmptyResponse);
        }

        let dtos: Vec<HolidayDto> = serde_json::from_str(&body).map_err(|e| HolidayError::Json {
            message: e.to_string(),
        })?;

        let records = dtos
            .into_iter()
            .map(HolidayDto::into_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records.into_iter().filter(|r| r.date.year() == year).collect())
    }
}

impl HolidayProvider for HolidayApiClient {
    fn name(&self) -> &'static str {
        "holidays API"
    }

    async fn holidays(&self, year: i32) -> Result<Vec<HolidayRecord>, HolidayError> {
        self.fetch_year(year).await
    }
}
