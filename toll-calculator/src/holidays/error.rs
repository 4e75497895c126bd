//! Holiday source error types.
//!
//! These describe why a single holiday tier produced nothing. The resolver
//! logs them and moves on to the next tier; they are never returned from a
//! fee calculation.

use std::time::Duration;

/// Errors from a holiday source.
#[derive(Debug, thiserror::Error)]
pub enum HolidayError {
    /// HTTP request failed (connection refused, DNS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be parsed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response body was empty
    #[error("empty response from holidays API")]
    EmptyResponse,

    /// Source did not answer in time
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}
