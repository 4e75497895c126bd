//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::warn;

use crate::domain::{TollError, YearOutOfRange};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/fees", post(calculate_fees))
        .route("/fees/daily", post(calculate_daily_fee))
        .route("/holidays/:year", get(list_holidays))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Fees per day for passages spanning any number of days.
async fn calculate_fees(
    State(state): State<AppState>,
    payload: Result<Json<FeeRequest>, JsonRejection>,
) -> Result<Json<FeesResponse>, AppError> {
    let Json(req) = payload?;
    let (vehicle, passages) = req.parse().map_err(|message| AppError::BadRequest { message })?;

    let charges = state.calculator.passage_breakdown(&vehicle, &passages).await?;

    Ok(Json(FeesResponse::new(vehicle, &charges)))
}

/// Fee for passages on a single day.
async fn calculate_daily_fee(
    State(state): State<AppState>,
    payload: Result<Json<FeeRequest>, JsonRejection>,
) -> Result<Json<DailyFeeResponse>, AppError> {
    let Json(req) = payload?;
    let (vehicle, passages) = req.parse().map_err(|message| AppError::BadRequest { message })?;

    let charge = state.calculator.daily_charge(&vehicle, &passages).await?;

    Ok(Json(DailyFeeResponse {
        date: charge.date.format("%Y-%m-%d").to_string(),
        fee: charge.fee,
    }))
}

/// Holidays for a year, with the tier that supplied them.
async fn list_holidays(
    State(state): State<AppState>,
    year: Result<Path<i32>, PathRejection>,
) -> Result<Json<HolidaysResponse>, AppError> {
    let Path(year) = year?;
    let lookup = state.holidays.holidays_for(year).await?;
    Ok(Json(HolidaysResponse::from(lookup.as_ref())))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unprocessable { message: String },
}

impl From<TollError> for AppError {
    fn from(e: TollError) -> Self {
        match e {
            TollError::OutOfRange(_) => AppError::Unprocessable {
                message: e.to_string(),
            },
            TollError::InvalidPassages | TollError::MultipleDays { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl From<YearOutOfRange> for AppError {
    fn from(e: YearOutOfRange) -> Self {
        AppError::Unprocessable {
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
        };

        warn!(status = status.as_u16(), %message, "Request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
