//! Web layer for the toll calculator.
//!
//! Provides HTTP endpoints for calculating fees and listing holidays.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
