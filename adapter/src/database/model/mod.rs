use std::str::FromStr;

use kernel::model::booking::BookingStatus;
use shared::error::{AppError, AppResult};

pub mod booking;
pub mod history;
pub mod notification;

// Statuses are stored as their lowercase names.
fn parse_status(value: &str) -> AppResult<BookingStatus> {
    BookingStatus::from_str(value)
        .map_err(|_| AppError::ConversionEntityError(format!("unknown booking status: {value}")))
}
