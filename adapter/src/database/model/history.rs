use chrono::{DateTime, Utc};
use kernel::model::{
    history::BookingStatusHistory,
    id::{BookingId, HistoryId, UserId},
};
use shared::error::{AppError, AppResult};

use super::parse_status;

#[derive(sqlx::FromRow)]
pub struct BookingStatusHistoryRow {
    pub history_id: HistoryId,
    pub booking_id: BookingId,
    pub old_status: Option<String>,
    pub new_status: String,
    pub changed_by: UserId,
    pub reason: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl TryFrom<BookingStatusHistoryRow> for BookingStatusHistory {
    type Error = AppError;

    fn try_from(value: BookingStatusHistoryRow) -> AppResult<Self> {
        Ok(BookingStatusHistory {
            history_id: value.history_id,
            booking_id: value.booking_id,
            old_status: value.old_status.as_deref().map(parse_status).transpose()?,
            new_status: parse_status(&value.new_status)?,
            changed_by: value.changed_by,
            reason: value.reason,
            changed_at: value.changed_at,
        })
    }
}
