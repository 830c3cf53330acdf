use chrono::{DateTime, Utc};
use kernel::model::{
    booking::BookingStatus,
    history::BookingStatusHistory,
    id::{BookingId, HistoryId, UserId},
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingHistoryResponse {
    pub items: Vec<BookingStatusHistoryResponse>,
}

impl From<Vec<BookingStatusHistory>> for BookingHistoryResponse {
    fn from(value: Vec<BookingStatusHistory>) -> Self {
        Self {
            items: value
                .into_iter()
                .map(BookingStatusHistoryResponse::from)
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusHistoryResponse {
    pub id: HistoryId,
    pub booking_id: BookingId,
    pub old_status: Option<BookingStatus>,
    pub new_status: BookingStatus,
    pub changed_by: UserId,
    pub reason: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl From<BookingStatusHistory> for BookingStatusHistoryResponse {
    fn from(value: BookingStatusHistory) -> Self {
        let BookingStatusHistory {
            history_id,
            booking_id,
            old_status,
            new_status,
            changed_by,
            reason,
            changed_at,
        } = value;
        Self {
            id: history_id,
            booking_id,
            old_status,
            new_status,
            changed_by,
            reason,
            changed_at,
        }
    }
}
