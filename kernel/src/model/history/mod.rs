use chrono::{DateTime, Utc};

use crate::model::{
    booking::BookingStatus,
    id::{BookingId, HistoryId, UserId},
};

pub mod event;

/// One row of the booking audit trail. `old_status` is `None` only for the
/// record written when the booking is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingStatusHistory {
    pub history_id: HistoryId,
    pub booking_id: BookingId,
    pub old_status: Option<BookingStatus>,
    pub new_status: BookingStatus,
    pub changed_by: UserId,
    pub reason: Option<String>,
    pub changed_at: DateTime<Utc>,
}
