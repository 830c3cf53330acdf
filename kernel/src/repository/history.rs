use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    history::{event::RecordTransition, BookingStatusHistory},
    id::BookingId,
};

/// The append-only audit trail. Rows are never updated or deleted.
#[async_trait]
pub trait BookingHistoryRepository: Send + Sync {
    /// Standalone append. Booking stores write the history of their own
    /// creates and status changes inside the same transaction instead.
    async fn record_transition(&self, event: RecordTransition) -> AppResult<BookingStatusHistory>;
    /// Oldest first.
    async fn find_by_booking_id(&self, booking_id: BookingId)
        -> AppResult<Vec<BookingStatusHistory>>;
}
