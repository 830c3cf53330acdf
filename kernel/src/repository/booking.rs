use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBookingStatus},
        Booking, BookingPeriod,
    },
    id::{BookingId, SpaceId, UserId},
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts a `pending` booking together with its initial history record
    /// in a single unit of work.
    async fn create(&self, event: CreateBooking) -> AppResult<Booking>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    async fn find_by_tenant_id(&self, tenant_id: UserId) -> AppResult<Vec<Booking>>;
    /// Bookings on every space owned by `owner_id`.
    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Booking>>;
    /// Applies the status change only while the booking is still in
    /// `event.expected` and appends the history record in the same unit of
    /// work. Fails with `WrongStatus` when the booking moved on in between.
    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<()>;
    /// Whether an `approved` booking on `space_id` intersects `period`,
    /// ignoring `exclude` when given.
    async fn has_approved_overlap(
        &self,
        space_id: SpaceId,
        period: BookingPeriod,
        exclude: Option<BookingId>,
    ) -> AppResult<bool>;
}
