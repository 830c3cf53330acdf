use derive_new::new;

use crate::model::{
    booking::{BookingPeriod, BookingStatus},
    id::{BookingId, SpaceId, UserId},
};

#[derive(new, Debug, Clone)]
pub struct CreateBooking {
    pub space_id: SpaceId,
    pub tenant_id: UserId,
    pub period: BookingPeriod,
}

/// A compare-and-set status change. It only applies while the booking is
/// still in `expected`, and the history row travels with it.
#[derive(new, Debug, Clone)]
pub struct UpdateBookingStatus {
    pub booking_id: BookingId,
    pub space_id: SpaceId,
    pub expected: BookingStatus,
    pub status: BookingStatus,
    pub changed_by: UserId,
    pub reason: Option<String>,
}
