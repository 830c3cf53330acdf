use derive_new::new;

use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBookingStatus},
        BookingStatus,
    },
    id::{BookingId, UserId},
};

#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct RecordTransition {
    pub booking_id: BookingId,
    pub old_status: Option<BookingStatus>,
    pub new_status: BookingStatus,
    pub changed_by: UserId,
    pub reason: Option<String>,
}

impl RecordTransition {
    pub fn initial(booking_id: BookingId, event: &CreateBooking) -> Self {
        Self::new(
            booking_id,
            None,
            BookingStatus::Pending,
            event.tenant_id,
            None,
        )
    }
}

impl From<&UpdateBookingStatus> for RecordTransition {
    fn from(event: &UpdateBookingStatus) -> Self {
        Self::new(
            event.booking_id,
            Some(event.expected),
            event.status,
            event.changed_by,
            event.reason.clone(),
        )
    }
}
