//! Booking lifecycle events and the in-process pipeline that turns them into
//! tenant notifications.
//!
//! ```text
//! BookingLifecycle --publish--> [bounded queue] --recv--> NotificationDispatcher
//!                                                              └─► NotificationRepository
//! ```

use chrono::{DateTime, Utc};
use derive_new::new;
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::model::{
    booking::{Booking, BookingAction},
    id::{BookingId, SpaceId, UserId},
    notification::event::CreateNotification,
};

pub mod dispatcher;
pub mod queue;

pub use dispatcher::NotificationDispatcher;
pub use queue::{channel, BookingEventPublisher, BookingEventReceiver, Delivery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingEventKind {
    Created,
    Approved,
    Rejected,
    Cancelled,
}

impl From<BookingAction> for BookingEventKind {
    fn from(action: BookingAction) -> Self {
        match action {
            BookingAction::Approve => BookingEventKind::Approved,
            BookingAction::Reject => BookingEventKind::Rejected,
            BookingAction::Cancel => BookingEventKind::Cancelled,
        }
    }
}

/// Emitted once per committed transition. Never persisted itself.
#[derive(new, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingEvent {
    pub kind: BookingEventKind,
    pub booking_id: BookingId,
    pub space_id: SpaceId,
    pub tenant_id: UserId,
    pub at: DateTime<Utc>,
}

impl BookingEvent {
    pub fn for_booking(kind: BookingEventKind, booking: &Booking, at: DateTime<Utc>) -> Self {
        Self::new(kind, booking.booking_id, booking.space_id, booking.tenant_id, at)
    }

    pub fn message(&self) -> String {
        format!("Your booking #{} was {}.", self.booking_id, self.kind)
    }
}

impl From<&BookingEvent> for CreateNotification {
    fn from(event: &BookingEvent) -> Self {
        CreateNotification::new(event.tenant_id, event.kind.to_string(), event.message())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn notification_is_addressed_to_the_tenant() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let event = BookingEvent::new(
            BookingEventKind::Approved,
            BookingId::from(7),
            SpaceId::from(1),
            UserId::from(42),
            at,
        );

        let notification = CreateNotification::from(&event);
        assert_eq!(notification.user_id, UserId::from(42));
        assert_eq!(notification.kind, "approved");
        assert_eq!(notification.message, "Your booking #7 was approved.");
    }

    #[test]
    fn each_kind_has_its_own_message() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let messages: Vec<String> = [
            BookingEventKind::Created,
            BookingEventKind::Approved,
            BookingEventKind::Rejected,
            BookingEventKind::Cancelled,
        ]
        .into_iter()
        .map(|kind| {
            BookingEvent::new(kind, BookingId::from(3), SpaceId::from(1), UserId::from(2), at)
                .message()
        })
        .collect();

        assert_eq!(
            messages,
            [
                "Your booking #3 was created.",
                "Your booking #3 was approved.",
                "Your booking #3 was rejected.",
                "Your booking #3 was cancelled.",
            ]
        );
    }
}
