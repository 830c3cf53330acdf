use std::sync::Arc;

use shared::error::{AppError, AppResult};
use tracing::info;

use super::lock::SpaceLocks;
use crate::{
    clock::Clock,
    event::{BookingEvent, BookingEventKind, BookingEventPublisher},
    model::{
        booking::{
            event::{CreateBooking, UpdateBookingStatus},
            Booking, BookingAction, BookingPeriod, BookingStatus,
        },
        history::BookingStatusHistory,
        id::{BookingId, SpaceId, UserId},
        role::Role,
    },
    repository::{
        booking::BookingRepository, history::BookingHistoryRepository, space::SpaceRepository,
    },
};

/// Orchestrates every booking state change.
///
/// Holds no state of its own beyond the per-space locks. Each transition is
/// persisted (status and history together) before its event is published,
/// and transitions on one space publish in the order they committed.
pub struct BookingLifecycle {
    bookings: Arc<dyn BookingRepository>,
    spaces: Arc<dyn SpaceRepository>,
    history: Arc<dyn BookingHistoryRepository>,
    events: BookingEventPublisher,
    clock: Arc<dyn Clock>,
    space_locks: SpaceLocks,
}

impl BookingLifecycle {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        spaces: Arc<dyn SpaceRepository>,
        history: Arc<dyn BookingHistoryRepository>,
        events: BookingEventPublisher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            spaces,
            history,
            events,
            clock,
            space_locks: SpaceLocks::default(),
        }
    }

    pub async fn create_booking(
        &self,
        tenant_id: UserId,
        space_id: SpaceId,
        date_from: &str,
        date_to: &str,
    ) -> AppResult<Booking> {
        let period = BookingPeriod::parse(date_from, date_to)?;
        let _guard = self.space_locks.acquire(space_id).await;

        // Pending requests may overlap each other; only approved ones block.
        if self
            .bookings
            .has_approved_overlap(space_id, period, None)
            .await?
        {
            return Err(AppError::OverlappingBooking(format!(
                "space {space_id} is already booked between {} and {}",
                period.date_from(),
                period.date_to()
            )));
        }

        let booking = self
            .bookings
            .create(CreateBooking::new(space_id, tenant_id, period))
            .await?;
        info!(
            booking_id = %booking.booking_id,
            %space_id,
            %tenant_id,
            "booking created"
        );

        self.publish(BookingEventKind::Created, &booking).await;
        Ok(booking)
    }

    pub async fn cancel_booking(
        &self,
        booking_id: BookingId,
        tenant_id: UserId,
        reason: Option<String>,
    ) -> AppResult<()> {
        self.transition(booking_id, tenant_id, BookingAction::Cancel, reason)
            .await
    }

    pub async fn approve_booking(
        &self,
        booking_id: BookingId,
        owner_id: UserId,
        reason: Option<String>,
    ) -> AppResult<()> {
        self.transition(booking_id, owner_id, BookingAction::Approve, reason)
            .await
    }

    pub async fn reject_booking(
        &self,
        booking_id: BookingId,
        owner_id: UserId,
        reason: Option<String>,
    ) -> AppResult<()> {
        self.transition(booking_id, owner_id, BookingAction::Reject, reason)
            .await
    }

    pub async fn list_tenant_bookings(&self, tenant_id: UserId) -> AppResult<Vec<Booking>> {
        self.bookings.find_by_tenant_id(tenant_id).await
    }

    pub async fn list_owner_bookings(&self, owner_id: UserId) -> AppResult<Vec<Booking>> {
        self.bookings.find_by_owner_id(owner_id).await
    }

    /// Status history of a booking, oldest first. Tenants see their own
    /// bookings, owners the bookings on their spaces.
    pub async fn get_booking_history(
        &self,
        booking_id: BookingId,
        requester_id: UserId,
        requester_role: Role,
    ) -> AppResult<Vec<BookingStatusHistory>> {
        let booking = self.find_booking(booking_id).await?;
        self.authorize(&booking, requester_id, requester_role)
            .await?;
        self.history.find_by_booking_id(booking_id).await
    }

    async fn transition(
        &self,
        booking_id: BookingId,
        actor_id: UserId,
        action: BookingAction,
        reason: Option<String>,
    ) -> AppResult<()> {
        let booking = self.find_booking(booking_id).await?;
        self.authorize(&booking, actor_id, action.actor_role())
            .await?;

        if action.requires_not_started() && booking.period.has_started(self.clock.now()) {
            return Err(AppError::AlreadyStarted(format!(
                "booking {booking_id} started on {} and can no longer be {}",
                booking.period.date_from(),
                action.past_tense()
            )));
        }

        let next = next_status(&booking, action)?;

        // Held across the overlap check, the write and the publish, so
        // approvals on a space are exclusive and events leave in commit order.
        let _guard = self.space_locks.acquire(booking.space_id).await;
        if next == BookingStatus::Approved
            && self
                .bookings
                .has_approved_overlap(booking.space_id, booking.period, Some(booking_id))
                .await?
        {
            return Err(AppError::OverlappingBooking(format!(
                "booking {booking_id} overlaps an approved booking on space {}",
                booking.space_id
            )));
        }

        self.bookings
            .update_status(UpdateBookingStatus::new(
                booking_id,
                booking.space_id,
                booking.status,
                next,
                actor_id,
                reason,
            ))
            .await?;

        info!(
            %booking_id,
            space_id = %booking.space_id,
            %actor_id,
            from = %booking.status,
            to = %next,
            "booking status changed"
        );

        self.publish(action.into(), &booking).await;
        Ok(())
    }

    async fn find_booking(&self, booking_id: BookingId) -> AppResult<Booking> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("booking {booking_id} not found")))
    }

    /// Role-keyed check of the caller's relationship to the booking.
    async fn authorize(&self, booking: &Booking, user_id: UserId, role: Role) -> AppResult<()> {
        let permitted = match role {
            Role::Tenant => booking.tenant_id == user_id,
            Role::Owner => self.space_owner(booking.space_id).await? == user_id,
        };
        if permitted {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation(format!(
                "user {user_id} has no {role} rights over booking {}",
                booking.booking_id
            )))
        }
    }

    async fn space_owner(&self, space_id: SpaceId) -> AppResult<UserId> {
        self.spaces
            .find_owner(space_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("space {space_id} not found")))
    }

    async fn publish(&self, kind: BookingEventKind, booking: &Booking) {
        let event = BookingEvent::for_booking(kind, booking, self.clock.now());
        self.events.publish(event).await;
    }
}

fn next_status(booking: &Booking, action: BookingAction) -> AppResult<BookingStatus> {
    action.next_status(booking.status).ok_or_else(|| {
        AppError::WrongStatus(format!(
            "booking {} cannot be {} while {}",
            booking.booking_id,
            action.past_tense(),
            booking.status
        ))
    })
}
