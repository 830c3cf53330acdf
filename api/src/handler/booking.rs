use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::BookingId, role::Role};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        booking::{BookingResponse, BookingTransitionRequest, BookingsResponse, CreateBookingRequest},
        history::BookingHistoryResponse,
    },
};

pub async fn create_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    user.require(Role::Tenant)?;
    req.validate()?;

    registry
        .booking_lifecycle()
        .create_booking(user.id(), req.space_id, &req.date_from, &req.date_to)
        .await
        .map(|booking| (StatusCode::CREATED, Json(booking.into())))
}

pub async fn show_my_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    user.require(Role::Tenant)?;

    registry
        .booking_lifecycle()
        .list_tenant_bookings(user.id())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_owner_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    user.require(Role::Owner)?;

    registry
        .booking_lifecycle()
        .list_owner_bookings(user.id())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    body: Bytes,
) -> AppResult<StatusCode> {
    user.require(Role::Tenant)?;
    let reason = transition_reason(&body)?;

    registry
        .booking_lifecycle()
        .cancel_booking(booking_id, user.id(), reason)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn approve_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    body: Bytes,
) -> AppResult<StatusCode> {
    user.require(Role::Owner)?;
    let reason = transition_reason(&body)?;

    registry
        .booking_lifecycle()
        .approve_booking(booking_id, user.id(), reason)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn reject_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    body: Bytes,
) -> AppResult<StatusCode> {
    user.require(Role::Owner)?;
    let reason = transition_reason(&body)?;

    registry
        .booking_lifecycle()
        .reject_booking(booking_id, user.id(), reason)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_booking_history(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingHistoryResponse>> {
    registry
        .booking_lifecycle()
        .get_booking_history(booking_id, user.id(), user.role())
        .await
        .map(BookingHistoryResponse::from)
        .map(Json)
}

/// The body of a transition is optional. When present it must be a valid
/// `BookingTransitionRequest`, whatever the `content-type` says.
fn transition_reason(body: &[u8]) -> AppResult<Option<String>> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        BookingTransitionRequest::default()
    } else {
        serde_json::from_slice::<BookingTransitionRequest>(body)
            .map_err(|e| AppError::ValidationError(format!("malformed request body: {e}")))?
    };
    req.validate()?;
    Ok(req.reason.filter(|r| !r.trim().is_empty()))
}
