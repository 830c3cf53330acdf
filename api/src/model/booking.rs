use chrono::{DateTime, NaiveDate, Utc};
use garde::Validate;
use kernel::model::{
    booking::{Booking, BookingStatus},
    id::{BookingId, SpaceId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(skip)]
    pub space_id: SpaceId,
    #[garde(length(min = 1))]
    pub date_from: String,
    #[garde(length(min = 1))]
    pub date_to: String,
}

/// Body of cancel, approve and reject. The body itself is optional.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingTransitionRequest {
    #[garde(length(max = 500))]
    pub reason: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub space_id: SpaceId,
    pub tenant_id: UserId,
    pub status: BookingStatus,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            space_id,
            tenant_id,
            status,
            period,
            created_at,
            updated_at,
        } = value;
        Self {
            id: booking_id,
            space_id,
            tenant_id,
            status,
            date_from: period.date_from(),
            date_to: period.date_to(),
            created_at,
            updated_at,
        }
    }
}
