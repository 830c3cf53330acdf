use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    booking::{Booking, BookingPeriod},
    id::{BookingId, SpaceId, UserId},
};
use shared::error::{AppError, AppResult};

use super::parse_status;

#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub space_id: SpaceId,
    pub tenant_id: UserId,
    pub status: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(value: BookingRow) -> AppResult<Self> {
        let BookingRow {
            booking_id,
            space_id,
            tenant_id,
            status,
            date_from,
            date_to,
            created_at,
            updated_at,
        } = value;
        // Also enforced by a CHECK constraint on the table.
        let period = BookingPeriod::new(date_from, date_to).map_err(|e| {
            AppError::ConversionEntityError(format!("booking {booking_id} has a broken period: {e}"))
        })?;
        Ok(Booking {
            booking_id,
            space_id,
            tenant_id,
            status: parse_status(&status)?,
            period,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use kernel::model::booking::BookingStatus;

    use super::*;

    fn row(status: &str, from: NaiveDate, to: NaiveDate) -> BookingRow {
        BookingRow {
            booking_id: BookingId::from(1),
            space_id: SpaceId::from(2),
            tenant_id: UserId::from(3),
            status: status.into(),
            date_from: from,
            date_to: to,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn converts_stored_rows() {
        let booking = Booking::try_from(row("approved", date(1), date(10))).unwrap();
        assert_eq!(booking.status, BookingStatus::Approved);
        assert_eq!(booking.period.date_from(), date(1));
        assert_eq!(booking.period.date_to(), date(10));
    }

    #[test]
    fn rejects_unknown_status_and_broken_period() {
        assert!(matches!(
            Booking::try_from(row("archived", date(1), date(10))),
            Err(AppError::ConversionEntityError(_))
        ));
        assert!(matches!(
            Booking::try_from(row("pending", date(10), date(1))),
            Err(AppError::ConversionEntityError(_))
        ));
    }
}
