use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        booking::{
            event::{CreateBooking, UpdateBookingStatus},
            Booking, BookingPeriod, BookingStatus,
        },
        history::event::RecordTransition,
        id::{BookingId, SpaceId, UserId},
    },
    repository::booking::BookingRepository,
};
use shared::error::{AppError, AppResult};

use super::history::insert_transition;
use crate::database::{model::booking::BookingRow, ConnectionPool};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        let row: BookingRow = sqlx::query_as(
            r#"
                INSERT INTO bookings (space_id, tenant_id, status, date_from, date_to)
                VALUES ($1, $2, 'pending', $3, $4)
                RETURNING
                    booking_id,
                    space_id,
                    tenant_id,
                    status,
                    date_from,
                    date_to,
                    created_at,
                    updated_at
            "#,
        )
        .bind(event.space_id)
        .bind(event.tenant_id)
        .bind(event.period.date_from())
        .bind(event.period.date_to())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| reference_error(e, &event))?;
        let booking = Booking::try_from(row)?;

        insert_transition(
            &mut *tx,
            &RecordTransition::initial(booking.booking_id, &event),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(booking)
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    booking_id,
                    space_id,
                    tenant_id,
                    status,
                    date_from,
                    date_to,
                    created_at,
                    updated_at
                FROM bookings
                WHERE booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_by_tenant_id(&self, tenant_id: UserId) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    booking_id,
                    space_id,
                    tenant_id,
                    status,
                    date_from,
                    date_to,
                    created_at,
                    updated_at
                FROM bookings
                WHERE tenant_id = $1
                ORDER BY date_from DESC, booking_id DESC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.space_id,
                    b.tenant_id,
                    b.status,
                    b.date_from,
                    b.date_to,
                    b.created_at,
                    b.updated_at
                FROM bookings AS b
                INNER JOIN spaces AS s ON b.space_id = s.space_id
                WHERE s.owner_id = $1
                ORDER BY b.date_from DESC, b.booking_id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // Writers on the same space queue up here until this transaction
        // ends. Taken first so the checks below see every earlier commit.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(event.space_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if event.status == BookingStatus::Approved {
            let overlapping: bool = sqlx::query_scalar(
                r#"
                    SELECT EXISTS (
                        SELECT 1
                        FROM bookings AS target
                        INNER JOIN bookings AS other
                            ON other.space_id = target.space_id
                           AND other.booking_id <> target.booking_id
                        WHERE target.booking_id = $1
                          AND other.status = 'approved'
                          AND other.date_from < target.date_to
                          AND target.date_from < other.date_to
                    )
                "#,
            )
            .bind(event.booking_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if overlapping {
                return Err(AppError::OverlappingBooking(format!(
                    "booking {} overlaps an approved booking on space {}",
                    event.booking_id, event.space_id
                )));
            }
        }

        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET status = $1, updated_at = CURRENT_TIMESTAMP
                WHERE booking_id = $2 AND status = $3
            "#,
        )
        .bind(event.status.to_string())
        .bind(event.booking_id)
        .bind(event.expected.to_string())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            let current: Option<String> =
                sqlx::query_scalar("SELECT status FROM bookings WHERE booking_id = $1")
                    .bind(event.booking_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;
            return Err(match current {
                None => AppError::EntityNotFound(format!("booking {} not found", event.booking_id)),
                Some(current) => AppError::WrongStatus(format!(
                    "booking {} is {current}, expected {}",
                    event.booking_id, event.expected
                )),
            });
        }

        insert_transition(&mut *tx, &RecordTransition::from(&event)).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn has_approved_overlap(
        &self,
        space_id: SpaceId,
        period: BookingPeriod,
        exclude: Option<BookingId>,
    ) -> AppResult<bool> {
        sqlx::query_scalar(
            r#"
                SELECT EXISTS (
                    SELECT 1
                    FROM bookings
                    WHERE space_id = $1
                      AND status = 'approved'
                      AND date_from < $3
                      AND $2 < date_to
                      AND ($4::BIGINT IS NULL OR booking_id <> $4)
                )
            "#,
        )
        .bind(space_id)
        .bind(period.date_from())
        .bind(period.date_to())
        .bind(exclude)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }
}

fn reference_error(e: sqlx::Error, event: &CreateBooking) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_foreign_key_violation() {
            return AppError::EntityNotFound(format!(
                "space {} or user {} not found",
                event.space_id, event.tenant_id
            ));
        }
    }
    AppError::SpecificOperationError(e)
}
