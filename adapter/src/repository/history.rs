use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        history::{event::RecordTransition, BookingStatusHistory},
        id::BookingId,
    },
    repository::history::BookingHistoryRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::PgConnection;

use crate::database::{model::history::BookingStatusHistoryRow, ConnectionPool};

#[derive(new)]
pub struct BookingHistoryRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingHistoryRepository for BookingHistoryRepositoryImpl {
    async fn record_transition(&self, event: RecordTransition) -> AppResult<BookingStatusHistory> {
        let mut conn = self
            .db
            .inner_ref()
            .acquire()
            .await
            .map_err(AppError::SpecificOperationError)?;
        insert_transition(&mut *conn, &event).await
    }

    async fn find_by_booking_id(
        &self,
        booking_id: BookingId,
    ) -> AppResult<Vec<BookingStatusHistory>> {
        let rows: Vec<BookingStatusHistoryRow> = sqlx::query_as(
            r#"
                SELECT
                    history_id,
                    booking_id,
                    old_status,
                    new_status,
                    changed_by,
                    reason,
                    changed_at
                FROM booking_status_history
                WHERE booking_id = $1
                ORDER BY changed_at ASC, history_id ASC
            "#,
        )
        .bind(booking_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter()
            .map(BookingStatusHistory::try_from)
            .collect()
    }
}

/// Appends one history row on `conn`. The booking store calls this inside
/// its own transactions so a status change and its record commit together.
pub(crate) async fn insert_transition(
    conn: &mut PgConnection,
    event: &RecordTransition,
) -> AppResult<BookingStatusHistory> {
    let row: BookingStatusHistoryRow = sqlx::query_as(
        r#"
            INSERT INTO booking_status_history
                (booking_id, old_status, new_status, changed_by, reason)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                history_id,
                booking_id,
                old_status,
                new_status,
                changed_by,
                reason,
                changed_at
        "#,
    )
    .bind(event.booking_id)
    .bind(event.old_status.map(|s| s.to_string()))
    .bind(event.new_status.to_string())
    .bind(event.changed_by)
    .bind(event.reason.as_deref())
    .fetch_one(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    BookingStatusHistory::try_from(row)
}
