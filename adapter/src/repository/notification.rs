use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::UserId,
        notification::{event::CreateNotification, Notification},
    },
    repository::notification::NotificationRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::notification::NotificationRow, ConnectionPool};

#[derive(new)]
pub struct NotificationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn create(&self, event: CreateNotification) -> AppResult<Notification> {
        let row: NotificationRow = sqlx::query_as(
            r#"
                INSERT INTO notifications (user_id, kind, message)
                VALUES ($1, $2, $3)
                RETURNING notification_id, user_id, kind, message, created_at
            "#,
        )
        .bind(event.user_id)
        .bind(&event.kind)
        .bind(&event.message)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(Notification::from(row))
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
                SELECT notification_id, user_id, kind, message, created_at
                FROM notifications
                WHERE user_id = $1
                ORDER BY created_at DESC, notification_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }
}
