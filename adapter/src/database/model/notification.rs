use chrono::{DateTime, Utc};
use kernel::model::{
    id::{NotificationId, UserId},
    notification::Notification,
};

#[derive(sqlx::FromRow)]
pub struct NotificationRow {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    pub kind: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(value: NotificationRow) -> Self {
        let NotificationRow {
            notification_id,
            user_id,
            kind,
            message,
            created_at,
        } = value;
        Notification {
            notification_id,
            user_id,
            kind,
            message,
            created_at,
        }
    }
}
