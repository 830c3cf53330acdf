use chrono::{DateTime, Utc};

use crate::model::id::{NotificationId, UserId};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    pub kind: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
