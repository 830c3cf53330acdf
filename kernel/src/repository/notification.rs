use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::UserId,
    notification::{event::CreateNotification, Notification},
};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, event: CreateNotification) -> AppResult<Notification>;
    /// Newest first.
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Notification>>;
}
