use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::id::{SpaceId, UserId};

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn find_owner(&self, space_id: SpaceId) -> AppResult<Option<UserId>>;
}
