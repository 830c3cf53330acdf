use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::id::{SpaceId, UserId},
    repository::space::SpaceRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::ConnectionPool;

#[derive(new)]
pub struct SpaceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SpaceRepository for SpaceRepositoryImpl {
    async fn find_owner(&self, space_id: SpaceId) -> AppResult<Option<UserId>> {
        sqlx::query_scalar("SELECT owner_id FROM spaces WHERE space_id = $1")
            .bind(space_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../migrations", fixtures("common"))]
    #[ignore = "requires DATABASE_URL"]
    async fn finds_space_owner(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = SpaceRepositoryImpl::new(ConnectionPool::new(pool));

        assert_eq!(repo.find_owner(SpaceId::from(1)).await?, Some(UserId::from(10)));
        assert_eq!(repo.find_owner(SpaceId::from(2)).await?, Some(UserId::from(20)));
        assert_eq!(repo.find_owner(SpaceId::from(404)).await?, None);
        Ok(())
    }
}
