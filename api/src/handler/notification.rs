use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{extractor::AuthorizedUser, model::notification::NotificationsResponse};

pub async fn show_notifications(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<NotificationsResponse>> {
    registry
        .notification_repository()
        .find_by_user_id(user.id())
        .await
        .map(NotificationsResponse::from)
        .map(Json)
}
