use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::notification::show_notifications;

pub fn build_notification_routers() -> Router<AppRegistry> {
    Router::new().route("/notifications", get(show_notifications))
}
