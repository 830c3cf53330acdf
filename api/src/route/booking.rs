use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    approve_booking, cancel_booking, create_booking, reject_booking, show_booking_history,
    show_my_bookings, show_owner_bookings,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/", post(create_booking))
        .route("/my", get(show_my_bookings))
        .route("/owner", get(show_owner_bookings))
        .route("/:booking_id/cancel", post(cancel_booking))
        .route("/:booking_id/approve", post(approve_booking))
        .route("/:booking_id/reject", post(reject_booking))
        .route("/:booking_id/history", get(show_booking_history));

    Router::new().nest("/bookings", bookings_routers)
}
