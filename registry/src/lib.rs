use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    repository::{
        booking::BookingRepositoryImpl, health::HealthCheckRepositoryImpl,
        history::BookingHistoryRepositoryImpl, notification::NotificationRepositoryImpl,
        space::SpaceRepositoryImpl,
    },
};
use kernel::{
    clock::Clock,
    event::BookingEventPublisher,
    lifecycle::BookingLifecycle,
    repository::{health::HealthCheckRepository, notification::NotificationRepository},
};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    notification_repository: Arc<dyn NotificationRepository>,
    booking_lifecycle: Arc<BookingLifecycle>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        publisher: BookingEventPublisher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let notification_repository = Arc::new(NotificationRepositoryImpl::new(pool.clone()));
        let booking_lifecycle = Arc::new(BookingLifecycle::new(
            Arc::new(BookingRepositoryImpl::new(pool.clone())),
            Arc::new(SpaceRepositoryImpl::new(pool.clone())),
            Arc::new(BookingHistoryRepositoryImpl::new(pool)),
            publisher,
            clock,
        ));
        Self {
            health_check_repository,
            notification_repository,
            booking_lifecycle,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn notification_repository(&self) -> Arc<dyn NotificationRepository> {
        self.notification_repository.clone()
    }

    pub fn booking_lifecycle(&self) -> Arc<BookingLifecycle> {
        self.booking_lifecycle.clone()
    }
}
