use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::{queue::BookingEventReceiver, BookingEvent};
use crate::{
    model::notification::event::CreateNotification,
    repository::notification::NotificationRepository,
};

/// Single consumer of the booking event queue.
///
/// Events are handled one at a time in queue order. A failed notification
/// write is logged and the loop moves on to the next event.
pub struct NotificationDispatcher {
    events: BookingEventReceiver,
    notifications: Arc<dyn NotificationRepository>,
    drain_on_shutdown: bool,
}

impl NotificationDispatcher {
    pub fn new(
        events: BookingEventReceiver,
        notifications: Arc<dyn NotificationRepository>,
        drain_on_shutdown: bool,
    ) -> Self {
        Self {
            events,
            notifications,
            drain_on_shutdown,
        }
    }

    /// Runs until `shutdown` fires or every publisher has been dropped.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!("booking event dispatcher started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                received = self.events.recv() => match received {
                    Some(event) => self.dispatch(event).await,
                    None => {
                        info!("booking event queue closed, dispatcher stopped");
                        return;
                    }
                },
            }
        }

        self.events.close();
        if self.drain_on_shutdown {
            let mut drained = 0usize;
            while let Some(event) = self.events.recv().await {
                self.dispatch(event).await;
                drained += 1;
            }
            info!(drained, "booking event dispatcher drained remaining events");
        }
        info!("booking event dispatcher stopped");
    }

    async fn dispatch(&self, event: BookingEvent) {
        let BookingEvent {
            kind,
            booking_id,
            space_id,
            tenant_id,
            at,
        } = &event;
        debug!(
            %kind,
            %booking_id,
            %space_id,
            %tenant_id,
            at = %at.to_rfc3339(),
            "dispatching booking event"
        );

        match self
            .notifications
            .create(CreateNotification::from(&event))
            .await
        {
            Ok(notification) => debug!(
                notification_id = %notification.notification_id,
                user_id = %notification.user_id,
                "notification created"
            ),
            Err(e) => error!(
                error.message = %e,
                %kind,
                %booking_id,
                %tenant_id,
                "failed to create notification"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use shared::{
        config::EventQueueConfig,
        error::{AppError, AppResult},
    };

    use super::*;
    use crate::{
        event::{channel, BookingEventKind, Delivery},
        model::{
            id::{BookingId, NotificationId, SpaceId, UserId},
            notification::Notification,
        },
    };

    #[derive(Default)]
    struct RecordingNotifications {
        created: Mutex<Vec<CreateNotification>>,
        fail_for: Option<UserId>,
    }

    impl RecordingNotifications {
        fn created(&self) -> Vec<CreateNotification> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationRepository for RecordingNotifications {
        async fn create(&self, event: CreateNotification) -> AppResult<Notification> {
            if self.fail_for == Some(event.user_id) {
                return Err(AppError::NoRowsAffectedError(
                    "notification insert failed".into(),
                ));
            }
            let mut created = self.created.lock().unwrap();
            created.push(event.clone());
            Ok(Notification {
                notification_id: NotificationId::from(created.len() as i64),
                user_id: event.user_id,
                kind: event.kind,
                message: event.message,
                created_at: Utc::now(),
            })
        }

        async fn find_by_user_id(&self, _user_id: UserId) -> AppResult<Vec<Notification>> {
            Ok(vec![])
        }
    }

    fn event(kind: BookingEventKind, booking_id: i64, tenant_id: i64) -> BookingEvent {
        BookingEvent::new(
            kind,
            BookingId::from(booking_id),
            SpaceId::from(1),
            UserId::from(tenant_id),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    fn queue_config() -> EventQueueConfig {
        EventQueueConfig {
            capacity: 16,
            send_timeout: Duration::from_millis(50),
            drain_on_shutdown: true,
        }
    }

    #[tokio::test]
    async fn turns_events_into_notifications_in_order() {
        let notifications = Arc::new(RecordingNotifications::default());
        let (publisher, rx) = channel(&queue_config());
        let dispatcher = NotificationDispatcher::new(rx, notifications.clone(), true);

        publisher.publish(event(BookingEventKind::Created, 1, 42)).await;
        publisher.publish(event(BookingEventKind::Approved, 1, 42)).await;
        publisher.publish(event(BookingEventKind::Cancelled, 1, 42)).await;
        drop(publisher);

        dispatcher.run(CancellationToken::new()).await;

        let kinds: Vec<String> = notifications.created().into_iter().map(|n| n.kind).collect();
        assert_eq!(kinds, ["created", "approved", "cancelled"]);
        assert!(notifications
            .created()
            .iter()
            .all(|n| n.user_id == UserId::from(42)));
    }

    #[tokio::test]
    async fn keeps_going_after_a_failed_write() {
        let notifications = Arc::new(RecordingNotifications {
            fail_for: Some(UserId::from(13)),
            ..Default::default()
        });
        let (publisher, rx) = channel(&queue_config());
        let dispatcher = NotificationDispatcher::new(rx, notifications.clone(), true);

        publisher.publish(event(BookingEventKind::Created, 1, 13)).await;
        publisher.publish(event(BookingEventKind::Created, 2, 42)).await;
        drop(publisher);

        dispatcher.run(CancellationToken::new()).await;

        let created = notifications.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].message, "Your booking #2 was created.");
    }

    #[tokio::test]
    async fn drains_buffered_events_on_shutdown() {
        let notifications = Arc::new(RecordingNotifications::default());
        let (publisher, rx) = channel(&queue_config());
        let dispatcher = NotificationDispatcher::new(rx, notifications.clone(), true);

        publisher.publish(event(BookingEventKind::Created, 1, 42)).await;
        publisher.publish(event(BookingEventKind::Rejected, 1, 42)).await;

        let shutdown = CancellationToken::new();
        shutdown.cancel();
        dispatcher.run(shutdown).await;

        assert_eq!(notifications.created().len(), 2);
        assert_eq!(
            publisher.publish(event(BookingEventKind::Created, 2, 42)).await,
            Delivery::DroppedQueueClosed
        );
    }

    #[tokio::test]
    async fn discards_buffered_events_when_not_draining() {
        let notifications = Arc::new(RecordingNotifications::default());
        let (publisher, rx) = channel(&queue_config());
        let dispatcher = NotificationDispatcher::new(rx, notifications.clone(), false);

        publisher.publish(event(BookingEventKind::Created, 1, 42)).await;

        let shutdown = CancellationToken::new();
        shutdown.cancel();
        dispatcher.run(shutdown).await;

        assert!(notifications.created().is_empty());
    }

    #[tokio::test]
    async fn stops_on_cancellation_while_idle() {
        let notifications = Arc::new(RecordingNotifications::default());
        let (_publisher, rx) = channel(&queue_config());
        let dispatcher = NotificationDispatcher::new(rx, notifications, true);

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(dispatcher.run(shutdown.clone()));
        tokio::time::sleep(Duration::from_millis(10)).await;
        shutdown.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("dispatcher did not stop")
            .unwrap();
    }
}
