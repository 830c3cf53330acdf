use std::time::Duration;

use shared::config::EventQueueConfig;
use tokio::sync::mpsc::{self, error::SendTimeoutError};
use tracing::warn;

use super::BookingEvent;

pub type BookingEventReceiver = mpsc::Receiver<BookingEvent>;

/// Outcome of a publish attempt. Dropping is logged, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Queued,
    DroppedQueueFull,
    DroppedQueueClosed,
}

pub fn channel(config: &EventQueueConfig) -> (BookingEventPublisher, BookingEventReceiver) {
    let (tx, rx) = mpsc::channel(config.capacity);
    let publisher = BookingEventPublisher {
        tx,
        send_timeout: config.send_timeout,
    };
    (publisher, rx)
}

/// Producer handle of the bounded event queue.
///
/// When the queue is full the producer waits up to `send_timeout` for the
/// dispatcher to make room, then drops the event with a warning. A stalled
/// dispatcher therefore costs each transition at most `send_timeout`.
#[derive(Debug, Clone)]
pub struct BookingEventPublisher {
    tx: mpsc::Sender<BookingEvent>,
    send_timeout: Duration,
}

impl BookingEventPublisher {
    pub async fn publish(&self, event: BookingEvent) -> Delivery {
        match self.tx.send_timeout(event, self.send_timeout).await {
            Ok(()) => Delivery::Queued,
            Err(SendTimeoutError::Timeout(event)) => {
                warn!(
                    kind = %event.kind,
                    booking_id = %event.booking_id,
                    space_id = %event.space_id,
                    tenant_id = %event.tenant_id,
                    timeout_ms = self.send_timeout.as_millis() as u64,
                    "booking event queue is full, dropping event"
                );
                Delivery::DroppedQueueFull
            }
            Err(SendTimeoutError::Closed(event)) => {
                warn!(
                    kind = %event.kind,
                    booking_id = %event.booking_id,
                    "booking event queue is closed, dropping event"
                );
                Delivery::DroppedQueueClosed
            }
        }
    }
}
