use tokio::sync::broadcast;

use medifind_common::alert::RealtimeEvent;

/// Fan-out of real-time events to every connected subscriber.
///
/// Delivery is fire-and-forget: nothing is queued for clients that are not
/// connected when an event is sent, and a subscriber that falls more than the
/// channel capacity behind skips what it missed.
#[derive(Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<RealtimeEvent>,
}

impl Broadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Send `event` to all current subscribers. Returns how many received it.
    pub fn publish(&self, event: RealtimeEvent) -> usize {
        // An error only means nobody is listening.
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use medifind_common::alert::PriceAlertNotification;

    fn event() -> RealtimeEvent {
        RealtimeEvent::PriceAlert(PriceAlertNotification {
            message: "Price alert".to_string(),
            medicine: "Dolo 650".to_string(),
            current_price: 38.0,
            target_price: 40.0,
            timestamp: Utc::now(),
        })
    }

    #[tokio::test]
    async fn every_subscriber_receives_event() {
        let b = Broadcaster::new(8);
        let mut first = b.subscribe();
        let mut second = b.subscribe();

        assert_eq!(b.publish(event()), 2);
        assert_eq!(first.recv().await.unwrap(), second.recv().await.unwrap());
    }

    #[test]
    fn publish_without_subscribers_is_not_an_error() {
        let b = Broadcaster::new(8);
        assert_eq!(b.subscriber_count(), 0);
        assert_eq!(b.publish(event()), 0);
    }

    #[tokio::test]
    async fn late_subscriber_gets_no_replay() {
        let b = Broadcaster::new(8);
        let _early = b.subscribe();
        b.publish(event());

        let mut late = b.subscribe();
        assert!(matches!(
            late.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }
}
