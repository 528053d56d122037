use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use proctor_common::Notification;
use tokio::sync::broadcast;
use tracing::debug;

use super::backend::Notifier;

/// Per-topic fan-out over `tokio::sync::broadcast`.
///
/// Topics are created on first subscribe and dropped once the last
/// subscriber is gone. A slow subscriber lags and loses the oldest
/// messages; it never holds up the publisher.
pub struct BroadcastNotifier {
    capacity: usize,
    topics: Mutex<HashMap<String, broadcast::Sender<Notification>>>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            topics: Mutex::new(HashMap::new()),
        }
    }

    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<Notification> {
        let mut topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(topic)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    /// Drop the topic if nobody is listening any more.
    pub fn prune(&self, topic: &str) {
        let mut topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        if topics.get(topic).is_some_and(|tx| tx.receiver_count() == 0) {
            topics.remove(topic);
            debug!(topic, "Pruned topic with no subscribers");
        }
    }

    pub fn topic_count(&self) -> usize {
        self.topics.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Notifier for BroadcastNotifier {
    fn publish(&self, topic: &str, notification: &Notification) {
        let mut topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(tx) = topics.get(topic) else {
            debug!(topic, kind = notification.kind(), "No subscribers, notification dropped");
            return;
        };
        match tx.send(notification.clone()) {
            Ok(receivers) => {
                debug!(topic, kind = notification.kind(), receivers, "Notification published")
            }
            Err(_) => {
                topics.remove(topic);
                debug!(topic, kind = notification.kind(), "All subscribers gone, topic dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::{RecvError, TryRecvError};

    fn high_risk() -> Notification {
        Notification::HighRisk {
            message: "High risk marked: Too many warnings.".into(),
        }
    }

    #[test]
    fn publish_without_subscribers_is_a_noop() {
        let hub = BroadcastNotifier::new(4);
        hub.publish("nobody", &high_risk());
        assert_eq!(hub.topic_count(), 0);
    }

    #[tokio::test]
    async fn every_subscriber_of_a_topic_receives() {
        let hub = BroadcastNotifier::new(4);
        let mut a = hub.subscribe("s1");
        let mut b = hub.subscribe("s1");
        assert_eq!(hub.subscriber_count("s1"), 2);

        hub.publish("s1", &high_risk());

        assert_eq!(a.recv().await.unwrap(), high_risk());
        assert_eq!(b.recv().await.unwrap(), high_risk());
    }

    #[test]
    fn topics_are_isolated() {
        let hub = BroadcastNotifier::new(4);
        let mut other = hub.subscribe("s2");
        let _mine = hub.subscribe("s1");

        hub.publish("s1", &high_risk());

        assert!(matches!(other.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn prune_removes_abandoned_topics_only() {
        let hub = BroadcastNotifier::new(4);
        let rx = hub.subscribe("s1");
        let _keep = hub.subscribe("s2");
        drop(rx);

        hub.prune("s1");
        hub.prune("s2");

        assert_eq!(hub.subscriber_count("s1"), 0);
        assert_eq!(hub.subscriber_count("s2"), 1);
        assert_eq!(hub.topic_count(), 1);
    }

    #[test]
    fn publish_after_last_subscriber_leaves_drops_topic() {
        let hub = BroadcastNotifier::new(4);
        drop(hub.subscribe("s1"));
        hub.publish("s1", &high_risk());
        assert_eq!(hub.topic_count(), 0);
    }

    #[tokio::test]
    async fn lagging_subscriber_skips_oldest_and_continues() {
        let hub = BroadcastNotifier::new(2);
        let mut rx = hub.subscribe("s1");

        for i in 0..4 {
            hub.publish(
                "s1",
                &Notification::HighRisk {
                    message: format!("m{i}"),
                },
            );
        }

        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(2))));
        assert_eq!(
            rx.recv().await.unwrap(),
            Notification::HighRisk { message: "m2".into() }
        );
    }
}
