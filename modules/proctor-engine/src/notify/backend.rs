use std::sync::Arc;

use proctor_common::Notification;

/// Pluggable real-time delivery for session notifications.
///
/// Fire-and-forget: implementations must not block waiting for delivery
/// and report no failure to the caller. Delivery is at most once.
pub trait Notifier: Send + Sync {
    fn publish(&self, topic: &str, notification: &Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn publish(&self, topic: &str, notification: &Notification) {
        (**self).publish(topic, notification)
    }
}
