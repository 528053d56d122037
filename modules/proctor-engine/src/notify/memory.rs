use std::sync::{Mutex, PoisonError};

use proctor_common::Notification;

use super::backend::Notifier;

/// Records every publish in order. For tests and local inspection.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    published: Mutex<Vec<(String, Notification)>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(topic, notification)` published so far.
    pub fn published(&self) -> Vec<(String, Notification)> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn for_topic(&self, topic: &str) -> Vec<Notification> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, n)| n.clone())
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn publish(&self, topic: &str, notification: &Notification) {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((topic.to_string(), notification.clone()));
    }
}
