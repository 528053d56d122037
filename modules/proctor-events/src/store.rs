//! EventLog — append-only record of processed events.

use std::sync::{PoisonError, RwLock};

use tracing::debug;
use uuid::Uuid;

use crate::types::{AppendEvent, EventLogEntry};

/// Append-only log. Readers always see entries in insertion order.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: RwLock<Vec<EventLogEntry>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return it with its assigned id.
    pub fn append(&self, event: AppendEvent) -> EventLogEntry {
        let entry = event.into_entry();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.push(entry.clone());
        debug!(
            entry_id = %entry.id,
            session_id = %entry.session_id,
            event_type = %entry.event_type,
            total = entries.len(),
            "Event logged"
        );
        entry
    }

    /// All entries for one session, in the order they were appended.
    pub fn for_session(&self, session_id: Uuid) -> Vec<EventLogEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.session_id == session_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn append_assigns_fresh_ids() {
        let log = EventLog::new();
        let session = Uuid::new_v4();
        let a = log.append(AppendEvent::new(session, "tab_switch"));
        let b = log.append(AppendEvent::new(session, "tab_switch"));
        assert_ne!(a.id, b.id);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn for_session_filters_and_keeps_order() {
        let log = EventLog::new();
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();

        log.append(AppendEvent::new(s1, "first"));
        log.append(AppendEvent::new(s2, "other"));
        log.append(AppendEvent::new(s1, "second"));
        log.append(AppendEvent::new(s1, "third"));

        let types: Vec<String> = log
            .for_session(s1)
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(types, vec!["first", "second", "third"]);
        assert_eq!(log.for_session(s2).len(), 1);
    }

    #[test]
    fn unknown_session_reads_empty() {
        let log = EventLog::new();
        log.append(AppendEvent::new(Uuid::new_v4(), "tab_switch"));
        assert!(log.for_session(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn entry_keeps_caller_payload_verbatim() {
        let log = EventLog::new();
        let entry = log.append(
            AppendEvent::new(Uuid::new_v4(), "no_face")
                .with_timestamp(json!(1718000000000_i64))
                .with_metadata(json!({"confidence": 0.91}))
                .with_impact(20),
        );
        assert_eq!(entry.timestamp, json!(1718000000000_i64));
        assert_eq!(entry.metadata["confidence"], json!(0.91));
        assert_eq!(entry.impact, 20);
    }
}
