//! Core types for the event log.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A processed event as recorded in the log. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogEntry {
    pub id: Uuid,
    pub session_id: Uuid,
    pub event_type: String,
    /// Caller-supplied; stored as received.
    pub timestamp: serde_json::Value,
    pub metadata: serde_json::Value,
    /// Risk contribution computed when the entry was written.
    pub impact: u32,
}

/// An entry to be appended. The caller builds this; the log assigns the id.
#[derive(Debug, Clone)]
pub struct AppendEvent {
    pub session_id: Uuid,
    pub event_type: String,
    pub timestamp: serde_json::Value,
    pub metadata: serde_json::Value,
    pub impact: u32,
}

impl AppendEvent {
    pub fn new(session_id: Uuid, event_type: impl Into<String>) -> Self {
        Self {
            session_id,
            event_type: event_type.into(),
            timestamp: serde_json::Value::Null,
            metadata: serde_json::Value::Null,
            impact: 0,
        }
    }

    pub fn with_timestamp(mut self, timestamp: serde_json::Value) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_impact(mut self, impact: u32) -> Self {
        self.impact = impact;
        self
    }

    pub(crate) fn into_entry(self) -> EventLogEntry {
        EventLogEntry {
            id: Uuid::new_v4(),
            session_id: self.session_id,
            event_type: self.event_type,
            timestamp: self.timestamp,
            metadata: self.metadata,
            impact: self.impact,
        }
    }
}
