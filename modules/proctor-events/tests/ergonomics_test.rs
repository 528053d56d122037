//! Ergonomics and usage pattern tests.
//! These exercise the public API surface the engine and report rely on.

use std::sync::Arc;
use std::thread;

use proctor_events::{AppendEvent, EventLog, EventLogEntry};
use serde_json::json;
use uuid::Uuid;

// =========================================================================
// AppendEvent builder ergonomics
// =========================================================================

#[test]
fn append_event_minimal_construction() {
    let session = Uuid::new_v4();
    let event = AppendEvent::new(session, "tab_switch");
    assert_eq!(event.session_id, session);
    assert_eq!(event.event_type, "tab_switch");
    assert!(event.timestamp.is_null());
    assert!(event.metadata.is_null());
    assert_eq!(event.impact, 0);
}

#[test]
fn append_event_builder_order_doesnt_matter() {
    let session = Uuid::new_v4();
    let a = AppendEvent::new(session, "no_face")
        .with_impact(20)
        .with_metadata(json!({"camera": "front"}));
    let b = AppendEvent::new(session, "no_face")
        .with_metadata(json!({"camera": "front"}))
        .with_impact(20);

    assert_eq!(a.impact, b.impact);
    assert_eq!(a.metadata, b.metadata);
}

// =========================================================================
// Entries on the wire
// =========================================================================

#[test]
fn entry_serializes_camel_case() {
    let log = EventLog::new();
    let session = Uuid::new_v4();
    let entry = log.append(
        AppendEvent::new(session, "looking_away")
            .with_timestamp(json!("2024-06-01T10:00:00Z"))
            .with_impact(10),
    );

    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["sessionId"], json!(session.to_string()));
    assert_eq!(value["eventType"], "looking_away");
    assert_eq!(value["timestamp"], "2024-06-01T10:00:00Z");
    assert_eq!(value["impact"], 10);

    let back: EventLogEntry = serde_json::from_value(value).unwrap();
    assert_eq!(back, entry);
}

// =========================================================================
// Shared across threads
// =========================================================================

#[test]
fn concurrent_appends_are_all_kept() {
    let log = Arc::new(EventLog::new());
    let session = Uuid::new_v4();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let log = log.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    log.append(AppendEvent::new(session, "tab_switch"));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(log.len(), 200);
    assert_eq!(log.for_session(session).len(), 200);
}
