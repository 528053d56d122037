//! Append-only, in-process event log.
//!
//! Stores every processed proctoring event linked to its session, in
//! insertion order. Knows nothing about risk rules or session state; the
//! engine decides what to append and the report reads it back.
//!
//! Lifetime is bounded by the owning process. Nothing is persisted.

pub mod store;
pub mod types;

pub use store::EventLog;
pub use types::{AppendEvent, EventLogEntry};
