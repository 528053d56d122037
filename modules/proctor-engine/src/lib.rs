//! Exam-session risk engine.
//!
//! Turns a stream of classified proctoring events into a per-session risk
//! score, warning count and status, and decides what to broadcast:
//! transition (pure) → log → commit → notify, under the session's lock.
//!
//! Stores are owned by the engine instance; a fresh engine is a fresh world.
//! Delivery goes through the `Notifier` capability so the transport can vary.

pub mod engine;
pub mod machine;
pub mod notify;
pub mod report;
pub mod store;

pub use engine::{EventOutcome, IncomingEvent, ProctorEngine};
pub use machine::{transition, Transition};
pub use notify::{BroadcastNotifier, MemoryNotifier, NoopNotifier, Notifier};
pub use report::Report;
pub use store::{SessionStore, UserStore};
