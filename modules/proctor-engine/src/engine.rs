//! The engine: owns the stores and applies events atomically.

use chrono::Utc;
use proctor_common::{ExamSession, Notification, ProctorError, Result, User};
use proctor_events::{AppendEvent, EventLog, EventLogEntry};
use tracing::{info, warn};
use uuid::Uuid;

use crate::machine::transition;
use crate::notify::Notifier;
use crate::report::Report;
use crate::store::{lock_session, SessionStore, UserStore};

/// A proctoring event as submitted by the client-side detector.
#[derive(Debug, Clone)]
pub struct IncomingEvent {
    pub event_type: String,
    pub timestamp: serde_json::Value,
    pub metadata: serde_json::Value,
}

impl IncomingEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp: serde_json::Value::Null,
            metadata: serde_json::Value::Null,
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
}

/// Everything one `apply_event` produced.
#[derive(Debug, Clone)]
pub struct EventOutcome {
    pub session: ExamSession,
    pub log: EventLogEntry,
    pub notifications: Vec<Notification>,
}

/// Owns users, sessions and the event log for the life of the process.
pub struct ProctorEngine<N: Notifier> {
    users: UserStore,
    sessions: SessionStore,
    log: EventLog,
    notifier: N,
}

impl<N: Notifier> ProctorEngine<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            users: UserStore::new(),
            sessions: SessionStore::new(),
            log: EventLog::new(),
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    /// Find-or-create a user by username. Not a security boundary.
    pub fn login(&self, username: &str) -> User {
        let (user, created) = self.users.find_or_create(username);
        info!(user_id = %user.id, created, "User logged in");
        user
    }

    /// Open a new session. Never reuses an existing one.
    pub fn start_exam(&self, user_id: &str, exam_id: &str) -> ExamSession {
        let session = ExamSession::start(user_id, exam_id);
        self.sessions.insert(session.clone());
        info!(session_id = %session.id, user_id, exam_id, "Exam session started");
        session
    }

    pub fn session(&self, session_id: Uuid) -> Result<ExamSession> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| ProctorError::session_not_found(session_id.to_string()))
    }

    /// Apply one event to a session as a single atomic step.
    ///
    /// The session's lock is held from read to commit, so concurrent events
    /// on one session serialize while other sessions proceed. An unknown
    /// session fails before anything is logged, stored or published.
    pub fn apply_event(&self, session_id: Uuid, event: IncomingEvent) -> Result<EventOutcome> {
        let handle = self
            .sessions
            .handle(session_id)
            .ok_or_else(|| ProctorError::session_not_found(session_id.to_string()))?;
        let mut current = lock_session(&handle);

        let step = transition(&current, &event.event_type);

        let timestamp = if event.timestamp.is_null() {
            serde_json::Value::String(Utc::now().to_rfc3339())
        } else {
            event.timestamp
        };
        let log = self.log.append(
            AppendEvent::new(session_id, &event.event_type)
                .with_timestamp(timestamp)
                .with_metadata(event.metadata)
                .with_impact(step.impact),
        );

        *current = step.session.clone();

        info!(
            session_id = %session_id,
            event_type = %event.event_type,
            impact = step.impact,
            risk_score = current.risk_score,
            warnings = current.warnings,
            "Event processed"
        );
        if step.became_high_risk() {
            warn!(session_id = %session_id, warnings = current.warnings, "Session marked high risk");
        }

        // Published under the session lock so subscribers see this session's
        // notifications in event order.
        let topic = current.topic();
        for notification in &step.notifications {
            self.notifier.publish(&topic, notification);
        }

        Ok(EventOutcome {
            session: step.session,
            log,
            notifications: step.notifications,
        })
    }

    /// Join a session with its log entries. Always recomputed.
    pub fn build_report(&self, session_id: Uuid) -> Result<Report> {
        let handle = self
            .sessions
            .handle(session_id)
            .ok_or_else(|| ProctorError::session_not_found(session_id.to_string()))?;
        let session = lock_session(&handle);
        let events = self.log.for_session(session_id);
        Ok(Report::assemble(session.clone(), events))
    }
}
