use proctor_common::ExamSession;
use proctor_events::EventLogEntry;
use serde::{Deserialize, Serialize};

/// Read-only summary of one session and everything logged against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub session: ExamSession,
    pub events: Vec<EventLogEntry>,
    pub total_warnings: u32,
    pub final_risk_score: u32,
}

impl Report {
    pub fn assemble(session: ExamSession, events: Vec<EventLogEntry>) -> Self {
        Self {
            total_warnings: session.warnings,
            final_risk_score: session.risk_score,
            session,
            events,
        }
    }
}
