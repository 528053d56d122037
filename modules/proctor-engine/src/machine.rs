//! The session state machine. Pure: no I/O, no stores, no clock.

use proctor_common::rules::{HIGH_RISK_WARNING_THRESHOLD, MAX_RISK_SCORE};
use proctor_common::{
    message_for, risk_of, ExamSession, Notification, SessionStatus, WarningNotice,
    HIGH_RISK_MESSAGE,
};

/// Result of applying one event to a session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: ExamSession,
    pub impact: u32,
    /// In emission order: `warning` first, then `high_risk`.
    pub notifications: Vec<Notification>,
}

impl Transition {
    pub fn became_high_risk(&self) -> bool {
        self.notifications
            .iter()
            .any(|n| matches!(n, Notification::HighRisk { .. }))
    }
}

/// Apply one event to `current`, producing the next session state and the
/// notifications it triggers.
///
/// The high-risk transition is edge-triggered on the previous status, so it
/// fires on the event that first reaches the threshold and never again.
pub fn transition(current: &ExamSession, event_type: &str) -> Transition {
    let impact = risk_of(event_type);
    let mut next = current.clone();
    let mut notifications = Vec::with_capacity(2);

    next.risk_score = current
        .risk_score
        .saturating_add(impact)
        .min(MAX_RISK_SCORE);

    if impact > 0 {
        next.warnings = current.warnings.saturating_add(1);
        notifications.push(Notification::Warning(WarningNotice {
            event_type: event_type.to_string(),
            message: message_for(event_type).to_string(),
            current_warnings: next.warnings,
            risk_score: next.risk_score,
        }));
    }

    if current.status == SessionStatus::Ongoing && next.warnings >= HIGH_RISK_WARNING_THRESHOLD {
        next.status = SessionStatus::HighRisk;
        notifications.push(Notification::HighRisk {
            message: HIGH_RISK_MESSAGE.to_string(),
        });
    }

    Transition {
        session: next,
        impact,
        notifications,
    }
}
