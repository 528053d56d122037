use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Identity ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub status: UserStatus,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            status: UserStatus::Active,
        }
    }
}

// --- Exam sessions ---

/// Session status. `Ongoing` moves to `HighRisk` once and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Ongoing,
    HighRisk,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Ongoing => write!(f, "ongoing"),
            SessionStatus::HighRisk => write!(f, "high_risk"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSession {
    pub id: Uuid,
    pub user_id: String,
    pub exam_id: String,
    pub start_time: DateTime<Utc>,
    pub risk_score: u32,
    pub warnings: u32,
    pub status: SessionStatus,
}

impl ExamSession {
    /// A fresh session: zero risk, zero warnings, ongoing.
    pub fn start(user_id: impl Into<String>, exam_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            exam_id: exam_id.into(),
            start_time: Utc::now(),
            risk_score: 0,
            warnings: 0,
            status: SessionStatus::Ongoing,
        }
    }

    /// Pub/sub topic carrying this session's real-time notifications.
    pub fn topic(&self) -> String {
        self.id.to_string()
    }
}

// --- Real-time notifications ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningNotice {
    #[serde(rename = "type")]
    pub event_type: String,
    pub message: String,
    pub current_warnings: u32,
    pub risk_score: u32,
}

/// A message pushed to every subscriber of a session's topic.
///
/// Serialized as `{"event": "warning", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Notification {
    Warning(WarningNotice),
    HighRisk { message: String },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Warning(_) => "warning",
            Notification::HighRisk { .. } => "high_risk",
        }
    }
}
