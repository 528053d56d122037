use thiserror::Error;

/// Errors surfaced to callers of the proctoring core.
///
/// Neither kind is fatal to the process and neither is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProctorError {
    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProctorError {
    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        Self::SessionNotFound {
            session_id: session_id.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, ProctorError>;
