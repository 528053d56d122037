pub mod auth;
pub mod exam;

use proctor_common::{ProctorError, Result};
use uuid::Uuid;

// --- Helpers ---

/// A required string field, passed through as sent. Blank or missing is invalid.
pub(crate) fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ProctorError::invalid(format!("{field} is required"))),
    }
}

/// A session id that doesn't parse can't name any session.
pub(crate) fn parse_session_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ProctorError::session_not_found(raw))
}
